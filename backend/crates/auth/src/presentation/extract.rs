//! Request extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use platform::client::ClientInfo;

use crate::application::check_session::SessionIdentity;

/// Caller IP and User-Agent, forwarded to the provider
#[derive(Debug, Clone)]
pub struct Client(pub ClientInfo);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(Client(ClientInfo::from_headers(&parts.headers, direct_ip)))
    }
}

/// Identity resolved by the session middleware (`None` when signed out)
#[derive(Debug, Clone, Default)]
pub struct CurrentIdentity(pub Option<SessionIdentity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}
