//! HTTP auth provider client
//!
//! Speaks the provider's JSON API:
//! - `POST /api/auth/signIn` with `{ provider, params }` returns `{ token, userId }`
//! - `POST /api/auth/signOut` with a bearer token
//! - `GET /api/auth/session` with a bearer token returns `{ userId }`, 401 when gone
//!
//! Error bodies are `{ message, code? }`; plain text bodies are taken as the
//! message.

use kernel::id::UserId;
use platform::client::ClientInfo;
use platform::http::{HttpClientError, JsonClient, JsonResponse};
use serde::{Deserialize, Serialize};

use crate::domain::provider::{
    AuthProvider, ProviderError, ProviderErrorCode, ProviderParams, ProviderSession,
};

const SIGN_IN_PATH: &str = "/api/auth/signIn";
const SIGN_OUT_PATH: &str = "/api/auth/signOut";
const SESSION_PATH: &str = "/api/auth/session";

#[derive(Serialize)]
struct SignInBody<'a> {
    provider: &'a str,
    params: ProviderParams<'a>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionBody {
    token: String,
    user_id: UserId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionLookupBody {
    user_id: UserId,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<ProviderErrorCode>,
}

/// Auth provider reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthProvider {
    client: JsonClient,
}

impl HttpAuthProvider {
    pub fn new(client: JsonClient) -> Self {
        Self { client }
    }

    /// Build a client for `base_url`
    pub fn connect(base_url: &str) -> Result<Self, HttpClientError> {
        let user_agent = concat!("portal/", env!("CARGO_PKG_VERSION"));
        Ok(Self::new(JsonClient::new(base_url, user_agent)?))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl AuthProvider for HttpAuthProvider {
    async fn sign_in(
        &self,
        provider: &str,
        params: ProviderParams<'_>,
        client: &ClientInfo,
    ) -> Result<ProviderSession, ProviderError> {
        let flow = params.flow;
        let body = SignInBody { provider, params };

        let response = self
            .client
            .post_json(SIGN_IN_PATH, &body, None, Some(client))
            .await
            .map_err(unavailable)?;

        if !response.is_success() {
            return Err(rejected(&response));
        }

        let session: SessionBody = response.json().map_err(unavailable)?;
        tracing::debug!(%flow, user_id = %session.user_id, "Provider issued session");

        Ok(ProviderSession {
            token: session.token,
            user_id: session.user_id,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .post_empty(SIGN_OUT_PATH, Some(token), None)
            .await
            .map_err(unavailable)?;

        // An already expired session is as good as signed out
        if response.is_success() || response.status().as_u16() == 401 {
            return Ok(());
        }
        Err(rejected(&response))
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, ProviderError> {
        let response = self
            .client
            .get(SESSION_PATH, Some(token), None)
            .await
            .map_err(unavailable)?;

        match response.status().as_u16() {
            200..=299 => {
                let body: SessionLookupBody = response.json().map_err(unavailable)?;
                Ok(Some(body.user_id))
            }
            401 | 403 | 404 => Ok(None),
            _ => Err(rejected(&response)),
        }
    }
}

fn unavailable(err: HttpClientError) -> ProviderError {
    ProviderError::Unavailable(err.to_string())
}

fn rejected(response: &JsonResponse) -> ProviderError {
    let status = response.status().as_u16();

    match response.json::<ErrorBody>() {
        Ok(body) => ProviderError::rejected(
            status,
            body.code,
            body.message.unwrap_or_else(|| format!("HTTP {status}")),
        ),
        Err(_) => {
            let text = response.text();
            let message = if text.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                text.trim().to_string()
            };
            ProviderError::rejected(status, None, message)
        }
    }
}
