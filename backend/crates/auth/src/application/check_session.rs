//! Check Session Use Case
//!
//! Resolves the caller identity from the session token via the provider.

use std::sync::Arc;

use crate::domain::provider::AuthProvider;
use crate::domain::value_object::UserId;

/// Caller identity attached to a request
#[derive(Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub token: String,
}

impl std::fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdentity")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Check session use case
pub struct CheckSessionUseCase<P>
where
    P: AuthProvider,
{
    provider: Arc<P>,
}

impl<P> CheckSessionUseCase<P>
where
    P: AuthProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Identity behind `token`, or `None` when there is no usable session
    ///
    /// Provider failures are logged and treated as signed out.
    pub async fn execute(&self, token: Option<&str>) -> Option<SessionIdentity> {
        let token = token.filter(|t| !t.is_empty())?;

        match self.provider.resolve_session(token).await {
            Ok(Some(user_id)) => Some(SessionIdentity {
                user_id,
                token: token.to_string(),
            }),
            Ok(None) => {
                tracing::debug!("Session token no longer valid");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, treating caller as signed out");
                None
            }
        }
    }
}
