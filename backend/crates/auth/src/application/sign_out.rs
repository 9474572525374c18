//! Sign Out Use Case
//!
//! Ends the provider session. The caller is always sent back to the landing
//! page, even when the provider call fails.

use std::sync::Arc;

use crate::application::navigation::Route;
use crate::domain::provider::AuthProvider;

/// Sign out use case
pub struct SignOutUseCase<P>
where
    P: AuthProvider,
{
    provider: Arc<P>,
}

impl<P> SignOutUseCase<P>
where
    P: AuthProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Sign out from current session
    pub async fn execute(&self, token: Option<&str>) -> Route {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => match self.provider.sign_out(token).await {
                Ok(()) => tracing::info!("User signed out"),
                Err(e) => tracing::error!(error = %e, "Provider sign out failed"),
            },
            None => tracing::debug!("Sign out without a session"),
        }

        Route::Landing
    }
}
