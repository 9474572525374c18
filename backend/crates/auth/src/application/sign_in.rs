//! Sign In Use Case
//!
//! Validates the form, delegates to the provider and classifies failures.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::classify::SignInFailure;
use crate::application::config::AuthConfig;
use crate::application::navigation::Route;
use crate::application::submission::InFlightSubmissions;
use crate::domain::form::SignInForm;
use crate::domain::provider::{AuthProvider, Flow, ProviderParams, ProviderSession};
use crate::error::{AuthError, AuthResult};

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Session issued by the provider
    pub session: ProviderSession,
    /// Remember me flag (controls cookie persistence)
    pub remember_me: bool,
    /// Where to send the user next
    pub redirect_to: Route,
}

/// Sign in use case
pub struct SignInUseCase<P>
where
    P: AuthProvider,
{
    provider: Arc<P>,
    in_flight: Arc<InFlightSubmissions>,
    config: Arc<AuthConfig>,
}

impl<P> SignInUseCase<P>
where
    P: AuthProvider,
{
    pub fn new(
        provider: Arc<P>,
        in_flight: Arc<InFlightSubmissions>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            provider,
            in_flight,
            config,
        }
    }

    pub async fn execute(&self, form: SignInForm, client: &ClientInfo) -> AuthResult<SignInOutput> {
        let credentials = form.validate().map_err(AuthError::Validation)?;

        let _submission = self
            .in_flight
            .begin(Flow::SignIn, credentials.email.as_str())?;

        let params = ProviderParams::sign_in(
            credentials.email.as_str(),
            credentials.password.expose(),
        );

        match self
            .provider
            .sign_in(&self.config.provider_name, params, client)
            .await
        {
            Ok(session) => {
                tracing::info!(
                    user_id = %session.user_id,
                    remember_me = credentials.remember_me,
                    "User signed in"
                );

                Ok(SignInOutput {
                    session,
                    remember_me: credentials.remember_me,
                    redirect_to: Route::Dashboard,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, ip = ?client.ip, "Sign in rejected by provider");

                let failure = SignInFailure::classify(&e);
                Err(AuthError::SignInFailed(failure))
            }
        }
    }
}
