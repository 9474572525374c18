//! Sign Up Use Case
//!
//! Validates the form, re-runs the email existence check for the submitted
//! address, then delegates account creation to the provider.
//!
//! The existence check is advisory: two sign-ups for the same email can both
//! pass it. The provider's "already exists" answer is what settles the race,
//! and it is classified into the same user-facing message.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::check_email_exists::CheckEmailExistsUseCase;
use crate::application::classify::SignUpFailure;
use crate::application::config::AuthConfig;
use crate::application::navigation::Route;
use crate::application::submission::InFlightSubmissions;
use crate::domain::form::SignUpForm;
use crate::domain::provider::{AuthProvider, Flow, ProviderParams, ProviderSession};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    /// Session issued by the provider for the new account
    pub session: ProviderSession,
    /// Where to send the user next
    pub redirect_to: Route,
}

/// Sign up use case
pub struct SignUpUseCase<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider,
{
    email_check: CheckEmailExistsUseCase<R>,
    provider: Arc<P>,
    in_flight: Arc<InFlightSubmissions>,
    config: Arc<AuthConfig>,
}

impl<R, P> SignUpUseCase<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider,
{
    pub fn new(
        user_repo: Arc<R>,
        provider: Arc<P>,
        in_flight: Arc<InFlightSubmissions>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            email_check: CheckEmailExistsUseCase::new(user_repo),
            provider,
            in_flight,
            config,
        }
    }

    pub async fn execute(&self, form: SignUpForm, client: &ClientInfo) -> AuthResult<SignUpOutput> {
        let details = form.validate().map_err(AuthError::Validation)?;

        match self.email_check.execute(Some(details.email.as_str())).await {
            Ok(Some(true)) => {
                tracing::info!(email_domain = %details.email.domain(), "Sign up refused, email already registered");
                return Err(AuthError::EmailTaken);
            }
            Ok(_) => {}
            // The provider still enforces uniqueness
            Err(e) => {
                tracing::warn!(error = %e, "Email check unavailable, leaving uniqueness to the provider");
            }
        }

        let _submission = self.in_flight.begin(Flow::SignUp, details.email.as_str())?;

        let params = ProviderParams::sign_up(
            details.name.as_str(),
            details.email.as_str(),
            details.password.expose(),
        );

        match self
            .provider
            .sign_in(&self.config.provider_name, params, client)
            .await
        {
            Ok(session) => {
                tracing::info!(user_id = %session.user_id, "User signed up");

                Ok(SignUpOutput {
                    session,
                    redirect_to: Route::Dashboard,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, ip = ?client.ip, "Sign up rejected by provider");

                let failure = SignUpFailure::classify(&e);
                Err(AuthError::SignUpFailed(failure))
            }
        }
    }
}
