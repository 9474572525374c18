//! Auth Provider Port
//!
//! Credential storage, password hashing and token issuance live in an
//! external provider. The portal only sees this interface.

use kernel::id::UserId;
use platform::client::ClientInfo;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which path the provider should take for a password request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum Flow {
    #[display("signIn")]
    SignIn,
    #[display("signUp")]
    SignUp,
}

/// Parameters sent with a password sign-in/sign-up
#[derive(Clone, Serialize)]
pub struct ProviderParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub password: &'a str,
    pub flow: Flow,
}

impl<'a> ProviderParams<'a> {
    pub fn sign_in(email: &'a str, password: &'a str) -> Self {
        Self {
            name: None,
            email,
            password,
            flow: Flow::SignIn,
        }
    }

    pub fn sign_up(name: &'a str, email: &'a str, password: &'a str) -> Self {
        Self {
            name: Some(name),
            email,
            password,
            flow: Flow::SignUp,
        }
    }
}

impl std::fmt::Debug for ProviderParams<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderParams")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("flow", &self.flow)
            .finish()
    }
}

/// Session handed back by the provider
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub token: String,
    pub user_id: UserId,
}

impl std::fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSession")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Machine-readable failure codes a provider may attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorCode {
    InvalidCredentials,
    AccountNotFound,
    AccountExists,
    #[serde(other)]
    Unknown,
}

/// Provider failure as seen by the portal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider answered and refused the request
    #[error("provider rejected request ({status}): {message}")]
    Rejected {
        status: u16,
        code: Option<ProviderErrorCode>,
        message: String,
    },

    /// The provider could not be reached or answered with garbage
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn rejected(status: u16, code: Option<ProviderErrorCode>, message: impl Into<String>) -> Self {
        ProviderError::Rejected {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<ProviderErrorCode> {
        match self {
            ProviderError::Rejected { code, .. } => *code,
            ProviderError::Unavailable(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProviderError::Rejected { message, .. } => message,
            ProviderError::Unavailable(message) => message,
        }
    }
}

/// External auth provider
#[trait_variant::make(AuthProvider: Send)]
pub trait LocalAuthProvider {
    /// Run a password sign-in or sign-up (selected by `params.flow`)
    async fn sign_in(
        &self,
        provider: &str,
        params: ProviderParams<'_>,
        client: &ClientInfo,
    ) -> Result<ProviderSession, ProviderError>;

    /// Invalidate a session token
    async fn sign_out(&self, token: &str) -> Result<(), ProviderError>;

    /// Identity behind a token, `None` when the session is gone
    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_wire_shape() {
        let sign_in = serde_json::to_value(ProviderParams::sign_in("a@b.co", "pw123456")).unwrap();
        assert_eq!(
            sign_in,
            json!({ "email": "a@b.co", "password": "pw123456", "flow": "signIn" })
        );

        let sign_up =
            serde_json::to_value(ProviderParams::sign_up("Al", "a@b.co", "pw123456")).unwrap();
        assert_eq!(sign_up["flow"], "signUp");
        assert_eq!(sign_up["name"], "Al");
    }

    #[test]
    fn test_params_debug_redacts_password() {
        let debug = format!("{:?}", ProviderParams::sign_in("a@b.co", "topsecret1"));
        assert!(!debug.contains("topsecret1"));
    }

    #[test]
    fn test_unknown_codes_deserialize() {
        let code: ProviderErrorCode = serde_json::from_value(json!("rate_limited")).unwrap();
        assert_eq!(code, ProviderErrorCode::Unknown);

        let code: ProviderErrorCode = serde_json::from_value(json!("account_exists")).unwrap();
        assert_eq!(code, ProviderErrorCode::AccountExists);
    }

    #[test]
    fn test_flow_display() {
        assert_eq!(Flow::SignIn.to_string(), "signIn");
        assert_eq!(Flow::SignUp.to_string(), "signUp");
    }
}
