//! Password Value Object
//!
//! The portal never hashes or stores passwords. It only checks the length
//! rule and hands the secret to the auth provider.

use kernel::error::app_error::{AppError, AppResult};
use secrecy::{ExposeSecret, SecretString};

/// Minimum password length, in UTF-16 code units
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "Password must be at least 8 characters";

/// Password accepted by the length rule
pub struct Password(SecretString);

impl Password {
    pub fn new(secret: SecretString) -> AppResult<Self> {
        Self::check(&secret)?;
        Ok(Self(secret))
    }

    /// Run the length rule without taking ownership
    pub fn check(secret: &SecretString) -> AppResult<()> {
        if secret.expose_secret().encode_utf16().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::bad_request(PASSWORD_TOO_SHORT_MESSAGE));
        }
        Ok(())
    }

    /// Raw value for the provider request body
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Compare two secrets without exposing either outside this module
pub fn secrets_match(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret() == b.expose_secret()
}
