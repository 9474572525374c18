//! Email Value Object
//!
//! Represents a syntactically valid email address.
//! The address is kept exactly as entered: lookups against the user table
//! are exact-match, so no case folding or trimming happens here.

use kernel::error::app_error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

// `local@domain.tld` with no whitespace and a single `@` on each side
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Message shown next to the email field
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(AppError::bad_request(INVALID_EMAIL_MESSAGE));
        }

        Ok(Self(email))
    }

    /// Whether `email` would be accepted by [`Email::new`]
    pub fn is_valid(email: &str) -> bool {
        email.len() <= EMAIL_MAX_LENGTH && EMAIL_REGEX.is_match(email)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
