//! Provider failure classification
//!
//! Structured codes are checked first. Providers that only send text fall
//! back to substring matching on the lower-cased message.

use crate::domain::provider::{ProviderError, ProviderErrorCode};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password. Please try again.";
pub const ACCOUNT_NOT_FOUND_MESSAGE: &str = "No account found with this email.";
pub const SIGN_IN_FAILED_MESSAGE: &str = "Failed to sign in. Please try again.";
pub const EMAIL_IN_USE_MESSAGE: &str = "This email is already in use. Please sign in instead.";
pub const SIGN_UP_FAILED_MESSAGE: &str = "Failed to create account. Please try again.";

/// Why a sign-in was refused, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFailure {
    InvalidCredentials,
    AccountNotFound,
    Unclassified,
}

impl SignInFailure {
    pub fn classify(error: &ProviderError) -> Self {
        match error.code() {
            Some(ProviderErrorCode::InvalidCredentials) => return Self::InvalidCredentials,
            Some(ProviderErrorCode::AccountNotFound) => return Self::AccountNotFound,
            _ => {}
        }

        if let ProviderError::Unavailable(_) = error {
            return Self::Unclassified;
        }

        let message = error.message().to_lowercase();
        if message.contains("invalidsecret")
            || message.contains("invalid credentials")
            || message.contains("password")
        {
            Self::InvalidCredentials
        } else if message.contains("account") && message.contains("not found") {
            Self::AccountNotFound
        } else {
            Self::Unclassified
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SignInFailure::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            SignInFailure::AccountNotFound => ACCOUNT_NOT_FOUND_MESSAGE,
            SignInFailure::Unclassified => SIGN_IN_FAILED_MESSAGE,
        }
    }
}

/// Why a sign-up was refused, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFailure {
    EmailInUse,
    Unclassified,
}

impl SignUpFailure {
    pub fn classify(error: &ProviderError) -> Self {
        if error.code() == Some(ProviderErrorCode::AccountExists) {
            return Self::EmailInUse;
        }

        match error {
            ProviderError::Rejected { message, .. }
                if message.to_lowercase().contains("already exists") =>
            {
                Self::EmailInUse
            }
            _ => Self::Unclassified,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SignUpFailure::EmailInUse => EMAIL_IN_USE_MESSAGE,
            SignUpFailure::Unclassified => SIGN_UP_FAILED_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(message: &str) -> ProviderError {
        ProviderError::rejected(400, None, message)
    }

    fn coded(code: ProviderErrorCode, message: &str) -> ProviderError {
        ProviderError::rejected(400, Some(code), message)
    }

    #[test]
    fn test_sign_in_message_heuristics() {
        assert_eq!(
            SignInFailure::classify(&text("InvalidSecret")),
            SignInFailure::InvalidCredentials
        );
        assert_eq!(
            SignInFailure::classify(&text("Invalid credentials supplied")),
            SignInFailure::InvalidCredentials
        );
        assert_eq!(
            SignInFailure::classify(&text("Wrong PASSWORD")),
            SignInFailure::InvalidCredentials
        );
        assert_eq!(
            SignInFailure::classify(&text("Account xyz not found")),
            SignInFailure::AccountNotFound
        );
        assert_eq!(
            SignInFailure::classify(&text("Server exploded")),
            SignInFailure::Unclassified
        );
    }

    #[test]
    fn test_sign_in_credentials_rule_checked_first() {
        // Mentions both "password" and "account not found"
        let error = text("Account not found for password login");
        assert_eq!(
            SignInFailure::classify(&error),
            SignInFailure::InvalidCredentials
        );
    }

    #[test]
    fn test_sign_in_codes_win_over_message() {
        let error = coded(ProviderErrorCode::AccountNotFound, "bad password");
        assert_eq!(SignInFailure::classify(&error), SignInFailure::AccountNotFound);

        let error = coded(ProviderErrorCode::InvalidCredentials, "");
        assert_eq!(
            SignInFailure::classify(&error),
            SignInFailure::InvalidCredentials
        );
    }

    #[test]
    fn test_sign_in_unavailable_is_generic() {
        let error = ProviderError::Unavailable("password service connection refused".into());
        assert_eq!(SignInFailure::classify(&error), SignInFailure::Unclassified);
        assert_eq!(
            SignInFailure::classify(&error).message(),
            SIGN_IN_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_sign_up_classification() {
        assert_eq!(
            SignUpFailure::classify(&text("Account user@x.io already exists")),
            SignUpFailure::EmailInUse
        );
        assert_eq!(
            SignUpFailure::classify(&coded(ProviderErrorCode::AccountExists, "conflict")),
            SignUpFailure::EmailInUse
        );
        assert_eq!(
            SignUpFailure::classify(&text("weak password")),
            SignUpFailure::Unclassified
        );
        assert_eq!(SignUpFailure::Unclassified.message(), SIGN_UP_FAILED_MESSAGE);
    }
}
