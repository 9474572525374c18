//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Display strings of the user-facing variants are the exact messages shown
//! in the form banner.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::classify::{EMAIL_IN_USE_MESSAGE, SignInFailure, SignUpFailure};
use crate::domain::form::FieldErrors;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more form fields failed validation
    #[error("Please correct the highlighted fields")]
    Validation(FieldErrors),

    /// Pre-flight check found the email already registered
    #[error("{}", EMAIL_IN_USE_MESSAGE)]
    EmailTaken,

    /// Same form already submitted and waiting on the provider
    #[error("A submission for this email is already in progress")]
    SubmissionInProgress,

    /// Provider refused a sign-in
    #[error("{}", .0.message())]
    SignInFailed(SignInFailure),

    /// Provider refused a sign-up
    #[error("{}", .0.message())]
    SignUpFailed(SignUpFailure),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::EmailTaken | AuthError::SubmissionInProgress => StatusCode::CONFLICT,
            AuthError::SignInFailed(SignInFailure::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            AuthError::SignInFailed(SignInFailure::AccountNotFound) => StatusCode::NOT_FOUND,
            AuthError::SignUpFailed(SignUpFailure::EmailInUse) => StatusCode::CONFLICT,
            AuthError::SignInFailed(SignInFailure::Unclassified)
            | AuthError::SignUpFailed(SignUpFailure::Unclassified) => StatusCode::BAD_GATEWAY,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::EmailTaken
            | AuthError::SubmissionInProgress
            | AuthError::SignUpFailed(SignUpFailure::EmailInUse) => ErrorKind::Conflict,
            AuthError::SignInFailed(SignInFailure::InvalidCredentials) => ErrorKind::Unauthorized,
            AuthError::SignInFailed(SignInFailure::AccountNotFound) => ErrorKind::NotFound,
            AuthError::SignInFailed(SignInFailure::Unclassified)
            | AuthError::SignUpFailed(SignUpFailure::Unclassified) => ErrorKind::BadGateway,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Per-field messages, when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let error = AppError::new(self.kind(), self.to_string());

        match self {
            AuthError::Validation(errors) => error.with_details(errors.to_json()),
            AuthError::EmailTaken | AuthError::SignUpFailed(SignUpFailure::EmailInUse) => {
                error.with_action("Sign in with this email instead")
            }
            // Internals stay in the logs
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Something went wrong. Please try again.")
            }
            _ => error,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::SubmissionInProgress => {
                tracing::warn!("Duplicate submission rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
