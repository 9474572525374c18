//! Form schemas
//!
//! Validation is local and synchronous. A form that fails here never
//! reaches the database or the auth provider.

pub mod field_errors;
pub mod sign_in;
pub mod sign_up;

pub use field_errors::{FieldErrors, FormField};
pub use sign_in::{SignInCredentials, SignInForm};
pub use sign_up::{SignUpDetails, SignUpForm};
