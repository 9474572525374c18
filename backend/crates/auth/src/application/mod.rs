//! Application Layer
//!
//! Use cases and application services.

pub mod check_email_exists;
pub mod check_session;
pub mod classify;
pub mod config;
pub mod get_current_user;
pub mod navigation;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod submission;

// Re-exports
pub use check_email_exists::CheckEmailExistsUseCase;
pub use check_session::{CheckSessionUseCase, SessionIdentity};
pub use classify::{SignInFailure, SignUpFailure};
pub use config::AuthConfig;
pub use get_current_user::GetCurrentUserUseCase;
pub use navigation::Route;
pub use sign_in::{SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpOutput, SignUpUseCase};
pub use submission::{InFlightSubmissions, Submission};
