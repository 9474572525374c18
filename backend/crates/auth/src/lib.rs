//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, form schemas, repository and provider traits
//! - `application/` - Use cases and application services
//! - `infra/` - Postgres and in-memory user stores, HTTP auth provider client
//! - `presentation/` - JSON API, server-rendered pages, middleware, router
//!
//! ## Features
//! - Sign up / sign in with email + password, delegated to an external provider
//! - Local form validation with per-field messages
//! - Advisory email existence check before sign-up
//! - Provider failures classified into user-facing messages
//! - Session token carried in an HttpOnly cookie ("Remember me" makes it persistent)
//!
//! ## Security Model
//! - Passwords are never stored or hashed here; they are held in `SecretString`
//!   until handed to the provider
//! - Email uniqueness is enforced by the provider, the pre-check is a courtesy

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{HttpAuthProvider, InMemoryUserRepository, PgUserRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::form::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
