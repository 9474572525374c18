//! Domain Layer
//!
//! Contains entities, value objects, form schemas and the ports to the
//! user table and the auth provider.

pub mod entity;
pub mod form;
pub mod provider;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use provider::{AuthProvider, ProviderError, ProviderErrorCode, ProviderSession};
pub use repository::UserRepository;
