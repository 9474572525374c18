//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! The user table is written by the auth provider; the portal only reads it.

use crate::domain::entity::user::User;
use crate::domain::value_object::UserId;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Check if a user with exactly this email exists
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;
}
