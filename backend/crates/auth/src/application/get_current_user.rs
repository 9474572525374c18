//! Get Current User Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::AuthResult;

/// Get current user use case
pub struct GetCurrentUserUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> GetCurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// The caller's record, `None` when unauthenticated or not yet stored
    pub async fn execute(&self, identity: Option<&UserId>) -> AuthResult<Option<User>> {
        let Some(user_id) = identity else {
            return Ok(None);
        };

        let user = self.user_repo.find_by_id(user_id).await?;
        if user.is_none() {
            tracing::debug!(user_id = %user_id, "Identity has no user record");
        }
        Ok(user)
    }
}
