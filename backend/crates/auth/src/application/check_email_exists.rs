//! Check Email Exists Use Case
//!
//! Advisory lookup used by the sign-up form. The provider stays the
//! authority on uniqueness.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Check email exists use case
pub struct CheckEmailExistsUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> CheckEmailExistsUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// `None` when there is nothing to check (no query is made)
    pub async fn execute(&self, email: Option<&str>) -> AuthResult<Option<bool>> {
        let Some(email) = email.filter(|e| !e.is_empty()) else {
            tracing::trace!("Email check skipped");
            return Ok(None);
        };

        let exists = self.user_repo.exists_by_email(email).await?;
        Ok(Some(exists))
    }
}
