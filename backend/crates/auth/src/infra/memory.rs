//! In-memory user repository
//!
//! Backs tests and database-less development runs. Lookups can be made to
//! fail so a broken database can be simulated.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
    emails: RwLock<HashSet<String>>,
    fail_lookups: AtomicBool,
    email_lookups: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a user; emails are unique
    pub async fn insert(&self, user: User) -> AuthResult<()> {
        let mut emails = self.emails.write().await;
        if !emails.insert(user.email.as_str().to_string()) {
            return Err(AuthError::Internal(format!(
                "duplicate email in user store: {}",
                user.email
            )));
        }

        self.users.write().await.insert(user.user_id, user);
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }

    /// Make existence lookups fail with a database-style error
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Number of existence lookups served so far
    pub fn email_lookups(&self) -> usize {
        self.email_lookups.load(Ordering::SeqCst)
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        self.email_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AuthError::Database(sqlx::Error::PoolTimedOut));
        }

        Ok(self.emails.read().await.contains(email))
    }
}
