//! User Entity
//!
//! Account record created by the auth provider. The portal only reads it.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, UserId};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identity issued by the provider
    pub user_id: UserId,
    /// Optional display name
    pub name: Option<String>,
    /// Unique lookup key
    pub email: Email,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identity
    pub fn new(name: Option<String>, email: Email) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            created_at: Utc::now(),
        }
    }

    /// Name for greetings, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_name() {
        let user = User::new(Some("Alice".into()), Email::from_db("a@x.io"));
        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User::new(None, Email::from_db("a@x.io"));
        assert_eq!(user.display_name(), "a@x.io");

        let blank = User::new(Some("  ".into()), Email::from_db("b@x.io"));
        assert_eq!(blank.display_name(), "b@x.io");
    }
}
