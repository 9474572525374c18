//! Submission tracking
//!
//! One submission per (flow, email) may be in flight. A second submit for the
//! same key is refused until the first one finishes.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::provider::Flow;
use crate::error::{AuthError, AuthResult};

/// Registry of submissions currently talking to the provider
#[derive(Debug, Default)]
pub struct InFlightSubmissions {
    keys: Mutex<HashSet<String>>,
}

impl InFlightSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the key for `email`, or fail if it is already claimed
    pub fn begin(self: &Arc<Self>, flow: Flow, email: &str) -> AuthResult<Submission> {
        let key = Self::key(flow, email);

        if !self.lock().insert(key.clone()) {
            tracing::debug!(%flow, "Submission already in flight");
            return Err(AuthError::SubmissionInProgress);
        }

        Ok(Submission {
            registry: Arc::clone(self),
            key,
        })
    }

    fn key(flow: Flow, email: &str) -> String {
        format!("{flow}:{}", email.to_lowercase())
    }

    // A panic while holding the lock leaves the set itself intact.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A claimed submission; the key is released on drop
#[derive(Debug)]
pub struct Submission {
    registry: Arc<InFlightSubmissions>,
    key: String,
}

impl Drop for Submission {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.key);
    }
}
