//! Test doubles shared by the unit and router tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::provider::{AuthProvider, Flow, ProviderError, ProviderParams, ProviderSession};
use crate::domain::value_object::{Email, UserId};
use crate::infra::memory::InMemoryUserRepository;
use crate::presentation::handlers::AuthContext;

/// Provider that keeps accounts in an [`InMemoryUserRepository`]
///
/// Rejections use the plain-text messages a password provider typically
/// sends, so the message heuristics get exercised.
#[derive(Default)]
pub struct FakeProvider {
    users: Arc<InMemoryUserRepository>,
    passwords: Mutex<HashMap<String, (UserId, String)>>,
    sessions: Mutex<HashMap<String, UserId>>,
    fail_next: Mutex<Option<ProviderError>>,
    last_flow: Mutex<Option<Flow>>,
    calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Arc<InMemoryUserRepository> {
        Arc::clone(&self.users)
    }

    /// Number of provider calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_flow(&self) -> Option<Flow> {
        *lock(&self.last_flow)
    }

    /// Fail the next call with `error`
    pub fn fail_next(&self, error: ProviderError) {
        *lock(&self.fail_next) = Some(error);
    }

    pub async fn has_account(&self, email: &str) -> bool {
        self.users.find_by_email(email).await.is_some()
    }

    pub fn has_session(&self, token: &str) -> bool {
        lock(&self.sessions).contains_key(token)
    }

    /// Create an account directly, bypassing the call counter
    pub async fn seed_account(&self, name: &str, email: &str, password: &str) -> UserId {
        let user = User::new(Some(name.to_string()), Email::from_db(email));
        let user_id = user.user_id;
        self.users.insert(user).await.unwrap();
        lock(&self.passwords).insert(email.to_string(), (user_id, password.to_string()));
        user_id
    }

    /// Create an account and a live session for it
    pub async fn seed_session(&self, email: &str) -> (UserId, String) {
        let user_id = self.seed_account("Seeded User", email, "password123").await;
        (user_id, self.issue(user_id))
    }

    fn issue(&self, user_id: UserId) -> String {
        let token = format!("tok-{}", uuid::Uuid::new_v4());
        lock(&self.sessions).insert(token.clone(), user_id);
        token
    }

    fn begin_call(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.fail_next).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AuthProvider for FakeProvider {
    async fn sign_in(
        &self,
        _provider: &str,
        params: ProviderParams<'_>,
        _client: &ClientInfo,
    ) -> Result<ProviderSession, ProviderError> {
        *lock(&self.last_flow) = Some(params.flow);
        self.begin_call()?;

        let known = lock(&self.passwords).get(params.email).cloned();

        let user_id = match params.flow {
            Flow::SignIn => match known {
                None => {
                    return Err(ProviderError::rejected(
                        400,
                        None,
                        format!("Account {} not found", params.email),
                    ));
                }
                Some((_, password)) if password != params.password => {
                    return Err(ProviderError::rejected(400, None, "InvalidSecret"));
                }
                Some((user_id, _)) => user_id,
            },
            Flow::SignUp => {
                if known.is_some() {
                    return Err(ProviderError::rejected(
                        400,
                        None,
                        format!("Account {} already exists", params.email),
                    ));
                }
                self.seed_account(params.name.unwrap_or_default(), params.email, params.password)
                    .await
            }
        };

        Ok(ProviderSession {
            token: self.issue(user_id),
            user_id,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), ProviderError> {
        self.begin_call()?;
        lock(&self.sessions).remove(token);
        Ok(())
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, ProviderError> {
        self.begin_call()?;
        Ok(lock(&self.sessions).get(token).copied())
    }
}

/// Router state over the fake provider and its user store
pub fn test_context() -> (AuthContext<InMemoryUserRepository, FakeProvider>, Arc<FakeProvider>) {
    let provider = Arc::new(FakeProvider::new());
    let context = AuthContext::new(
        provider.users(),
        Arc::clone(&provider),
        Arc::new(AuthConfig::development()),
    );
    (context, provider)
}
