//! Mock auth client for testing.
//!
//! Implements the `AuthClient` port against an in-memory account table,
//! avoiding the need for a hosted identity backend. Behaves like a real
//! backend: accounts collide on email, short passwords are rejected, and
//! session-requiring operations fail with `UserNotFound` when signed out.
//!
//! # Example
//!
//! ```ignore
//! use authkeep::adapters::auth::MockAuthClient;
//!
//! let client = MockAuthClient::new()
//!     .with_password_user("jane@example.com", "pw123456", "Jane");
//!
//! let user = client.sign_in_with_password("jane@example.com", "pw123456").await?;
//! assert_eq!(user.name, "Jane");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, User};
use crate::ports::{AuthClient, AuthStateStream};

/// Minimum accepted password length, mirroring common backend policy.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
struct Account {
    password: String,
    user: User,
}

/// In-memory auth client for testing.
pub struct MockAuthClient {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<User>>,
    state: watch::Sender<Result<Option<User>, AuthError>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockAuthClient {
    /// Creates a client with no accounts and no active session.
    pub fn new() -> Self {
        let (state, _) = watch::channel(Ok(None));
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            state,
            force_error: RwLock::new(None),
        }
    }

    /// Seeds a permanent account that can sign in with the given password.
    pub fn with_password_user(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let email = email.into();
        let user = User::new(Uuid::new_v4().to_string(), name, email.clone(), false);
        self.accounts.write().unwrap().insert(
            email,
            Account {
                password: password.into(),
                user,
            },
        );
        self
    }

    /// Forces all operations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Pushes a remote auth-state change, as a backend listener would.
    pub fn push_state(&self, user: Option<User>) {
        *self.current.write().unwrap() = user.clone();
        self.state.send_replace(Ok(user));
    }

    /// Fails the auth-state stream for current and future subscribers.
    pub fn fail_state(&self, error: AuthError) {
        self.state.send_replace(Err(error));
    }

    /// The active session's user, if any (test helper).
    pub fn current_user(&self) -> Option<User> {
        self.current.read().unwrap().clone()
    }

    fn check_forced_error(&self) -> Result<(), AuthError> {
        match *self.force_error.read().unwrap() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn set_session(&self, user: User) {
        *self.current.write().unwrap() = Some(user.clone());
        self.state.send_replace(Ok(Some(user)));
    }

    fn end_session(&self) {
        *self.current.write().unwrap() = None;
        self.state.send_replace(Ok(None));
    }

    fn active_user(&self) -> Result<User, AuthError> {
        self.current
            .read()
            .unwrap()
            .clone()
            .ok_or(AuthError::UserNotFound)
    }
}

impl Default for MockAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClient for MockAuthClient {
    fn auth_state(&self) -> AuthStateStream {
        let mut rx = self.state.subscribe();
        let initial = rx.borrow_and_update().clone();
        Box::pin(futures::stream::unfold(
            (rx, Some(initial)),
            |(mut rx, pending)| async move {
                if let Some(value) = pending {
                    return Some((value, (rx, None)));
                }
                match rx.changed().await {
                    Ok(()) => {
                        let value = rx.borrow_and_update().clone();
                        Some((value, (rx, None)))
                    }
                    Err(_) => None,
                }
            },
        ))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.check_forced_error()?;
        let account = self
            .accounts
            .read()
            .unwrap()
            .get(email)
            .cloned()
            .ok_or(AuthError::UserNotFound)?;
        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        self.set_session(account.user.clone());
        Ok(account.user)
    }

    async fn sign_in_anonymously(&self) -> Result<User, AuthError> {
        self.check_forced_error()?;
        let user = User::from_claims(Uuid::new_v4().to_string(), None, None, true);
        self.set_session(user.clone());
        Ok(user)
    }

    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.check_forced_error()?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::EmailAlreadyInUse);
        }
        // A fresh registration has no display name yet.
        let user = User::from_claims(
            Uuid::new_v4().to_string(),
            None,
            Some(email.to_string()),
            false,
        );
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        drop(accounts);
        self.set_session(user.clone());
        Ok(user)
    }

    async fn link_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.check_forced_error()?;
        let anonymous = self.active_user()?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::EmailAlreadyInUse);
        }
        let linked = User {
            email: email.to_string(),
            is_anonymous: false,
            ..anonymous
        };
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: linked.clone(),
            },
        );
        drop(accounts);
        self.set_session(linked.clone());
        Ok(linked)
    }

    async fn update_display_name(&self, name: &str) -> Result<User, AuthError> {
        self.check_forced_error()?;
        let user = self.active_user()?;
        let renamed = user.with_name(name);
        if !renamed.email.is_empty() {
            if let Some(account) = self.accounts.write().unwrap().get_mut(&renamed.email) {
                account.user = renamed.clone();
            }
        }
        self.set_session(renamed.clone());
        Ok(renamed)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.check_forced_error()?;
        if !self.accounts.read().unwrap().contains_key(email) {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.check_forced_error()?;
        self.end_session();
        Ok(())
    }

    async fn delete_current_user(&self) -> Result<(), AuthError> {
        self.check_forced_error()?;
        let user = self.active_user()?;
        if !user.email.is_empty() {
            self.accounts.write().unwrap().remove(&user.email);
        }
        self.end_session();
        Ok(())
    }
}
