//! Shared test doubles for handler unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, User};
use crate::domain::session::SessionState;
use crate::ports::{SessionRepository, SessionStream};

/// Scriptable `SessionRepository` that records every call it receives.
///
/// Calls are logged as `"<operation> <args>"` strings so tests can assert
/// both ordering and arguments. Any operation can be scripted to fail.
pub(crate) struct StubRepository {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, AuthError>>,
    states: Mutex<Vec<SessionState<Option<User>>>>,
}

impl StubRepository {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            states: Mutex::new(Vec::new()),
        }
    }

    /// Scripts `operation` to fail with `error`.
    pub fn with_failure(self, operation: &'static str, error: AuthError) -> Self {
        self.failures.lock().unwrap().insert(operation, error);
        self
    }

    /// Scripts the states `current_user` will emit.
    pub fn with_states(self, states: Vec<SessionState<Option<User>>>) -> Self {
        *self.states.lock().unwrap() = states;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn run(&self, operation: &'static str, detail: &str) -> Result<(), AuthError> {
        let call = if detail.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {detail}")
        };
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(operation) {
            Some(error) => Err(*error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionRepository for StubRepository {
    fn current_user(&self) -> SessionStream {
        self.calls.lock().unwrap().push("current_user".to_string());
        let states = std::mem::take(&mut *self.states.lock().unwrap());
        Box::pin(futures::stream::iter(states))
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<(), AuthError> {
        self.run("sign_in_with_password", email)
    }

    async fn sign_in_anonymously(&self) -> Result<(), AuthError> {
        self.run("sign_in_anonymously", "")
    }

    async fn register_with_password(&self, email: &str, _password: &str) -> Result<(), AuthError> {
        self.run("register_with_password", email)
    }

    async fn convert_to_permanent_account(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<(), AuthError> {
        self.run("convert_to_permanent_account", email)
    }

    async fn update_display_name(&self, name: &str) -> Result<(), AuthError> {
        self.run("update_display_name", name)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.run("reset_password", email)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.run("sign_out", "")
    }

    async fn delete_user(&self) -> Result<(), AuthError> {
        self.run("delete_user", "")
    }
}
