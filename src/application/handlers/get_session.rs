//! GetSessionHandler - Observes the reconciled current user.

use std::sync::Arc;

use crate::ports::{SessionRepository, SessionStream};

/// Handler exposing the reconciled session state to consumers.
pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Returns the reconciled session stream. Dropping the stream cancels
    /// the underlying reconciliation.
    pub fn handle(&self) -> SessionStream {
        self.repository.current_user()
    }
}
