//! SignOutHandler - Ends the current session.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Handler for explicit sign-out.
pub struct SignOutHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl SignOutHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self) -> Result<(), AuthError> {
        match self.repository.sign_out().await {
            Ok(()) => {
                self.events.notify(SessionEvent::SignedOut).await;
                Ok(())
            }
            Err(error) => {
                self.events
                    .notify(SessionEvent::OperationFailed { error })
                    .await;
                Err(error)
            }
        }
    }
}
