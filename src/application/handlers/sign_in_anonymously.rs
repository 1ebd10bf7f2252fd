//! SignInAnonymouslyHandler - Command handler for anonymous sign-in.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Handler for signing into a fresh anonymous account.
pub struct SignInAnonymouslyHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl SignInAnonymouslyHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self) -> Result<(), AuthError> {
        match self.repository.sign_in_anonymously().await {
            Ok(()) => {
                self.events.notify(SessionEvent::SignedIn).await;
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
