//! DeleteAccountHandler - Deletes the current account.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Handler for account deletion.
pub struct DeleteAccountHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl DeleteAccountHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self) -> Result<(), AuthError> {
        match self.repository.delete_user().await {
            Ok(()) => {
                self.events.notify(SessionEvent::AccountDeleted).await;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::RecordingEventSink;
    use crate::application::handlers::support::StubRepository;

    #[tokio::test]
    async fn notifies_account_deleted_on_success() {
        let repo = Arc::new(StubRepository::new());
        let events = Arc::new(RecordingEventSink::new());
        let handler = DeleteAccountHandler::new(repo.clone(), events.clone());

        handler.handle().await.unwrap();

        assert_eq!(repo.calls(), vec!["delete_user"]);
        assert_eq!(events.events(), vec![SessionEvent::AccountDeleted]);
    }

    #[tokio::test]
    async fn reports_deletion_failures() {
        let repo =
            Arc::new(StubRepository::new().with_failure("delete_user", AuthError::UserNotFound));
        let events = Arc::new(RecordingEventSink::new());
        let handler = DeleteAccountHandler::new(repo, events.clone());

        assert_eq!(handler.handle().await, Err(AuthError::UserNotFound));
        assert!(events.saw_failure());
    }
}
