//! ConvertAccountHandler - Links an anonymous session to credentials.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Command to convert the active anonymous account into a permanent one.
#[derive(Debug, Clone)]
pub struct ConvertAccountCommand {
    pub email: String,
    pub password: String,
}

/// Handler for anonymous-to-permanent account conversion.
pub struct ConvertAccountHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl ConvertAccountHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self, cmd: ConvertAccountCommand) -> Result<(), AuthError> {
        match self
            .repository
            .convert_to_permanent_account(&cmd.email, &cmd.password)
            .await
        {
            Ok(()) => {
                self.events.notify(SessionEvent::AccountLinked).await;
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

    fn command() -> ConvertAccountCommand {
        ConvertAccountCommand {
            email: "j@x.com".to_string(),
            password: "pw123456".to_string(),
        }
    }

    #[tokio::test]
    async fn notifies_account_linked_on_success() {
        let repo = Arc::new(StubRepository::new());
        let events = Arc::new(RecordingEventSink::new());
        let handler = ConvertAccountHandler::new(repo.clone(), events.clone());

        handler.handle(command()).await.unwrap();

        assert_eq!(repo.calls(), vec!["convert_to_permanent_account j@x.com"]);
        assert_eq!(events.events(), vec![SessionEvent::AccountLinked]);
    }

    #[tokio::test]
    async fn reports_conversion_failures() {
        let repo = Arc::new(StubRepository::new().with_failure(
            "convert_to_permanent_account",
            AuthError::AccountConversionFailed,
        ));
        let events = Arc::new(RecordingEventSink::new());
        let handler = ConvertAccountHandler::new(repo, events.clone());

        let result = handler.handle(command()).await;

        assert_eq!(result, Err(AuthError::AccountConversionFailed));
        assert!(events.saw_failure());
    }
}
