//! UpdateDisplayNameHandler - Renames the current user.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Command to change the current user's display name.
#[derive(Debug, Clone)]
pub struct UpdateDisplayNameCommand {
    pub name: String,
}

/// Handler for display-name updates.
pub struct UpdateDisplayNameHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl UpdateDisplayNameHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self, cmd: UpdateDisplayNameCommand) -> Result<(), AuthError> {
        match self.repository.update_display_name(&cmd.name).await {
            Ok(()) => {
                self.events.notify(SessionEvent::DisplayNameUpdated).await;
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
