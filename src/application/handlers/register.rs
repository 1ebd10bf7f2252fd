//! RegisterHandler - Command handler for account registration.
//!
//! Registration is a two-step composite: create the account, then set the
//! chosen display name on it. The steps are not atomic. A display-name
//! failure after a successful registration leaves the account registered
//! under the provider's default name and surfaces the second step's error;
//! there is no rollback.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Command to register a permanent account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handler for the registration composite.
pub struct RegisterHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl RegisterHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<(), AuthError> {
        if let Err(error) = self
            .repository
            .register_with_password(&cmd.email, &cmd.password)
            .await
        {
            self.events
                .notify(SessionEvent::OperationFailed { error })
                .await;
            return Err(error);
        }

        if let Err(error) = self.repository.update_display_name(&cmd.name).await {
            self.events
                .notify(SessionEvent::OperationFailed { error })
                .await;
            return Err(error);
        }

        self.events.notify(SessionEvent::Registered).await;
        Ok(())
    }
}
