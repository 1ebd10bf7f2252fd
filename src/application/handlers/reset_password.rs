//! ResetPasswordHandler - Requests a password reset email.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionEventSink, SessionRepository};

/// Command to send a password reset email.
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub email: String,
}

/// Handler for password reset requests. Does not touch the session.
pub struct ResetPasswordHandler {
    repository: Arc<dyn SessionRepository>,
    events: Arc<dyn SessionEventSink>,
}

impl ResetPasswordHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, events: Arc<dyn SessionEventSink>) -> Self {
        Self { repository, events }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), AuthError> {
        match self.repository.reset_password(&cmd.email).await {
            Ok(()) => {
                self.events
                    .notify(SessionEvent::PasswordResetSent { email: cmd.email })
                    .await;
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
