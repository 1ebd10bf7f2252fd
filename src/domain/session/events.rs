//! User-visible session events.
//!
//! Handlers report outcomes through the `SessionEventSink` port instead of
//! reaching into ambient notification providers. Each event carries the
//! message a UI layer would render as a transient notification.

use crate::domain::foundation::AuthError;

/// Outcome of a session-mutating operation, as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A sign-in (password or anonymous) completed.
    SignedIn,

    /// The registration composite completed, including the display name step.
    Registered,

    /// An anonymous account was linked to permanent credentials.
    AccountLinked,

    /// A password reset email was requested.
    PasswordResetSent { email: String },

    /// The display name of the current user changed.
    DisplayNameUpdated,

    /// The current session ended by explicit sign-out.
    SignedOut,

    /// The account was deleted.
    AccountDeleted,

    /// An operation failed with a mapped error.
    OperationFailed { error: AuthError },
}

impl SessionEvent {
    /// Human-readable notification text for this event.
    pub fn message(&self) -> String {
        match self {
            SessionEvent::SignedIn => "Signed in".to_string(),
            SessionEvent::Registered => "Account created".to_string(),
            SessionEvent::AccountLinked => "Account linked".to_string(),
            SessionEvent::PasswordResetSent { email } => {
                format!("Password reset email sent to {email}")
            }
            SessionEvent::DisplayNameUpdated => "Display name updated".to_string(),
            SessionEvent::SignedOut => "Signed out".to_string(),
            SessionEvent::AccountDeleted => "Account deleted".to_string(),
            SessionEvent::OperationFailed { error } => error.to_string(),
        }
    }

    /// Returns true for failure events.
    pub fn is_failure(&self) -> bool {
        matches!(self, SessionEvent::OperationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_reset_message_names_the_email() {
        let event = SessionEvent::PasswordResetSent {
            email: "j@x.com".to_string(),
        };
        assert_eq!(event.message(), "Password reset email sent to j@x.com");
    }

    #[test]
    fn failure_message_is_the_error_text() {
        let event = SessionEvent::OperationFailed {
            error: AuthError::InvalidCredentials,
        };
        assert_eq!(event.message(), "Invalid credentials");
        assert!(event.is_failure());
    }

    #[test]
    fn non_failure_events_are_not_failures() {
        assert!(!SessionEvent::SignedIn.is_failure());
        assert!(!SessionEvent::SignedOut.is_failure());
        assert!(!SessionEvent::AccountDeleted.is_failure());
    }
}
