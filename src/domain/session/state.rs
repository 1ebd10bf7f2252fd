//! The tagged result wrapper emitted by session queries.

use crate::domain::foundation::AuthError;

/// State of an in-flight or settled session query.
///
/// The reconciliation stream emits this as `SessionState<Option<User>>`:
/// `Loading` on subscription, `Ready` per reconciled value (`None` means
/// signed-out), and a single terminal `Failed`. Mutating operations use
/// plain `Result<(), AuthError>` instead, since `Loading` does not apply
/// to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState<T> {
    /// The query has started but no value is available yet.
    Loading,

    /// A reconciled value.
    Ready(T),

    /// The stream terminated with a mapped failure; no auto-resume.
    Failed(AuthError),
}

impl<T> SessionState<T> {
    /// Returns the contained value, if any.
    pub fn ready(self) -> Option<T> {
        match self {
            SessionState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for the `Loading` state.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// Returns the failure, if the query failed.
    pub fn failure(&self) -> Option<AuthError> {
        match self {
            SessionState::Failed(err) => Some(*err),
            _ => None,
        }
    }

    /// Maps the contained value, preserving `Loading` and `Failed`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SessionState<U> {
        match self {
            SessionState::Loading => SessionState::Loading,
            SessionState::Ready(value) => SessionState::Ready(f(value)),
            SessionState::Failed(err) => SessionState::Failed(err),
        }
    }
}
