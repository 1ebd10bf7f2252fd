//! Error types for the domain layer.
//!
//! `AuthError` is the closed taxonomy surfaced to callers; raw backend
//! failures are represented as `ProviderError` and always pass through the
//! `ErrorMapper` port before crossing into repository logic.

use thiserror::Error;

/// Closed taxonomy of authentication failures.
///
/// Every error reaching a repository caller carries one of these tags.
/// All variants are recoverable by caller retry; none is process-fatal.
/// The display text is the human-readable message for transient
/// notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Password too weak")]
    WeakPassword,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No internet connection")]
    NoInternetConnection,

    #[error("Anonymous sign-in failed")]
    AnonymousSignInFailed,

    #[error("User not found")]
    UserNotFound,

    #[error("Account conversion failed")]
    AccountConversionFailed,

    /// Catch-all for backend failures with no more specific tag.
    #[error("Authentication failed")]
    Generic,
}

impl AuthError {
    /// Returns true when retrying with different credentials could help.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::WeakPassword | AuthError::EmailAlreadyInUse
        )
    }

    /// Returns true for failures that may succeed on plain retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::NoInternetConnection)
    }
}

/// Raw failure reported by an identity backend, before mapping.
///
/// REST backends surface machine-readable error codes (`EMAIL_EXISTS`,
/// `WEAK_PASSWORD : ...`); transport faults have no code at all. The
/// `ErrorMapper` port translates either shape into an `AuthError`.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The backend answered with an API-level error code.
    #[error("Provider error {code}: {message}")]
    Api { code: String, message: String },

    /// The backend could not be reached at all.
    #[error("Provider unreachable: {0}")]
    Network(String),
}

impl ProviderError {
    /// Creates an API-level provider error.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a transport-level provider error.
    pub fn network(message: impl Into<String>) -> Self {
        ProviderError::Network(message.into())
    }

    /// The machine-readable error code, if the backend supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Api { code, .. } => Some(code),
            ProviderError::Network(_) => None,
        }
    }
}

/// Failures raised by the local session store.
///
/// The store is a delegated collaborator; these never leak past the
/// repository, which reports them through the `AuthError` taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session record could not be encoded or decoded: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session store is closed")]
    Closed,
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        tracing::warn!("session store failure: {err}");
        AuthError::Generic
    }
}
