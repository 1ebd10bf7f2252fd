//! Remote auth client port.
//!
//! Abstracts the hosted identity backend: credential operations plus a
//! push-based auth-state stream. Adapters translate vendor failures through
//! the `ErrorMapper` port **before** returning, so every error crossing this
//! boundary already carries a domain taxonomy tag.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::foundation::{AuthError, User};

/// Push-based stream of remote session changes.
///
/// Starts with the backend's current value (`None` when signed out) and
/// re-emits on every remote authentication event. An `Err` item reflects a
/// listener failure; consumers treat it as terminal.
pub type AuthStateStream = BoxStream<'static, Result<Option<User>, AuthError>>;

/// Operations against the hosted identity backend.
///
/// # Contract
///
/// Implementations must:
/// - Map every vendor failure to an `AuthError` at this boundary
/// - Return `AuthError::UserNotFound` from `link_with_password`,
///   `update_display_name`, and `delete_current_user` when no session is
///   active
/// - Apply the domain defaults when building `User` values: missing display
///   name becomes `"Anonymous"`, missing email becomes the empty string
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Subscribes to remote authentication state changes.
    ///
    /// Each subscription independently observes the current value first.
    /// Dropping the stream releases the underlying listener.
    fn auth_state(&self) -> AuthStateStream;

    /// Signs in with email and password, returning the authenticated user.
    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<User, AuthError>;

    /// Creates and signs into an anonymous account.
    async fn sign_in_anonymously(&self) -> Result<User, AuthError>;

    /// Registers a new permanent account and signs into it.
    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Links the active (anonymous) session to permanent credentials.
    ///
    /// Requires an active session; fails with `UserNotFound` otherwise.
    async fn link_with_password(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Updates the display name of the active session's user.
    ///
    /// Requires an active session; fails with `UserNotFound` otherwise.
    async fn update_display_name(&self, name: &str) -> Result<User, AuthError>;

    /// Requests a password reset email for the given address.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;

    /// Ends the active session on the backend.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Permanently deletes the active session's account.
    ///
    /// Requires an active session; fails with `UserNotFound` otherwise.
    async fn delete_current_user(&self) -> Result<(), AuthError>;
}
