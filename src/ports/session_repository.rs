//! Session repository port.
//!
//! The single authoritative view of the current session, consumed by
//! application handlers. Implementations reconcile the local store with the
//! remote auth client and keep the two consistent.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::foundation::{AuthError, User};
use crate::domain::session::SessionState;

/// Reconciled session stream: `Loading` first, then one `Ready` per
/// reconciled value, terminated by at most one `Failed`.
pub type SessionStream = BoxStream<'static, SessionState<Option<User>>>;

/// Reconciled session state plus the session-mutating operations.
///
/// # Contract
///
/// - `current_user` emissions follow the source event order; the composite
///   ordering between local updates and remote-triggered writes is
///   eventually consistent, not strictly ordered.
/// - Mutating operations do not retry; every failure surfaces synchronously
///   as a mapped `AuthError`.
/// - Concurrent mutations are not mutually excluded; the store's own write
///   discipline is the only shared-state guarantee.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Observes the reconciled current user.
    ///
    /// Dropping the stream cancels the reconciliation and releases both
    /// upstream subscriptions.
    fn current_user(&self) -> SessionStream;

    /// Signs in with email and password and persists the resulting user.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Signs into a fresh anonymous account and persists the resulting user.
    async fn sign_in_anonymously(&self) -> Result<(), AuthError>;

    /// Registers a permanent account and persists the resulting user.
    async fn register_with_password(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Links the active anonymous session to permanent credentials.
    async fn convert_to_permanent_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError>;

    /// Updates the display name and persists the renamed user.
    async fn update_display_name(&self, name: &str) -> Result<(), AuthError>;

    /// Requests a password reset email. Leaves the local store untouched.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;

    /// Signs out remotely and clears the local store.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Deletes the account remotely and clears the local store.
    async fn delete_user(&self) -> Result<(), AuthError>;
}
