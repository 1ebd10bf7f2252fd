//! Local session store port.
//!
//! Key-value persistence of the "current user". The store's own write
//! consistency (single writer at a time, readers never observe a torn
//! record) is a delegated guarantee of the implementation.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::foundation::{StoreError, User};

/// Observable stream of the locally cached user.
///
/// The first item is the current value (possibly `None`); a new item is
/// emitted after every `save` and `clear`.
pub type StoreWatchStream = BoxStream<'static, Result<Option<User>, StoreError>>;

/// Persistence of the current session's user record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Observes the cached user, starting with the current value.
    fn watch(&self) -> StoreWatchStream;

    /// Replaces the cached user.
    async fn save(&self, user: &User) -> Result<(), StoreError>;

    /// Removes the cached user; observers see `None`.
    async fn clear(&self) -> Result<(), StoreError>;
}
