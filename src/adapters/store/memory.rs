//! In-memory session store.
//!
//! Holds the cached user in a `tokio::sync::watch` channel, which gives the
//! store its delegated guarantees for free: writes replace the value
//! atomically and observers never see a torn record. Used in tests and in
//! hosts that don't want on-disk persistence.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::foundation::{StoreError, User};
use crate::ports::{SessionStore, StoreWatchStream};

/// Session store backed by a watch channel.
pub struct InMemorySessionStore {
    state: watch::Sender<Option<User>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// Creates a store pre-populated with a user.
    pub fn with_user(user: User) -> Self {
        let (state, _) = watch::channel(Some(user));
        Self { state }
    }

    /// Returns the currently cached user (test helper).
    pub fn current(&self) -> Option<User> {
        self.state.borrow().clone()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn watch(&self) -> StoreWatchStream {
        // The current value is captured at subscription time so the first
        // emission cannot be overtaken by a concurrent write.
        let mut rx = self.state.subscribe();
        let initial = rx.borrow_and_update().clone();
        Box::pin(futures::stream::unfold(
            (rx, Some(initial)),
            |(mut rx, pending)| async move {
                if let Some(value) = pending {
                    return Some((Ok(value), (rx, None)));
                }
                match rx.changed().await {
                    Ok(()) => {
                        let value = rx.borrow_and_update().clone();
                        Some((Ok(value), (rx, None)))
                    }
                    Err(_) => None,
                }
            },
        ))
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.state.send_replace(Some(user.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.state.send_replace(None);
        Ok(())
    }
}
