//! File-backed session store.
//!
//! Persists the cached user as a JSON document. Writes go through a
//! temporary file followed by a rename, so a reader never observes a torn
//! record, and a process crash mid-write leaves the previous record intact.
//! A watch channel mirrors the on-disk state for `watch()` subscribers;
//! the single-writer discipline is enforced with an internal mutex.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};

use crate::domain::foundation::{StoreError, User};
use crate::ports::{SessionStore, StoreWatchStream};

/// Session store persisting the current user to a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    state: watch::Sender<Option<User>>,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Opens the store, loading the persisted user if the file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let initial = read_record(&path).await?;
        let (state, _) = watch::channel(initial);
        Ok(Self {
            path,
            state,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the currently cached user.
    pub fn current(&self) -> Option<User> {
        self.state.borrow().clone()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn read_record(path: &Path) -> Result<Option<User>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    fn watch(&self) -> StoreWatchStream {
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
        let _guard = self.write_lock.lock().await;
        let bytes = serde_json::to_vec(user)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        self.state.send_replace(Some(user.clone()));
        tracing::debug!(path = %self.path.display(), "session record saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        self.state.send_replace(None);
        tracing::debug!(path = %self.path.display(), "session record cleared");
        Ok(())
    }
}
