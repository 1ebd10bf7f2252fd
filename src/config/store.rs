//! Session store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Local session persistence configuration
///
/// With no path configured the application runs on the in-memory store and
/// the session does not survive a restart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// File the current session is persisted to
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidStorePath);
            }
        }
        Ok(())
    }

    /// True when a persistent store is configured
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }
}
