//! Error mapper port.

use crate::domain::foundation::{AuthError, ProviderError};

/// Translates raw backend failures into the domain taxonomy.
///
/// Must be total: every input maps to some `AuthError`, with
/// `AuthError::Generic` as the default for unrecognized failures. Mapping
/// happens once, at the adapter boundary; repository logic never sees an
/// unmapped error.
pub trait ErrorMapper: Send + Sync {
    /// Maps a provider failure to its domain error tag.
    fn map(&self, failure: &ProviderError) -> AuthError;
}
