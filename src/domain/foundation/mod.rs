//! Foundation types shared across the domain layer.

mod errors;
mod user;

pub use errors::{AuthError, ProviderError, StoreError};
pub use user::User;
