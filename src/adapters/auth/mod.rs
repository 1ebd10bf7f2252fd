//! Authentication adapters.
//!
//! Implementations of the `AuthClient` and `ErrorMapper` ports:
//!
//! - `mock` - In-process implementation for tests and local development
//! - `identity_toolkit` - Google Identity Toolkit REST implementation
//! - `mapper` - Provider error code translation

mod identity_toolkit;
mod mapper;
mod mock;

pub use identity_toolkit::{IdentityToolkitClient, IdentityToolkitConfig};
pub use mapper::StandardErrorMapper;
pub use mock::MockAuthClient;
