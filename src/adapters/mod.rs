//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Identity provider clients and error translation
//! - `events` - Session event sinks (recording, tracing)
//! - `session` - The reconciling session repository
//! - `store` - Local session persistence (in-memory, file)

pub mod auth;
pub mod events;
pub mod session;
pub mod store;

pub use auth::{IdentityToolkitClient, IdentityToolkitConfig, MockAuthClient, StandardErrorMapper};
pub use events::{RecordingEventSink, TracingEventSink};
pub use session::ReconcilingSessionRepository;
pub use store::{FileSessionStore, InMemorySessionStore};
