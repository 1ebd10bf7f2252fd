//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `AuthClient` - Remote identity backend (sign-in, registration, linking)
//! - `SessionStore` - Local persistence of the current user
//! - `SessionRepository` - Reconciled session view consumed by handlers
//! - `ErrorMapper` - Translates raw backend failures into the domain taxonomy
//! - `SessionEventSink` - Notification sink for user-visible outcomes

mod auth_client;
mod error_mapper;
mod event_sink;
mod session_repository;
mod session_store;

pub use auth_client::{AuthClient, AuthStateStream};
pub use error_mapper::ErrorMapper;
pub use event_sink::SessionEventSink;
pub use session_repository::{SessionRepository, SessionStream};
pub use session_store::{SessionStore, StoreWatchStream};
