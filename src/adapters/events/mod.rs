//! Session event sink adapters.
//!
//! Implementations of the `SessionEventSink` port:
//!
//! - `recording` - In-memory log for tests and polling UIs
//! - `tracing` - Structured log output for headless deployments

mod recording;
mod tracing;

pub use self::tracing::TracingEventSink;
pub use recording::RecordingEventSink;
