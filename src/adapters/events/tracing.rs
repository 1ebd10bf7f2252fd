//! Tracing-backed event sink.

use async_trait::async_trait;

use crate::domain::session::SessionEvent;
use crate::ports::SessionEventSink;

/// `SessionEventSink` that emits each event as a structured log record.
///
/// Suitable for headless deployments where no UI consumes notifications.
/// Failure events log at `warn`, everything else at `info`.
#[derive(Debug, Default, Clone)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionEventSink for TracingEventSink {
    async fn notify(&self, event: SessionEvent) {
        let message = event.message();
        if event.is_failure() {
            tracing::warn!(event = ?event, "{message}");
        } else {
            tracing::info!(event = ?event, "{message}");
        }
    }
}
