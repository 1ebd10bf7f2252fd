//! In-memory recording event sink.
//!
//! Collects every delivered event for later inspection. Used by tests and
//! useful while wiring a UI layer that polls for pending notifications.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::session::SessionEvent;
use crate::ports::SessionEventSink;

/// `SessionEventSink` that stores events in delivery order.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events delivered so far.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Removes and returns all recorded events.
    pub fn drain(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.lock().expect("event log poisoned"))
    }

    /// True when any failure event was delivered.
    pub fn saw_failure(&self) -> bool {
        self.events
            .lock()
            .expect("event log poisoned")
            .iter()
            .any(SessionEvent::is_failure)
    }
}

#[async_trait]
impl SessionEventSink for RecordingEventSink {
    async fn notify(&self, event: SessionEvent) {
        self.events.lock().expect("event log poisoned").push(event);
    }
}
