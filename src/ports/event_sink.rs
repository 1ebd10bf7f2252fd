//! Session event sink port.
//!
//! Handlers report user-visible outcomes through this injected interface
//! rather than a process-global notification provider. A UI layer renders
//! each event as a transient notification.

use async_trait::async_trait;

use crate::domain::session::SessionEvent;

/// Receives user-visible session outcomes.
#[async_trait]
pub trait SessionEventSink: Send + Sync {
    /// Delivers one outcome event. Delivery failures are the sink's own
    /// concern; handlers do not fail an operation over a lost notification.
    async fn notify(&self, event: SessionEvent);
}
