//! Session reconciliation adapter.

mod repository;

pub use repository::ReconcilingSessionRepository;
