//! Session domain - the reconciled view of the current user.

mod events;
mod state;

pub use events::SessionEvent;
pub use state::SessionState;
