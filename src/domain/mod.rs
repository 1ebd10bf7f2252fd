//! Domain layer - pure types with no external collaborator dependencies.

pub mod foundation;
pub mod session;
