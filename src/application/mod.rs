//! Application layer - Use-case command handlers.

pub mod handlers;
