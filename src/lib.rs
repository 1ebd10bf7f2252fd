//! Authkeep - Backend-Agnostic Authentication Session Library
//!
//! This crate reconciles a locally cached user with a remote identity
//! provider's auth-state stream, and exposes session-mutating operations
//! (sign-in, registration, account linking, password reset, sign-out,
//! deletion) behind hexagonal ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
