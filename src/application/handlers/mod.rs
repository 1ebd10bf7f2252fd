//! Command handlers - Application layer use cases.
//!
//! One handler per session operation. Each holds its ports as trait objects,
//! exposes a `handle` method, and reports the outcome to the injected
//! `SessionEventSink`. Failures are both reported and returned so callers
//! can branch while a UI layer renders the notification.

mod convert_account;
mod delete_account;
mod get_session;
mod register;
mod reset_password;
mod sign_in;
mod sign_in_anonymously;
mod sign_out;
mod update_display_name;

#[cfg(test)]
pub(crate) mod support;

pub use convert_account::{ConvertAccountCommand, ConvertAccountHandler};
pub use delete_account::DeleteAccountHandler;
pub use get_session::GetSessionHandler;
pub use register::{RegisterCommand, RegisterHandler};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler};
pub use sign_in::{SignInCommand, SignInHandler};
pub use sign_in_anonymously::SignInAnonymouslyHandler;
pub use sign_out::SignOutHandler;
pub use update_display_name::{UpdateDisplayNameCommand, UpdateDisplayNameHandler};
