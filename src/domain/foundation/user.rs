//! The user identity record.
//!
//! This is a **domain type** with no provider dependencies. Any identity
//! backend can populate it via the `AuthClient` port. A `User` is never
//! mutated in place - a "change" is always a full replacement flowing
//! through the session repository.

use serde::{Deserialize, Serialize};

/// Fallback display name applied at the adapter boundary when the backend
/// reports no name (e.g. anonymous accounts).
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Immutable identity record for the current session.
///
/// Equality is structural; two users with the same fields are the same user.
/// Anonymous accounts carry an empty `email` and `is_anonymous = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque stable identifier assigned by the identity backend.
    pub id: String,

    /// Display name; `"Anonymous"` when the backend reports none.
    pub name: String,

    /// Email address; empty string for accounts without one.
    pub email: String,

    /// Whether this is an anonymous (not yet linked) account.
    pub is_anonymous: bool,
}

impl User {
    /// Creates a new user record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        is_anonymous: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_anonymous,
        }
    }

    /// Builds a user from optional backend claims, applying the domain
    /// defaults: missing name becomes `"Anonymous"`, missing email becomes
    /// the empty string.
    pub fn from_claims(
        id: impl Into<String>,
        name: Option<String>,
        email: Option<String>,
        is_anonymous: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string()),
            email: email.unwrap_or_default(),
            is_anonymous,
        }
    }

    /// Returns a copy of this user with a different display name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
