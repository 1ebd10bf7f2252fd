//! Standard provider error mapping.
//!
//! Translates identity-toolkit style error codes into the domain taxonomy.
//! Backends append detail after the code ("WEAK_PASSWORD : Password should
//! be at least 6 characters"), so matching happens on the leading token.

use crate::domain::foundation::{AuthError, ProviderError};
use crate::ports::ErrorMapper;

/// Total mapping from provider failures to `AuthError` tags.
///
/// Unrecognized codes fall through to `AuthError::Generic`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardErrorMapper;

impl StandardErrorMapper {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorMapper for StandardErrorMapper {
    fn map(&self, failure: &ProviderError) -> AuthError {
        let code = match failure {
            ProviderError::Network(_) => return AuthError::NoInternetConnection,
            ProviderError::Api { code, .. } => normalize(code),
        };

        match code {
            "EMAIL_EXISTS" | "CREDENTIAL_ALREADY_IN_USE" => AuthError::EmailAlreadyInUse,
            "WEAK_PASSWORD" => AuthError::WeakPassword,
            "INVALID_PASSWORD" | "INVALID_EMAIL" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_CREDENTIAL" => AuthError::InvalidCredentials,
            "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" | "USER_DELETED" => AuthError::UserNotFound,
            "ADMIN_ONLY_OPERATION" => AuthError::AnonymousSignInFailed,
            "FEDERATED_USER_ID_ALREADY_LINKED" | "PROVIDER_ALREADY_LINKED" => {
                AuthError::AccountConversionFailed
            }
            _ => AuthError::Generic,
        }
    }
}

/// Strips trailing detail from a backend code: everything from the first
/// space or colon onward.
fn normalize(code: &str) -> &str {
    code.split([' ', ':']).next().unwrap_or(code).trim()
}
