//! Identity Toolkit REST adapter.
//!
//! Implements the `AuthClient` port against a Google Identity
//! Toolkit-compatible HTTP API (the protocol behind Firebase
//! Authentication). Operations map onto the `accounts:*` endpoints:
//!
//! - `accounts:signInWithPassword` - password sign-in
//! - `accounts:signUp` - registration (with credentials) and anonymous
//!   sign-in (without)
//! - `accounts:update` - display-name updates and credential linking
//! - `accounts:sendOobCode` - password reset emails
//! - `accounts:delete` - account deletion
//!
//! The REST protocol has no push listener, so the adapter maintains its own
//! auth-state channel, updated after every successful session-changing
//! call. API failures are parsed into `ProviderError` and translated by the
//! injected `ErrorMapper` before leaving this boundary.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::foundation::{AuthError, ProviderError, User};
use crate::ports::{AuthClient, AuthStateStream, ErrorMapper};

const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Identity Toolkit adapter.
#[derive(Debug, Clone)]
pub struct IdentityToolkitConfig {
    /// API base URL; override for emulators or self-hosted gateways.
    pub endpoint: String,

    /// Web API key appended to every request.
    pub api_key: SecretString,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl IdentityToolkitConfig {
    /// Creates a configuration for the hosted endpoint.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, operation: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.endpoint.trim_end_matches('/'),
            operation,
            self.api_key.expose_secret()
        )
    }
}

/// Tokens and identity of the adapter's active session.
#[derive(Clone)]
struct SessionTokens {
    id_token: SecretString,
    user: User,
}

/// `AuthClient` over the Identity Toolkit REST API.
pub struct IdentityToolkitClient {
    config: IdentityToolkitConfig,
    http: reqwest::Client,
    mapper: Arc<dyn ErrorMapper>,
    session: RwLock<Option<SessionTokens>>,
    state: watch::Sender<Result<Option<User>, AuthError>>,
}

impl IdentityToolkitClient {
    /// Creates a client; fails only if the HTTP client cannot be built.
    pub fn new(
        config: IdentityToolkitConfig,
        mapper: Arc<dyn ErrorMapper>,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                tracing::error!("failed to build HTTP client: {err}");
                AuthError::Generic
            })?;
        let (state, _) = watch::channel(Ok(None));
        Ok(Self {
            config,
            http,
            mapper,
            session: RwLock::new(None),
            state,
        })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: &impl Serialize,
    ) -> Result<T, AuthError> {
        let url = self.config.url(operation);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_transport(err))?;

        if response.status().is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| self.map_transport(err));
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let failure = parse_api_error(status.as_u16(), &text);
        tracing::warn!(
            operation,
            status = status.as_u16(),
            code = failure.code().unwrap_or("-"),
            "identity toolkit call failed"
        );
        Err(self.mapper.map(&failure))
    }

    fn map_transport(&self, err: reqwest::Error) -> AuthError {
        tracing::warn!("identity toolkit transport failure: {err}");
        self.mapper.map(&ProviderError::network(err.to_string()))
    }

    fn begin_session(&self, id_token: Option<String>, user: User) {
        let mut session = self.session.write().expect("session lock poisoned");
        let id_token = id_token
            .map(SecretString::from)
            .or_else(|| session.as_ref().map(|s| s.id_token.clone()));
        if let Some(id_token) = id_token {
            *session = Some(SessionTokens {
                id_token,
                user: user.clone(),
            });
        }
        drop(session);
        self.state.send_replace(Ok(Some(user)));
    }

    fn end_session(&self) {
        *self.session.write().expect("session lock poisoned") = None;
        self.state.send_replace(Ok(None));
    }

    fn active_session(&self) -> Result<SessionTokens, AuthError> {
        self.session
            .read()
            .expect("session lock poisoned")
            .clone()
            .ok_or(AuthError::UserNotFound)
    }
}

#[async_trait]
impl AuthClient for IdentityToolkitClient {
    fn auth_state(&self) -> AuthStateStream {
        let mut rx = self.state.subscribe();
        let initial = rx.borrow_and_update().clone();
        Box::pin(futures::stream::unfold(
            (rx, Some(initial)),
            |(mut rx, pending)| async move {
                if let Some(value) = pending {
                    return Some((value, (rx, None)));
                }
                match rx.changed().await {
                    Ok(()) => {
                        let value = rx.borrow_and_update().clone();
                        Some((value, (rx, None)))
                    }
                    Err(_) => None,
                }
            },
        ))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let response: AccountResponse = self
            .post(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let user = response.to_user(false);
        self.begin_session(response.id_token, user.clone());
        Ok(user)
    }

    async fn sign_in_anonymously(&self) -> Result<User, AuthError> {
        let response: AccountResponse = self
            .post(
                "signUp",
                &AnonymousRequest {
                    return_secure_token: true,
                },
            )
            .await?;
        let user = response.to_user(true);
        self.begin_session(response.id_token, user.clone());
        Ok(user)
    }

    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let response: AccountResponse = self
            .post(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let user = response.to_user(false);
        self.begin_session(response.id_token, user.clone());
        Ok(user)
    }

    async fn link_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let session = self.active_session()?;
        let response: AccountResponse = self
            .post(
                "update",
                &UpdateRequest {
                    id_token: session.id_token.expose_secret(),
                    email: Some(email),
                    password: Some(password),
                    display_name: None,
                    return_secure_token: true,
                },
            )
            .await?;
        // The update response may omit fields that didn't change; fall back
        // to the session's previous identity.
        let user = User::new(
            response.local_id.unwrap_or(session.user.id),
            response.display_name.unwrap_or(session.user.name),
            response.email.unwrap_or_else(|| email.to_string()),
            false,
        );
        self.begin_session(response.id_token, user.clone());
        Ok(user)
    }

    async fn update_display_name(&self, name: &str) -> Result<User, AuthError> {
        let session = self.active_session()?;
        let response: AccountResponse = self
            .post(
                "update",
                &UpdateRequest {
                    id_token: session.id_token.expose_secret(),
                    email: None,
                    password: None,
                    display_name: Some(name),
                    return_secure_token: false,
                },
            )
            .await?;
        let user = User::new(
            response.local_id.unwrap_or(session.user.id),
            response.display_name.unwrap_or_else(|| name.to_string()),
            response.email.unwrap_or(session.user.email),
            session.user.is_anonymous,
        );
        self.begin_session(response.id_token, user.clone());
        Ok(user)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = self
            .post(
                "sendOobCode",
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // The REST protocol is stateless server-side; discarding the tokens
        // ends the session.
        self.end_session();
        Ok(())
    }

    async fn delete_current_user(&self) -> Result<(), AuthError> {
        let session = self.active_session()?;
        let _: serde_json::Value = self
            .post(
                "delete",
                &DeleteRequest {
                    id_token: session.id_token.expose_secret(),
                },
            )
            .await?;
        self.end_session();
        Ok(())
    }
}

// === Wire types ===

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnonymousRequest {
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    #[serde(default)]
    local_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

impl AccountResponse {
    fn to_user(&self, is_anonymous: bool) -> User {
        User::from_claims(
            self.local_id.clone().unwrap_or_default(),
            self.display_name.clone(),
            self.email.clone(),
            is_anonymous,
        )
    }
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Parses an error response body into a `ProviderError`.
///
/// The API reports machine-readable codes in `error.message`; bodies that
/// don't parse get a synthetic `HTTP_<status>` code so the mapper still
/// sees a total input.
fn parse_api_error(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            ProviderError::api(envelope.error.message, format!("HTTP {status}"))
        }
        _ => ProviderError::api(format!("HTTP_{status}"), body.chars().take(200).collect::<String>()),
    }
}
