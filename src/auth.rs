//! Authentication support for the Flickr reflection client
//!
//! Signed calls need an API key and a shared secret. Calls that need a login
//! also carry a session token, which is obtained through the frob handshake:
//!
//! 1. **Frob** - `flickr.auth.getFrob` issues a short-lived identifier
//! 2. **Authorization** - the user opens the authorization URL built from the
//!    frob and grants read access
//! 3. **Token** - `flickr.auth.getToken` exchanges the approved frob for a
//!    long-lived session token
//!
//! Both the frob and the token are kept in the [`CredentialStore`], so the
//! handshake only happens once per persisted cache. When the token exchange is
//! rejected because the user has not approved the frob yet, the call fails
//! with [`Error::ManualAuthorizationRequired`] carrying the URL to open.
//!
//! # Example
//!
//! ```
//! use flickr_reflect::Credentials;
//!
//! let creds = Credentials::new("my-api-key").with_secret("my-shared-secret");
//! assert!(creds.can_sign());
//! // the secret never shows up in debug output
//! assert!(!format!("{:?}", creds).contains("my-shared-secret"));
//! ```

use crate::cache::{CredentialStore, SecretName};
use crate::client::RequestExecutor;
use crate::endpoints::{METHOD_GET_FROB, METHOD_GET_TOKEN};
use crate::errors::{Error, Result};
use crate::models::content_at;
use crate::signing::sign;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Permission requested in the authorization URL
pub const REQUESTED_PERMS: &str = "read";

/// API credentials
///
/// The API key is required. Without a shared secret only unsigned calls are
/// possible.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    shared_secret: Option<SecretString>,
}

impl Credentials {
    /// Credentials with an API key and no shared secret
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            shared_secret: None,
        }
    }

    /// Add the shared secret used for signing
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.shared_secret = Some(SecretString::new(secret.into()));
        self
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The shared secret, if configured
    pub fn shared_secret(&self) -> Option<&SecretString> {
        self.shared_secret.as_ref()
    }

    /// Whether signed calls are possible
    pub fn can_sign(&self) -> bool {
        self.shared_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("shared_secret", &self.shared_secret.as_ref().map(|_| "****"))
            .finish()
    }
}

/// Progress of the session handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing obtained yet
    Unauthenticated,
    /// A frob is available
    HaveFrob,
    /// A session token is available
    HaveToken,
    /// A call carrying the session token succeeded
    Authorized,
    /// The user has to approve the frob in a browser
    NeedsManualAuthorization,
}

/// Frob/token state machine
pub(crate) struct AuthFlow {
    store: CredentialStore,
    state: Mutex<AuthState>,
    exchange: tokio::sync::Mutex<()>,
}

impl fmt::Debug for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthFlow")
            .field("state", &self.state())
            .field("store", &self.store)
            .finish()
    }
}

impl AuthFlow {
    pub(crate) fn new(store: CredentialStore) -> Self {
        Self {
            store,
            state: Mutex::new(AuthState::Unauthenticated),
            exchange: tokio::sync::Mutex::new(()),
        }
    }

    pub(crate) fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub(crate) fn state(&self) -> AuthState {
        *self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub(crate) fn set_state(&self, state: AuthState) {
        let mut current = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if *current != state {
            debug!("Auth state {:?} -> {:?}", *current, state);
            *current = state;
        }
    }

    /// Cached frob, or a fresh one from the server
    pub(crate) async fn get_frob(&self, exec: &RequestExecutor) -> Result<SecretString> {
        if let Some(frob) = self.store.read(SecretName::Frob).await? {
            self.set_state(AuthState::HaveFrob);
            return Ok(frob);
        }

        debug!("Requesting a new frob");
        let body = exec.call(METHOD_GET_FROB, true, Vec::new()).await?;
        let frob = SecretString::new(content_at(&body, &["frob"])?);
        self.persist(SecretName::Frob, frob.clone()).await;
        self.set_state(AuthState::HaveFrob);
        Ok(frob)
    }

    /// Cached token, or the result of exchanging `frob`
    ///
    /// A rejected exchange turns into [`Error::ManualAuthorizationRequired`].
    pub(crate) async fn get_token(
        &self,
        exec: &RequestExecutor,
        frob: &SecretString,
    ) -> Result<SecretString> {
        if let Some(token) = self.store.read(SecretName::Token).await? {
            self.set_state(AuthState::HaveToken);
            return Ok(token);
        }

        debug!("Exchanging frob for a session token");
        let params = vec![("frob".to_string(), frob.expose_secret().clone())];
        let body = match exec.call(METHOD_GET_TOKEN, true, params).await {
            Ok(body) => body,
            Err(e @ Error::Api { .. }) => {
                warn!("Token exchange rejected: {}", e);
                self.set_state(AuthState::NeedsManualAuthorization);
                let url = authorization_url(exec, frob)?;
                return Err(Error::ManualAuthorizationRequired { url });
            }
            Err(e) => return Err(e),
        };

        let token = SecretString::new(content_at(&body, &["auth", "token"])?);
        self.persist(SecretName::Token, token.clone()).await;
        self.set_state(AuthState::HaveToken);
        Ok(token)
    }

    /// Resolve the session token for a call
    ///
    /// When `required` is false this is a best-effort lookup of a cached token
    /// and never fails. When `required` is true the full handshake runs unless
    /// a token is already cached.
    pub(crate) async fn authenticate(
        &self,
        exec: &RequestExecutor,
        required: bool,
    ) -> Result<Option<SecretString>> {
        if !required {
            return match self.store.read(SecretName::Token).await {
                Ok(token) => Ok(token),
                Err(e) => {
                    debug!("Ignoring unreadable token for an anonymous call: {}", e);
                    Ok(None)
                }
            };
        }

        if !exec.credentials().can_sign() {
            return Err(Error::MissingSharedSecret);
        }

        // one handshake at a time; later callers find the cached token
        let _guard = self.exchange.lock().await;
        if let Some(token) = self.store.read(SecretName::Token).await? {
            if self.state() == AuthState::Unauthenticated {
                self.set_state(AuthState::HaveToken);
            }
            return Ok(Some(token));
        }

        let frob = self.get_frob(exec).await?;
        let token = self.get_token(exec, &frob).await?;
        Ok(Some(token))
    }

    /// Store a secret; a persistence failure only costs the next process a
    /// new handshake, so it is logged and not returned
    async fn persist(&self, name: SecretName, value: SecretString) {
        if let Err(e) = self.store.write(name, value).await {
            warn!("Keeping {} in memory only: {}", name, e);
        }
    }
}

/// Browser URL that lets the user approve `frob`
///
/// The signature covers `api_key`, `perms` and `frob` joined without `=`.
pub(crate) fn authorization_url(exec: &RequestExecutor, frob: &SecretString) -> Result<String> {
    let creds = exec.credentials();
    let secret = creds.shared_secret().ok_or(Error::MissingSharedSecret)?;
    let mut pairs = vec![
        ("api_key".to_string(), creds.api_key().to_string()),
        ("perms".to_string(), REQUESTED_PERMS.to_string()),
        ("frob".to_string(), frob.expose_secret().clone()),
    ];
    let sig = sign(secret.expose_secret(), pairs.iter().map(|(k, v)| (k, v)));
    pairs.push(("api_sig".to_string(), sig));
    Ok(exec.endpoints().authorize(&pairs))
}
