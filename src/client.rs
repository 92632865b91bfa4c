//! Flickr Client Implementation
//!
//! This module contains the `Client` struct that issues calls against the
//! Flickr REST endpoint.
//!
//! # Architecture
//!
//! - **HTTP Layer**: Built on `reqwest`; every call is a GET with the
//!   parameters in the query string
//! - **Signing**: `api_sig` is an MD5 digest over the shared secret and the
//!   sorted parameters, see [`sign`](crate::sign)
//! - **Authentication**: calls that need a login carry the session token
//!   obtained through the frob handshake
//! - **Retry Logic**: transport failures are retried with exponential backoff;
//!   failure envelopes from the server never are
//! - **Telemetry**: Optional OpenTelemetry integration for observability
//!
//! # Examples
//!
//! ```no_run
//! use flickr_reflect::{CallOptions, ClientBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new("your-api-key")
//!     .shared_secret("your-secret")
//!     .build()?;
//!
//! let echo = client
//!     .invoke("flickr.test.echo", false, false, CallOptions::new().param("foo", "bar"))
//!     .await?;
//! println!("{}", echo);
//! # Ok(())
//! # }
//! ```

use crate::{
    auth::{self, AuthFlow, AuthState, Credentials},
    cache::{CacheStats, CredentialStore, SecretName},
    config::ClientConfig,
    endpoints::Endpoints,
    errors::{Error, Result},
    method::MethodBinding,
    models::{CallOptions, MethodDescriptor, FORCE_SIGN_KEY},
    signing::sign,
    telemetry::{self, Metrics},
    util::{generate_request_id, redact_token},
};

use backoff::{future::retry_notify, ExponentialBackoff};
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

const USER_AGENT_PREFIX: &str = "flickr-reflect-rust";

/// Parameters added to every call, in emission order
const STANDARD_KEYS: [&str; 4] = ["format", "api_key", "nojsoncallback", "method"];

/// Builds, sends and decodes single REST calls
pub(crate) struct RequestExecutor {
    http: HttpClient,
    endpoints: Endpoints,
    credentials: Credentials,
    retries: u32,
    metrics: Arc<Metrics>,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("endpoints", &self.endpoints)
            .field("credentials", &self.credentials)
            .field("retries", &self.retries)
            .finish()
    }
}

impl RequestExecutor {
    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Build the call URL
    ///
    /// Caller parameters come first, then `format`, `api_key`,
    /// `nojsoncallback` and `method`, then `api_sig` when signing. A caller
    /// parameter named like a standard one is dropped.
    pub(crate) fn build_url(
        &self,
        method: &str,
        sign_required: bool,
        params: Vec<(String, String)>,
    ) -> Result<String> {
        let mut pairs: Vec<(String, String)> = params
            .into_iter()
            .filter(|(k, _)| {
                let reserved = STANDARD_KEYS.contains(&k.as_str()) || k == "api_sig";
                if reserved {
                    warn!("Dropping caller parameter {:?} on {}", k, method);
                }
                !reserved
            })
            .collect();

        pairs.push(("format".to_string(), "json".to_string()));
        pairs.push(("api_key".to_string(), self.credentials.api_key().to_string()));
        pairs.push(("nojsoncallback".to_string(), "1".to_string()));
        pairs.push(("method".to_string(), method.to_string()));

        if sign_required {
            let secret = self
                .credentials
                .shared_secret()
                .filter(|s| !s.expose_secret().is_empty())
                .ok_or(Error::MissingSharedSecret)?;
            let sig = sign(secret.expose_secret(), pairs.iter().map(|(k, v)| (k, v)));
            pairs.push(("api_sig".to_string(), sig));
        }

        Ok(self.endpoints.rest(&pairs))
    }

    /// Send a call and return the decoded body of a `stat: ok` response
    pub(crate) async fn execute(&self, url: &str) -> Result<Value> {
        let attempt = AtomicU32::new(0);
        let max_retries = self.retries;

        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(100),
            randomization_factor: 0.3,
            multiplier: 2.0,
            max_interval: Duration::from_secs(10),
            max_elapsed_time: None,
            ..Default::default()
        };
        backoff.max_elapsed_time = if max_retries > 0 {
            Some(Duration::from_secs(60))
        } else {
            Some(Duration::from_millis(0))
        };

        retry_notify(
            backoff,
            || async {
                let current = attempt.load(Ordering::Relaxed);
                match self.execute_once(url).await {
                    Ok(body) => Ok(body),
                    Err(e) if e.is_retryable() && current < max_retries => {
                        Err(backoff::Error::transient(e))
                    }
                    Err(e) => Err(backoff::Error::Permanent(e)),
                }
            },
            |err, dur| {
                let count = attempt.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("Retry {} after {:?} due to: {}", count, dur, err);
            },
        )
        .await
    }

    async fn execute_once(&self, url: &str) -> Result<Value> {
        let request_id = generate_request_id();
        trace!("GET {} ({})", redact_token(url), request_id);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "*/*")
            .header("X-Request-ID", &request_id)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(Error::Http {
                    status: status.as_u16(),
                    message: excerpt(&text, status),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let stat = body.get("stat").and_then(Value::as_str).map(str::to_string);
        match (stat.as_deref(), status.is_success()) {
            (Some("ok"), true) => Ok(body),
            (Some("ok") | None, false) => Err(Error::Http {
                status: status.as_u16(),
                message: excerpt(&text, status),
            }),
            (None, true) => Err(Error::Deserialize(
                "response envelope has no stat field".to_string(),
            )),
            (Some(_), _) => Err(Error::Api {
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
                code: error_code(body.get("code")),
                url: redact_token(url),
            }),
        }
    }

    /// Build and execute in one step, without touching credentials
    pub(crate) async fn call(
        &self,
        method: &str,
        sign_required: bool,
        params: Vec<(String, String)>,
    ) -> Result<Value> {
        let url = self.build_url(method, sign_required, params)?;
        self.execute(&url).await
    }
}

fn error_code(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn excerpt(text: &str, status: reqwest::StatusCode) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("HTTP error")
            .to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

/// Flickr API client
///
/// Cheap to clone; clones share the HTTP connection pool, the credential
/// cache and the authentication state.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    executor: RequestExecutor,
    auth: AuthFlow,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("rest_url", &self.inner.config.rest_url)
            .field("credentials", &self.inner.config.credentials)
            .field("apis", &self.inner.config.apis)
            .field("auth_state", &self.auth_state())
            .finish()
    }
}

impl Client {
    /// Create a new client with the given configuration
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let user_agent = if let Some(suffix) = &config.user_agent_suffix {
            format!("{}/{} {}", USER_AGENT_PREFIX, crate::VERSION, suffix)
        } else {
            format!("{}/{}", USER_AGENT_PREFIX, crate::VERSION)
        };

        let http = HttpClient::builder()
            .user_agent(user_agent)
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let metrics = telemetry::metrics_for(&config.telemetry_config);
        let store = match &config.persistence {
            Some(persistence) => CredentialStore::new(persistence.clone()),
            None => CredentialStore::with_dir(&config.cache_dir),
        }
        .with_metrics(metrics.clone());

        let executor = RequestExecutor {
            http,
            endpoints: Endpoints::new(&config.rest_url, &config.auth_url),
            credentials: config.credentials.clone(),
            retries: config.retries,
            metrics,
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                auth: AuthFlow::new(store),
                executor,
                config,
            }),
        })
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// API credentials
    pub fn credentials(&self) -> &Credentials {
        &self.inner.config.credentials
    }

    /// Statistics of the in-memory credential cache
    pub fn cache_stats(&self) -> &CacheStats {
        self.inner.auth.store().stats()
    }

    /// Current state of the session handshake
    pub fn auth_state(&self) -> AuthState {
        self.inner.auth.state()
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.inner.executor.metrics
    }

    /// Forget the cached frob and token, in memory and on disk
    ///
    /// The next call that needs a login starts a new handshake.
    pub async fn clear_credentials(&self) -> Result<()> {
        self.inner.auth.store().clear().await?;
        self.inner.auth.set_state(AuthState::Unauthenticated);
        Ok(())
    }

    /// Read a cached credential without starting a handshake
    pub async fn cached_credential(&self, name: SecretName) -> Result<Option<SecretString>> {
        self.inner.auth.store().read(name).await
    }

    /// Build the URL for a call
    ///
    /// # Example
    ///
    /// ```
    /// use flickr_reflect::ClientBuilder;
    ///
    /// let client = ClientBuilder::new("abc").shared_secret("s3cr3t").build().unwrap();
    /// let url = client
    ///     .build_url("flickr.test.echo", true, vec![("foo".into(), "bar".into())])
    ///     .unwrap();
    /// assert!(url.contains("?foo=bar&format=json&api_key=abc&nojsoncallback=1"));
    /// assert!(url.contains("&api_sig="));
    /// ```
    pub fn build_url(
        &self,
        method: &str,
        sign_required: bool,
        params: Vec<(String, String)>,
    ) -> Result<String> {
        self.inner.executor.build_url(method, sign_required, params)
    }

    /// Send a prepared URL and decode the response envelope
    pub async fn execute(&self, url: &str) -> Result<Value> {
        self.inner.executor.execute(url).await
    }

    /// Cached frob, or a new one from `flickr.auth.getFrob`
    pub async fn get_frob(&self) -> Result<SecretString> {
        if !self.credentials().can_sign() {
            return Err(Error::MissingSharedSecret);
        }
        self.inner.auth.get_frob(&self.inner.executor).await
    }

    /// Cached token, or the result of exchanging `frob`
    pub async fn get_token(&self, frob: &SecretString) -> Result<SecretString> {
        if !self.credentials().can_sign() {
            return Err(Error::MissingSharedSecret);
        }
        self.inner.auth.get_token(&self.inner.executor, frob).await
    }

    /// Resolve the session token
    ///
    /// With `required == false` this returns a cached token if there is one
    /// and `None` otherwise. With `required == true` it runs the frob
    /// handshake as needed.
    pub async fn authenticate(&self, required: bool) -> Result<Option<SecretString>> {
        self.inner
            .auth
            .authenticate(&self.inner.executor, required)
            .await
    }

    /// Browser URL the user opens to approve `frob`
    pub fn authorization_url(&self, frob: &SecretString) -> Result<String> {
        auth::authorization_url(&self.inner.executor, frob)
    }

    /// Call a remote method
    ///
    /// `opts.force_sign`, when set, replaces both `sign_required` and
    /// `auth_required`. Authentication runs before the request; if it fails
    /// no request is sent.
    pub async fn invoke(
        &self,
        method: &str,
        sign_required: bool,
        auth_required: bool,
        opts: CallOptions,
    ) -> Result<Value> {
        let CallOptions {
            mut params,
            force_sign,
        } = opts;
        let (sign_required, auth_required) = match force_sign {
            Some(force) => (force, force),
            None => (sign_required, auth_required),
        };
        params.retain(|(k, _)| k != FORCE_SIGN_KEY);

        let token = self.authenticate(auth_required).await?;
        if auth_required {
            if let Some(token) = token {
                params.retain(|(k, _)| k != "auth_token");
                params.push(("auth_token".to_string(), token.expose_secret().clone()));
            }
        }

        let start = Instant::now();
        let result = self
            .inner
            .executor
            .call(method, sign_required, params)
            .await;
        self.metrics().record_request(
            method,
            result.as_ref().err().map(|e| e.kind().as_str()),
            start.elapsed().as_secs_f64(),
        );

        match &result {
            Ok(_) if auth_required => self.inner.auth.set_state(AuthState::Authorized),
            Ok(_) => {}
            Err(e) => debug!("{} failed: {}", method, e),
        }
        result
    }

    /// Create a callable binding for a remote method
    ///
    /// Methods under the `auth` namespace are always signed.
    pub fn make_method(
        &self,
        name: impl Into<String>,
        sign_required: bool,
        auth_required: bool,
    ) -> MethodBinding {
        MethodBinding::new(
            self.clone(),
            MethodDescriptor::new(name, sign_required, auth_required),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientBuilder;
    use md5::{Digest, Md5};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header_regex, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(base_url: &str, dir: &std::path::Path) -> Client {
        ClientBuilder::new("abc")
            .shared_secret("s3cr3t")
            .rest_url(format!("{}/services/rest/", base_url))
            .cache_dir(dir)
            .retries(0)
            .build()
            .unwrap()
    }

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        let (_, query) = url.split_once('?').unwrap();
        query
            .split('&')
            .map(|p| {
                let (k, v) = p.split_once('=').unwrap();
                (k.to_string(), v.to_string())
            })
            .collect()
    }

    #[test]
    fn test_build_url_signed() {
        let tmp = tempfile::tempdir().unwrap();
        let client = create_test_client("https://api.example.com", tmp.path());
        let url = client
            .build_url(
                "test.echo",
                true,
                vec![("foo".to_string(), "bar".to_string())],
            )
            .unwrap();

        let expected_sig = hex::encode(Md5::digest(
            "s3cr3tapi_keyabcfoobarformatjsonmethodtest.echonojsoncallback1".as_bytes(),
        ));
        assert_eq!(
            query_pairs(&url),
            vec![
                ("foo".to_string(), "bar".to_string()),
                ("format".to_string(), "json".to_string()),
                ("api_key".to_string(), "abc".to_string()),
                ("nojsoncallback".to_string(), "1".to_string()),
                ("method".to_string(), "test.echo".to_string()),
                ("api_sig".to_string(), expected_sig),
            ]
        );
        assert!(url.starts_with("https://api.example.com/services/rest/?"));
    }

    #[test]
    fn test_build_url_unsigned_encodes_values() {
        let tmp = tempfile::tempdir().unwrap();
        let client = create_test_client("https://api.example.com", tmp.path());
        let url = client
            .build_url(
                "flickr.photos.search",
                false,
                vec![
                    ("text".to_string(), "red & blue".to_string()),
                    ("method".to_string(), "evil".to_string()),
                ],
            )
            .unwrap();
        assert!(url.contains("text=red%20%26%20blue"));
        assert!(!url.contains("api_sig"));
        assert!(!url.contains("evil"));
        assert!(url.ends_with("method=flickr.photos.search"));
    }

    #[test]
    fn test_build_url_encodes_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let client = create_test_client("https://api.example.com", tmp.path());
        let url = client
            .build_url("m", false, vec![("a&b".to_string(), "x".to_string())])
            .unwrap();
        assert!(url.starts_with("https://api.example.com/services/rest/?a%26b=x&format=json"));
    }

    #[test]
    fn test_build_url_signed_needs_secret() {
        let client = ClientBuilder::new("abc").build().unwrap();
        let err = client.build_url("flickr.test.login", true, vec![]).unwrap_err();
        assert!(matches!(err, Error::MissingSharedSecret));
    }

    #[tokio::test]
    async fn test_execute_ok() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/rest/"))
            .and(query_param("method", "flickr.test.echo"))
            .and(query_param("format", "json"))
            .and(query_param("nojsoncallback", "1"))
            .and(header_regex("x-request-id", "^flickr-reflect-[0-9a-f-]{36}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "method": {"_content": "flickr.test.echo"},
                "foo": {"_content": "bar"},
                "stat": "ok"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let client = create_test_client(&mock_server.uri(), tmp.path());
        let body = client
            .invoke(
                "flickr.test.echo",
                false,
                false,
                CallOptions::new().param("foo", "bar"),
            )
            .await
            .unwrap();
        assert_eq!(body["foo"]["_content"], "bar");
    }

    #[tokio::test]
    async fn test_execute_api_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/rest/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "fail",
                "code": 100,
                "message": "Invalid API Key (Key has invalid format)"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let client = create_test_client(&mock_server.uri(), tmp.path());
        let err = client
            .invoke("flickr.test.echo", false, false, CallOptions::new())
            .await
            .unwrap_err();

        match err {
            Error::Api { message, code, url } => {
                assert_eq!(code, 100);
                assert!(message.starts_with("Invalid API Key"));
                assert!(url.contains("method=flickr.test.echo"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_http_error_without_envelope() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let client = create_test_client(&mock_server.uri(), tmp.path());
        let err = client
            .invoke("flickr.test.echo", false, false, CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_retry_on_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let client = ClientBuilder::new("abc")
            .rest_url(format!("{}/services/rest/", mock_server.uri()))
            .cache_dir(tmp.path())
            .retries(2)
            .build()
            .unwrap();
        let body = client
            .invoke("flickr.test.null", false, false, CallOptions::new())
            .await
            .unwrap();
        assert_eq!(body["stat"], "ok");
    }

    #[tokio::test]
    async fn test_api_errors_are_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "fail", "code": "105", "message": "Service currently unavailable"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let client = ClientBuilder::new("abc")
            .rest_url(format!("{}/services/rest/", mock_server.uri()))
            .cache_dir(tmp.path())
            .retries(3)
            .build()
            .unwrap();
        let err = client
            .invoke("flickr.test.null", false, false, CallOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.api_code(), Some(105));
    }

    #[tokio::test]
    async fn test_force_sign_is_stripped_and_applied() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("auth_token", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("token"), "tok-1\n").unwrap();
        let client = create_test_client(&mock_server.uri(), tmp.path());

        let _ = client
            .invoke(
                "flickr.photos.getRecent",
                false,
                false,
                CallOptions::new().force_sign(true),
            )
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap().to_string();
        assert!(query.contains("api_sig="));
        assert!(!query.contains("force_sign"));
        assert_eq!(client.auth_state(), AuthState::Authorized);
    }

    #[tokio::test]
    async fn test_force_sign_set_as_param_is_applied() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("auth_token", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("token"), "tok-1").unwrap();
        let client = create_test_client(&mock_server.uri(), tmp.path());

        let _ = client
            .invoke(
                "flickr.photos.getRecent",
                false,
                false,
                CallOptions::new().param("force_sign", "1"),
            )
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap().to_string();
        assert!(query.contains("api_sig="));
        assert!(!query.contains("force_sign"));
    }

    #[tokio::test]
    async fn test_anonymous_call_does_not_send_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("token"), "tok-1").unwrap();
        let client = create_test_client(&mock_server.uri(), tmp.path());
        let _ = client
            .invoke("flickr.test.echo", false, false, CallOptions::new())
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(!requests[0].url.query().unwrap().contains("auth_token"));
    }

    #[test]
    fn test_client_debug_hides_secret() {
        let client = ClientBuilder::new("abc").shared_secret("s3cr3t").build().unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("abc"));
        assert!(!debug_str.contains("s3cr3t"));
    }
}
