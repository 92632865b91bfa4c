use crate::{
    auth::Credentials,
    cache::SecretPersistence,
    endpoints::{DEFAULT_AUTH_URL, DEFAULT_REST_URL},
    errors::Result,
    surface::CallSurface,
    telemetry::TelemetryConfig,
    Error,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "FLICKR_API_KEY";
/// Environment variable holding the shared secret
pub const ENV_API_SECRET: &str = "FLICKR_API_SECRET";
/// Environment variable holding a comma-separated namespace filter
pub const ENV_APIS: &str = "FLICKR_APIS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key and optional shared secret
    pub credentials: Credentials,
    /// Top-level namespaces to expose after discovery
    pub apis: Vec<String>,
    /// REST endpoint
    pub rest_url: String,
    /// Browser authorization endpoint
    pub auth_url: String,
    /// Directory for persisted credentials
    pub cache_dir: PathBuf,
    /// Custom persisted tier replacing `cache_dir`
    pub persistence: Option<Arc<dyn SecretPersistence>>,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retries for transport failures
    pub retries: u32,
    /// User agent suffix
    pub user_agent_suffix: Option<String>,
    /// Maximum concurrent `getMethodInfo` calls during discovery
    pub discovery_concurrency: usize,
    /// Fail discovery when any method cannot be described
    pub strict_discovery: bool,
    /// Telemetry configuration
    pub telemetry_config: TelemetryConfig,
}

/// Builder for creating a configured Client
///
/// # Example
///
/// ```no_run
/// use flickr_reflect::ClientBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let surface = ClientBuilder::new("your-api-key")
///     .shared_secret("your-secret")
///     .apis(["photos", "people"])
///     .connect()
///     .await?;
/// let recent = surface.call("photos.getRecent", Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: String,
    shared_secret: Option<String>,
    apis: Vec<String>,
    rest_url: String,
    auth_url: String,
    cache_dir: PathBuf,
    persistence: Option<Arc<dyn SecretPersistence>>,
    timeout_ms: u64,
    retries: u32,
    user_agent_suffix: Option<String>,
    discovery_concurrency: usize,
    strict_discovery: bool,
    telemetry_config: TelemetryConfig,
}

impl ClientBuilder {
    /// Create a new client builder with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            shared_secret: None,
            apis: Vec::new(),
            rest_url: DEFAULT_REST_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            cache_dir: PathBuf::from(crate::DEFAULT_CACHE_DIR),
            persistence: None,
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
            retries: crate::DEFAULT_RETRIES,
            user_agent_suffix: None,
            discovery_concurrency: crate::DEFAULT_DISCOVERY_CONCURRENCY,
            strict_discovery: false,
            telemetry_config: TelemetryConfig::default(),
        }
    }

    /// Create a builder from `FLICKR_API_KEY`, `FLICKR_API_SECRET` and
    /// `FLICKR_APIS` (comma-separated)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_API_KEY)))?;
        let mut builder = Self::new(api_key);
        if let Ok(secret) = std::env::var(ENV_API_SECRET) {
            builder = builder.shared_secret(secret);
        }
        if let Ok(apis) = std::env::var(ENV_APIS) {
            builder = builder.apis(
                apis.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>(),
            );
        }
        Ok(builder)
    }

    /// Set the shared secret, enabling signed calls
    pub fn shared_secret(mut self, secret: impl Into<String>) -> Self {
        self.shared_secret = Some(secret.into());
        self
    }

    /// Set the top-level namespaces to discover (`auth` is always included)
    pub fn apis<I, S>(mut self, apis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apis = apis.into_iter().map(Into::into).collect();
        self
    }

    /// Override the REST endpoint
    pub fn rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url = url.into();
        self
    }

    /// Override the browser authorization endpoint
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Directory for the persisted frob and token (default `cache`)
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Replace the file-based credential persistence
    pub fn persistence(mut self, persistence: Arc<dyn SecretPersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Set the request timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the number of retries for transport failures
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Add a custom user agent suffix
    pub fn user_agent_extra(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Limit concurrent `getMethodInfo` calls during discovery
    pub fn discovery_concurrency(mut self, limit: usize) -> Self {
        self.discovery_concurrency = limit;
        self
    }

    /// Fail discovery when any method cannot be described
    pub fn strict_discovery(mut self, strict: bool) -> Self {
        self.strict_discovery = strict;
        self
    }

    /// Configure telemetry/metrics
    #[cfg(feature = "metrics")]
    pub fn with_telemetry(mut self, config: TelemetryConfig) -> Self {
        self.telemetry_config = config;
        self
    }

    /// Enable telemetry with default settings
    #[cfg(feature = "metrics")]
    pub fn enable_telemetry(mut self) -> Self {
        self.telemetry_config.enabled = true;
        self
    }

    /// Build the client with the configured options
    ///
    /// The namespace filter is only checked by [`ClientBuilder::connect`].
    pub fn build(self) -> Result<crate::Client> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("flickr api key needed".to_string()));
        }

        for url in [&self.rest_url, &self.auth_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Config(format!(
                    "URL must start with http:// or https://: {}",
                    url
                )));
            }
        }

        if self.discovery_concurrency == 0 {
            return Err(Error::Config(
                "discovery concurrency must be at least 1".to_string(),
            ));
        }

        let mut credentials = Credentials::new(self.api_key.trim());
        if let Some(secret) = self.shared_secret {
            credentials = credentials.with_secret(secret);
        }

        let config = ClientConfig {
            credentials,
            apis: self.apis,
            rest_url: self.rest_url,
            auth_url: self.auth_url,
            cache_dir: self.cache_dir,
            persistence: self.persistence,
            timeout: Duration::from_millis(self.timeout_ms),
            retries: self.retries,
            user_agent_suffix: self.user_agent_suffix,
            discovery_concurrency: self.discovery_concurrency,
            strict_discovery: self.strict_discovery,
            telemetry_config: self.telemetry_config,
        };

        crate::client::Client::new(config)
    }

    /// Build the client and discover the configured namespaces
    ///
    /// Fails with [`Error::Config`] before any network call when the API key
    /// or the namespace filter is missing.
    pub async fn connect(self) -> Result<CallSurface> {
        if self.apis.iter().all(|a| a.trim().is_empty()) {
            return Err(Error::Config(
                "please specify which apis you'd like to use".to_string(),
            ));
        }
        let client = self.build()?;
        client.discover().await
    }
}
