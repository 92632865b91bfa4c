//! Error types and handling for the Flickr reflection client
//!
//! This module defines the error types that can be returned by client
//! operations. Errors carry enough context for diagnostics while never
//! exposing the shared secret or the session token.
//!
//! # Error Categories
//!
//! - **Configuration**: missing API key, empty namespace filter, missing shared
//!   secret for a signed call
//! - **Storage**: the credential directory or one of its files could not be
//!   created, read or written
//! - **Manual authorization**: the user has to approve the application in a
//!   browser; the error carries the URL to open
//! - **API errors**: the server answered with `stat != "ok"`
//! - **Transport**: connection failures, timeouts, non-2xx responses
//! - **Discovery**: per-method failures collected while building the call
//!   surface in strict mode
//!
//! # Example
//!
//! ```no_run
//! # use flickr_reflect::{CallSurface, Error};
//! # async fn example(surface: &CallSurface) -> Result<(), Box<dyn std::error::Error>> {
//! match surface.call("photos.getRecent", Default::default()).await {
//!     Ok(body) => println!("{}", body),
//!     Err(Error::ManualAuthorizationRequired { url }) => println!("Open {}", url),
//!     Err(Error::Api { code: 100, .. }) => println!("Invalid API key"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a failure envelope
    #[error("flickr: {message} - {code} on {url}")]
    Api {
        /// Error message from server
        message: String,
        /// Numeric error code from server
        code: i64,
        /// Request URL, with the session token redacted
        url: String,
    },

    /// The user has to grant access in a browser before signed calls work
    #[error("need to link to account - open this url in your browser: {url}")]
    ManualAuthorizationRequired {
        /// Authorization URL to open
        url: String,
    },

    /// A signed call was attempted without a shared secret
    #[error("config: a signed method was called but no api secret is configured")]
    MissingSharedSecret,

    /// Credential persistence failure
    #[error("storage: {path:?}: {source}")]
    Storage {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// HTTP error without an API envelope
    #[error("http {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body excerpt or reason phrase
        message: String,
    },

    /// One or more methods could not be described during discovery
    #[error("discovery: {} method(s) failed to resolve", failures.len())]
    Discovery {
        /// Fully qualified method name and the error it failed with
        failures: Vec<(String, Error)>,
    },

    /// Deserialization error
    #[error("deserialize: {0}")]
    Deserialize(String),

    /// Network error
    #[error("network: {0}")]
    Network(String),

    /// Request timeout
    #[error("timeout")]
    Timeout,

    /// Configuration error
    #[error("config: {0}")]
    Config(String),
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or incomplete client configuration
    Configuration,
    /// Credential storage failure
    Storage,
    /// User action required to authorize the application
    ManualAuthorization,
    /// Server reported a failure
    Api,
    /// Network, timeout or HTTP status failure
    Transport,
    /// Malformed response body
    Protocol,
    /// Aggregated discovery failures
    Discovery,
}

impl ErrorKind {
    /// Short label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Storage => "storage",
            ErrorKind::ManualAuthorization => "manual_authorization",
            ErrorKind::Api => "api",
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Discovery => "discovery",
        }
    }
}

impl Error {
    /// Get the error kind for categorization
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::MissingSharedSecret => ErrorKind::Configuration,
            Error::Storage { .. } => ErrorKind::Storage,
            Error::ManualAuthorizationRequired { .. } => ErrorKind::ManualAuthorization,
            Error::Api { .. } => ErrorKind::Api,
            Error::Http { .. } | Error::Network(_) | Error::Timeout => ErrorKind::Transport,
            Error::Deserialize(_) => ErrorKind::Protocol,
            Error::Discovery { .. } => ErrorKind::Discovery,
        }
    }

    /// Check if the error is retryable
    ///
    /// Only transport failures qualify; a failure envelope from the server is
    /// never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Error::Network(_) => true,
            Error::Timeout => true,
            _ => false,
        }
    }

    /// Get the server error code if this is an API error
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the authorization URL if the user has to approve access
    pub fn authorization_url(&self) -> Option<&str> {
        match self {
            Error::ManualAuthorizationRequired { url } => Some(url),
            _ => None,
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_decode() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}
