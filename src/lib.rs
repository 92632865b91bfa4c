//! Self-configuring client for the Flickr REST API
//!
//! Instead of shipping a hand-written binding for every remote method, the
//! client asks the server which methods exist (`flickr.reflection.getMethods`)
//! and how each one must be called (`flickr.reflection.getMethodInfo`), then
//! builds a tree of callable bindings mirroring the server's namespaces.
//!
//! # Features
//!
//! - Async/await support with tokio runtime
//! - Concurrent method discovery with a bounded fan-out
//! - MD5 request signing with the shared secret
//! - Frob/token session handshake with a two-tier credential cache
//! - Automatic retries with exponential backoff for transport failures
//! - Optional OpenTelemetry metrics (`metrics` feature)
//!
//! # Example
//!
//! ```no_run
//! use flickr_reflect::{CallOptions, ClientBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let surface = ClientBuilder::new("your-api-key")
//!         .shared_secret("your-secret")
//!         .apis(["test", "photos"])
//!         .connect()
//!         .await?;
//!
//!     let echo = surface
//!         .call("test.echo", CallOptions::new().param("foo", "bar"))
//!         .await?;
//!     println!("{}", echo);
//!
//!     Ok(())
//! }
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    unsafe_code,
    unused_results
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod auth;
mod cache;
mod client;
mod config;
mod discovery;
mod endpoints;
mod errors;
mod method;
mod models;
mod signing;
mod surface;
/// Telemetry and observability support
#[cfg(feature = "metrics")]
pub mod telemetry;

#[cfg(not(feature = "metrics"))]
mod telemetry;
mod util;

pub use auth::{AuthState, Credentials};
pub use cache::{CacheStats, CredentialStore, FileSystemPersistence, SecretName, SecretPersistence};
pub use client::Client;
pub use config::{ClientBuilder, ClientConfig, ENV_API_KEY, ENV_API_SECRET, ENV_APIS};
pub use endpoints::{DEFAULT_AUTH_URL, DEFAULT_REST_URL};
pub use errors::{Error, ErrorKind, Result};
pub use method::MethodBinding;
pub use models::{ArgumentInfo, CallOptions, MethodDescriptor, Permission, FORCE_SIGN_KEY};
pub use signing::sign;
pub use surface::{CallSurface, DiscoveryReport, Namespace, Node};

// Re-export commonly used types
pub use secrecy::SecretString;

/// SDK version, matches Cargo.toml version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries for transport failures
pub const DEFAULT_RETRIES: u32 = 2;

/// Default directory for the persisted frob and token
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Default bound on concurrent `getMethodInfo` calls
pub const DEFAULT_DISCOVERY_CONCURRENCY: usize = 8;
