//! Callable bindings for remote methods

use crate::client::Client;
use crate::errors::Result;
use crate::models::{CallOptions, MethodDescriptor};
use serde_json::Value;
use std::fmt;

/// A remote method bound to a client
///
/// Created by [`Client::make_method`] or by discovery. Each call is
/// independent; bindings only share the client's credential state.
///
/// # Example
///
/// ```no_run
/// # use flickr_reflect::{CallOptions, Client};
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let echo = client.make_method("flickr.test.echo", false, false);
/// let body = echo.invoke_with(CallOptions::new().param("foo", "bar")).await?;
/// let again = echo.invoke().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MethodBinding {
    client: Client,
    descriptor: MethodDescriptor,
}

impl fmt::Debug for MethodBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBinding")
            .field("name", &self.descriptor.name)
            .field("needs_signing", &self.descriptor.needs_signing)
            .field("needs_login", &self.descriptor.needs_login)
            .finish()
    }
}

impl MethodBinding {
    pub(crate) fn new(client: Client, descriptor: MethodDescriptor) -> Self {
        Self { client, descriptor }
    }

    /// Fully qualified method name
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Whether calls are signed
    pub fn needs_signing(&self) -> bool {
        self.descriptor.needs_signing
    }

    /// Whether calls carry the session token
    pub fn needs_login(&self) -> bool {
        self.descriptor.needs_login
    }

    /// Full metadata reported by the server
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// Call the method without parameters
    pub async fn invoke(&self) -> Result<Value> {
        self.invoke_with(CallOptions::default()).await
    }

    /// Call the method with parameters and control options
    pub async fn invoke_with(&self, opts: CallOptions) -> Result<Value> {
        self.client
            .invoke(
                &self.descriptor.name,
                self.descriptor.needs_signing,
                self.descriptor.needs_login,
                opts,
            )
            .await
    }
}
