//! Building the call surface from the reflection methods
//!
//! Discovery lists every remote method with `flickr.reflection.getMethods`,
//! keeps the namespaces the client was configured for plus `auth`, describes
//! each kept method with `flickr.reflection.getMethodInfo` and splices a
//! binding for it into a [`CallSurface`]. Descriptions run concurrently; the
//! tree is assembled only after all of them have settled.

use crate::{
    client::Client,
    endpoints::{method_path, AUTH_NAMESPACE, METHOD_GET_METHODS, METHOD_GET_METHOD_INFO},
    errors::{Error, Result},
    method::MethodBinding,
    models::{self, CallOptions, MethodDescriptor},
    surface::{CallSurface, DiscoveryReport, Namespace},
};

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

impl Client {
    /// Discover the configured namespaces and build the call surface
    ///
    /// Fails when the method listing cannot be fetched. A method that cannot
    /// be described is left out of the surface and recorded in
    /// [`CallSurface::report`], unless strict discovery is enabled, in which
    /// case the whole run fails with [`Error::Discovery`].
    pub async fn discover(&self) -> Result<CallSurface> {
        let apis = self.namespace_filter()?;
        let start = Instant::now();

        let listing = self
            .invoke(METHOD_GET_METHODS, false, false, CallOptions::new())
            .await?;
        let listed = models::method_names(&listing)?;
        let listed_count = listed.len();

        let mut seen = HashSet::new();
        let retained: Vec<String> = listed
            .into_iter()
            .filter(|name| match method_path(name).first() {
                Some(first) => apis.contains(*first),
                None => false,
            })
            .filter(|name| seen.insert(name.clone()))
            .collect();
        debug!(
            "Describing {} of {} listed methods",
            retained.len(),
            listed_count
        );

        let mut report = DiscoveryReport {
            listed: listed_count,
            retained: retained.len(),
            failures: Vec::new(),
        };

        let concurrency = self.config().discovery_concurrency.max(1);
        let mut described: Vec<(String, Result<MethodDescriptor>)> = stream::iter(retained)
            .map(|name| async move {
                let result = self.describe(&name).await;
                (name, result)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;
        described.sort_by(|a, b| a.0.cmp(&b.0));

        let mut root = Namespace::default();
        for (name, result) in described {
            let placed = result.and_then(|descriptor| {
                let path = method_path(&name);
                root.insert(&path, MethodBinding::new(self.clone(), descriptor))
            });
            if let Err(e) = placed {
                warn!("Leaving {} out of the call surface: {}", name, e);
                report.failures.push((name, e));
            }
        }

        let failed = report.failures.len();
        self.metrics()
            .record_discovery((report.retained - failed) as u64, failed as u64);

        if failed > 0 && self.config().strict_discovery {
            return Err(Error::Discovery {
                failures: report.failures,
            });
        }

        let surface = CallSurface::new(root, report);
        info!(
            "Discovered {} methods in {:?} ({} failed)",
            surface.len(),
            start.elapsed(),
            failed
        );
        Ok(surface)
    }

    /// Top-level namespaces to keep, always including `auth`
    fn namespace_filter(&self) -> Result<HashSet<String>> {
        let mut apis: HashSet<String> = self
            .config()
            .apis
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        if apis.is_empty() {
            return Err(Error::Config(
                "please specify which apis you'd like to use".to_string(),
            ));
        }
        let _ = apis.insert(AUTH_NAMESPACE.to_string());
        Ok(apis)
    }

    async fn describe(&self, name: &str) -> Result<MethodDescriptor> {
        let body = self
            .invoke(
                METHOD_GET_METHOD_INFO,
                false,
                false,
                CallOptions::new().param("method_name", name),
            )
            .await?;
        let descriptor = MethodDescriptor::from_method_info(&body)?;
        if descriptor.name != name {
            return Err(Error::Deserialize(format!(
                "{} was described as {}",
                name, descriptor.name
            )));
        }
        Ok(descriptor)
    }
}
