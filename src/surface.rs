//! The discovered call surface
//!
//! A [`CallSurface`] mirrors the server's namespace hierarchy: internal nodes
//! are namespaces, leaves are [`MethodBinding`]s. `flickr.photos.comments.
//! getList` lives at `photos` -> `comments` -> `getList`. The tree is built
//! once by discovery and never changes afterwards.

use crate::errors::{Error, Result};
use crate::method::MethodBinding;
use crate::models::CallOptions;
use serde_json::Value;
use std::collections::BTreeMap;

/// A node of the call surface
#[derive(Debug, Clone)]
pub enum Node {
    /// A namespace with child nodes
    Namespace(Namespace),
    /// An invocable method
    Method(MethodBinding),
}

/// A namespace: child segment name to node
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    children: BTreeMap<String, Node>,
}

impl Namespace {
    /// Child node by segment name
    pub fn get(&self, segment: &str) -> Option<&Node> {
        self.children.get(segment)
    }

    /// Child namespace by segment name
    pub fn namespace(&self, segment: &str) -> Option<&Namespace> {
        match self.children.get(segment)? {
            Node::Namespace(ns) => Some(ns),
            Node::Method(_) => None,
        }
    }

    /// Method directly inside this namespace
    pub fn method(&self, segment: &str) -> Option<&MethodBinding> {
        match self.children.get(segment)? {
            Node::Method(m) => Some(m),
            Node::Namespace(_) => None,
        }
    }

    /// Methods directly inside this namespace, by name
    pub fn methods(&self) -> impl Iterator<Item = (&str, &MethodBinding)> {
        self.children.iter().filter_map(|(k, n)| match n {
            Node::Method(m) => Some((k.as_str(), m)),
            Node::Namespace(_) => None,
        })
    }

    /// Child namespaces, by name
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &Namespace)> {
        self.children.iter().filter_map(|(k, n)| match n {
            Node::Namespace(ns) => Some((k.as_str(), ns)),
            Node::Method(_) => None,
        })
    }

    /// Whether the namespace has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of methods in this namespace and below
    pub fn len(&self) -> usize {
        self.children
            .values()
            .map(|n| match n {
                Node::Method(_) => 1,
                Node::Namespace(ns) => ns.len(),
            })
            .sum()
    }

    fn resolve(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut node = self.children.get(segments.next()?)?;
        for segment in segments {
            node = match node {
                Node::Namespace(ns) => ns.children.get(segment)?,
                Node::Method(_) => return None,
            };
        }
        Some(node)
    }

    fn collect_names(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, node) in &self.children {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match node {
                Node::Method(_) => out.push(path),
                Node::Namespace(ns) => ns.collect_names(&path, out),
            }
        }
    }

    /// Place a binding at `path`, creating namespaces on the way
    ///
    /// Fails when a segment of the path is already taken by a method, or the
    /// leaf is already taken by a namespace.
    pub(crate) fn insert(&mut self, path: &[&str], binding: MethodBinding) -> Result<()> {
        let Some((leaf, parents)) = path.split_last() else {
            return Err(Error::Config(format!(
                "method {} has an empty path",
                binding.name()
            )));
        };

        let mut level = self;
        for segment in parents {
            let node = level
                .children
                .entry(segment.to_string())
                .or_insert_with(|| Node::Namespace(Namespace::default()));
            level = match node {
                Node::Namespace(ns) => ns,
                Node::Method(m) => {
                    return Err(Error::Config(format!(
                        "{} conflicts with method {}",
                        binding.name(),
                        m.name()
                    )))
                }
            };
        }

        if let Some(Node::Namespace(_)) = level.children.get(*leaf) {
            return Err(Error::Config(format!(
                "{} conflicts with an existing namespace",
                binding.name()
            )));
        }
        let _ = level
            .children
            .insert(leaf.to_string(), Node::Method(binding));
        Ok(())
    }
}

/// Outcome of one discovery run
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Methods listed by the server before filtering
    pub listed: usize,
    /// Methods kept by the namespace filter
    pub retained: usize,
    /// Methods that could not be described or placed, with the reason
    pub failures: Vec<(String, Error)>,
}

impl DiscoveryReport {
    /// Whether every retained method made it into the surface
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The tree of bindings produced by discovery
///
/// # Example
///
/// ```no_run
/// # use flickr_reflect::{CallOptions, CallSurface};
/// # async fn example(surface: &CallSurface) -> Result<(), Box<dyn std::error::Error>> {
/// for (name, method) in surface.namespace("test").into_iter().flat_map(|ns| ns.methods()) {
///     println!("test.{} signed={}", name, method.needs_signing());
/// }
/// let body = surface
///     .call("test.echo", CallOptions::new().param("foo", "bar"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CallSurface {
    root: Namespace,
    report: DiscoveryReport,
}

impl CallSurface {
    pub(crate) fn new(root: Namespace, report: DiscoveryReport) -> Self {
        Self { root, report }
    }

    /// Root namespace
    pub fn root(&self) -> &Namespace {
        &self.root
    }

    /// Summary of the discovery run that built this surface
    pub fn report(&self) -> &DiscoveryReport {
        &self.report
    }

    /// Node at a dotted path such as `photos.comments`
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.root.resolve(path)
    }

    /// Namespace at a dotted path
    pub fn namespace(&self, path: &str) -> Option<&Namespace> {
        match self.get(path)? {
            Node::Namespace(ns) => Some(ns),
            Node::Method(_) => None,
        }
    }

    /// Method at a dotted path such as `photos.getInfo`
    pub fn method(&self, path: &str) -> Option<&MethodBinding> {
        match self.get(path)? {
            Node::Method(m) => Some(m),
            Node::Namespace(_) => None,
        }
    }

    /// Call the method at a dotted path
    pub async fn call(&self, path: &str, opts: CallOptions) -> Result<Value> {
        let method = self
            .method(path)
            .ok_or_else(|| Error::Config(format!("no method {} in the call surface", path)))?;
        method.invoke_with(opts).await
    }

    /// Dotted paths of every method, sorted
    pub fn method_names(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.root.collect_names("", &mut out);
        out
    }

    /// Number of methods
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Whether the surface has no methods
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientBuilder;
    use pretty_assertions::assert_eq;

    fn surface(names: &[&str]) -> CallSurface {
        let client = ClientBuilder::new("key").build().unwrap();
        let mut root = Namespace::default();
        for name in names {
            let binding = client.make_method(*name, false, false);
            let path = crate::endpoints::method_path(name);
            root.insert(&path, binding).unwrap();
        }
        CallSurface::new(root, DiscoveryReport::default())
    }

    #[test]
    fn test_nested_lookup() {
        let s = surface(&[
            "flickr.photos.getInfo",
            "flickr.photos.comments.getList",
            "flickr.test.echo",
        ]);

        assert_eq!(s.len(), 3);
        assert_eq!(
            s.method_names(),
            vec!["photos.comments.getList", "photos.getInfo", "test.echo"]
        );
        assert_eq!(
            s.method("photos.comments.getList").unwrap().name(),
            "flickr.photos.comments.getList"
        );
        assert!(s.method("photos.comments").is_none());
        assert!(s.namespace("photos.comments").is_some());
        assert!(s.method("photos.getInfo.extra").is_none());
        assert!(s.get("people").is_none());

        let photos = s.root().namespace("photos").unwrap();
        let names: Vec<&str> = photos.methods().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["getInfo"]);
        let children: Vec<&str> = photos.namespaces().map(|(n, _)| n).collect();
        assert_eq!(children, vec!["comments"]);
        assert_eq!(photos.len(), 2);
    }

    #[test]
    fn test_insert_conflicts() {
        let client = ClientBuilder::new("key").build().unwrap();
        let mut root = Namespace::default();
        root.insert(&["a", "b"], client.make_method("flickr.a.b", false, false))
            .unwrap();

        let err = root
            .insert(&["a", "b", "c"], client.make_method("flickr.a.b.c", false, false))
            .unwrap_err();
        assert!(err.to_string().contains("conflicts with method flickr.a.b"));

        let err = root
            .insert(&["a"], client.make_method("flickr.a", false, false))
            .unwrap_err();
        assert!(err.to_string().contains("existing namespace"));

        assert!(root
            .insert(&[], client.make_method("flickr", false, false))
            .is_err());
    }

    #[test]
    fn test_empty_surface() {
        let s = surface(&[]);
        assert!(s.is_empty());
        assert!(s.report().is_complete());
        assert!(s.method_names().is_empty());
    }

    #[tokio::test]
    async fn test_call_unknown_path() {
        let s = surface(&["flickr.test.echo"]);
        let err = s.call("test.missing", CallOptions::new()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
