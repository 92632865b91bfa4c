//! API endpoint URL construction

use crate::util::query_string;

/// Default REST endpoint
pub const DEFAULT_REST_URL: &str = "https://api.flickr.com/services/rest/";

/// Default browser authorization endpoint
pub const DEFAULT_AUTH_URL: &str = "https://www.flickr.com/services/auth/";

/// Namespace prefix shared by every remote method
pub const ROOT_NAMESPACE: &str = "flickr";

/// Namespace holding the credential exchange methods
pub const AUTH_NAMESPACE: &str = "auth";

// Reflection
pub const METHOD_GET_METHODS: &str = "flickr.reflection.getMethods";
pub const METHOD_GET_METHOD_INFO: &str = "flickr.reflection.getMethodInfo";

// Authentication
pub const METHOD_GET_FROB: &str = "flickr.auth.getFrob";
pub const METHOD_GET_TOKEN: &str = "flickr.auth.getToken";

/// Endpoint builder
#[derive(Debug, Clone)]
pub struct Endpoints {
    rest_url: String,
    auth_url: String,
}

impl Endpoints {
    /// Create a new endpoints builder
    pub fn new(rest_url: &str, auth_url: &str) -> Self {
        Self {
            rest_url: rest_url.to_string(),
            auth_url: auth_url.to_string(),
        }
    }

    fn with_query(base: &str, pairs: &[(String, String)]) -> String {
        let sep = if base.contains('?') { '&' } else { '?' };
        format!("{}{}{}", base, sep, query_string(pairs))
    }

    /// REST call URL with the given query pairs
    pub fn rest(&self, pairs: &[(String, String)]) -> String {
        Self::with_query(&self.rest_url, pairs)
    }

    /// Browser authorization URL with the given query pairs
    pub fn authorize(&self, pairs: &[(String, String)]) -> String {
        Self::with_query(&self.auth_url, pairs)
    }
}

/// Split a fully qualified method name into its namespace path
///
/// The `flickr.` root is dropped: `flickr.photos.getInfo` becomes
/// `["photos", "getInfo"]`. Names without the root are split as they are.
pub fn method_path(name: &str) -> Vec<&str> {
    let relative = name
        .strip_prefix(ROOT_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name);
    relative.split('.').filter(|s| !s.is_empty()).collect()
}
