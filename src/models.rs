//! Data models for the Flickr reflection client
//!
//! # Key Types
//!
//! * [`MethodDescriptor`] - Metadata of one remote method, as reported by
//!   `flickr.reflection.getMethodInfo`
//! * [`CallOptions`] - Parameters and control options for one call
//! * [`Permission`] - Permission level a method requires

use crate::endpoints::{method_path, AUTH_NAMESPACE};
use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reserved option key that forces signing and login for one call
pub const FORCE_SIGN_KEY: &str = "force_sign";

/// Permission level required by a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// No permission needed
    #[default]
    None,
    /// Read access
    Read,
    /// Write access
    Write,
    /// Delete access
    Delete,
}

impl Permission {
    /// Map the numeric `requiredperms` value
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Permission::Read,
            2 => Permission::Write,
            3 => Permission::Delete,
            _ => Permission::None,
        }
    }
}

/// One documented argument of a remote method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentInfo {
    /// Parameter name
    pub name: String,
    /// Whether the argument may be omitted
    pub optional: bool,
    /// Server-provided documentation
    pub description: Option<String>,
}

/// Metadata of one remote method
///
/// # Example
///
/// ```
/// use flickr_reflect::MethodDescriptor;
/// use serde_json::json;
///
/// let body = json!({
///     "method": {"name": "flickr.auth.getFrob", "needslogin": 0, "needssigning": 0},
///     "stat": "ok"
/// });
/// let descriptor = MethodDescriptor::from_method_info(&body).unwrap();
/// // methods under "auth" are always signed
/// assert!(descriptor.needs_signing);
/// assert_eq!(descriptor.path(), vec!["auth", "getFrob"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Fully qualified name, e.g. `flickr.photos.getInfo`
    pub name: String,
    /// Whether calls must carry `api_sig`
    pub needs_signing: bool,
    /// Whether calls must carry `auth_token`
    pub needs_login: bool,
    /// Permission the session token must grant
    pub required_perms: Permission,
    /// Server-provided documentation
    pub description: Option<String>,
    /// Documented arguments
    pub arguments: Vec<ArgumentInfo>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(rename = "_content", default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default, deserialize_with = "flag")]
    needslogin: bool,
    #[serde(default, deserialize_with = "flag")]
    needssigning: bool,
    #[serde(default, deserialize_with = "number")]
    requiredperms: i64,
    #[serde(default)]
    description: Option<Content>,
}

#[derive(Deserialize)]
struct RawArgument {
    name: String,
    #[serde(default, deserialize_with = "flag")]
    optional: bool,
    #[serde(rename = "_content", default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawArguments {
    #[serde(default)]
    argument: Vec<RawArgument>,
}

#[derive(Deserialize)]
struct RawMethodInfo {
    method: RawMethod,
    #[serde(default)]
    arguments: Option<RawArguments>,
}

#[derive(Deserialize)]
struct RawMethodList {
    methods: RawMethods,
}

#[derive(Deserialize)]
struct RawMethods {
    #[serde(default)]
    method: Vec<Content>,
}

/// Flags arrive as `0`/`1`, as strings, or as booleans
fn flag<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        _ => false,
    })
}

fn number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<i64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

impl MethodDescriptor {
    /// Create a descriptor without documentation
    ///
    /// Methods under the `auth` namespace are marked as signed regardless of
    /// `needs_signing`.
    pub fn new(name: impl Into<String>, needs_signing: bool, needs_login: bool) -> Self {
        let name = name.into();
        let needs_signing = needs_signing || is_auth_method(&name);
        Self {
            name,
            needs_signing,
            needs_login,
            required_perms: Permission::None,
            description: None,
            arguments: Vec::new(),
        }
    }

    /// Parse the body of a `flickr.reflection.getMethodInfo` response
    pub fn from_method_info(body: &Value) -> Result<Self> {
        let raw = RawMethodInfo::deserialize(body)?;
        let mut descriptor =
            Self::new(raw.method.name, raw.method.needssigning, raw.method.needslogin);
        descriptor.required_perms = Permission::from_code(raw.method.requiredperms);
        descriptor.description = raw
            .method
            .description
            .and_then(|d| d.content)
            .filter(|d| !d.is_empty());
        descriptor.arguments = raw
            .arguments
            .unwrap_or_default()
            .argument
            .into_iter()
            .map(|a| ArgumentInfo {
                name: a.name,
                optional: a.optional,
                description: a.content.filter(|d| !d.is_empty()),
            })
            .collect();
        Ok(descriptor)
    }

    /// Namespace path without the `flickr` root; the last segment is the leaf
    pub fn path(&self) -> Vec<&str> {
        method_path(&self.name)
    }

    /// Arguments that must be supplied, excluding `api_key`
    pub fn required_arguments(&self) -> impl Iterator<Item = &ArgumentInfo> {
        self.arguments
            .iter()
            .filter(|a| !a.optional && a.name != "api_key")
    }
}

/// Whether a fully qualified method lives in the `auth` namespace
pub(crate) fn is_auth_method(name: &str) -> bool {
    method_path(name).first() == Some(&AUTH_NAMESPACE)
}

/// Parse the body of a `flickr.reflection.getMethods` response
pub(crate) fn method_names(body: &Value) -> Result<Vec<String>> {
    let raw = RawMethodList::deserialize(body)?;
    Ok(raw
        .methods
        .method
        .into_iter()
        .filter_map(|m| m.content)
        .collect())
}

/// Read `body[path...]._content` as a string
pub(crate) fn content_at(body: &Value, path: &[&str]) -> Result<String> {
    let node = path.iter().fold(body, |node, key| &node[*key]);
    node["_content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Deserialize(format!("missing {}._content in response", path.join(".")))
        })
}

/// Options for one remote call
///
/// Parameters are sent in insertion order. `force_sign` is never sent; when
/// set it overrides both the signing and the login requirement of the method.
///
/// # Example
///
/// ```
/// use flickr_reflect::CallOptions;
/// use serde_json::json;
///
/// let opts = CallOptions::new()
///     .param("photo_id", "5287")
///     .param("extras", "tags,views");
/// assert_eq!(opts.params.len(), 2);
///
/// let opts = CallOptions::from_json(json!({"per_page": 10, "force_sign": true})).unwrap();
/// assert_eq!(opts.force_sign, Some(true));
/// assert_eq!(opts.params, vec![("per_page".to_string(), "10".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Method parameters
    pub params: Vec<(String, String)>,
    /// Override for the method's signing and login requirements
    pub force_sign: Option<bool>,
}

impl CallOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing an earlier value for the same key
    ///
    /// The `force_sign` key sets the control option instead; `""`, `"0"` and
    /// `"false"` turn it off, anything else turns it on.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        if key == FORCE_SIGN_KEY {
            self.force_sign = Some(truthy(&value));
            return self;
        }
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Force signing and login on or off for this call
    pub fn force_sign(mut self, force: bool) -> Self {
        self.force_sign = Some(force);
        self
    }

    /// Build options from a JSON object of primitive values
    ///
    /// `null` values are skipped; the `force_sign` key is taken as the
    /// control option instead of a parameter.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::Config("call options must be a JSON object".to_string()));
        };
        let mut opts = Self::new();
        for (key, value) in map {
            if key == FORCE_SIGN_KEY {
                opts.force_sign = Some(match value {
                    Value::Bool(b) => b,
                    Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
                    Value::String(s) => truthy(&s),
                    _ => false,
                });
                continue;
            }
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::Config(format!(
                        "call option {:?} must be a string, number or boolean",
                        key
                    )))
                }
            };
            opts = opts.param(key, value);
        }
        Ok(opts)
    }
}

fn truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false")
}
