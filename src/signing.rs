//! Request signing
//!
//! Flickr verifies signed calls by recomputing an MD5 digest over the shared
//! secret followed by every `key+value` pair, sorted, with no separators.

use md5::{Digest, Md5};

/// Compute the `api_sig` value for a parameter set.
///
/// The result depends only on the set of pairs, not on their order.
///
/// ```
/// let a = flickr_reflect::sign("secret", [("b", "2"), ("a", "1")]);
/// let b = flickr_reflect::sign("secret", [("a", "1"), ("b", "2")]);
/// assert_eq!(a, b);
/// ```
pub fn sign<I, K, V>(secret: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| {
            let key = k.as_ref().to_string();
            let joined = format!("{}{}", key, v.as_ref());
            (key, joined)
        })
        .collect();
    pairs.sort();

    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for (_, joined) in &pairs {
        hasher.update(joined.as_bytes());
    }
    hex::encode(hasher.finalize())
}
