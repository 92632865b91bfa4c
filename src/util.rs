//! Utility functions

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query string value
pub fn encode_query_value(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, QUERY_VALUE).to_string()
}

/// Join key/value pairs into a query string, encoding keys and values
pub fn query_string<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                encode_query_value(k.as_ref()),
                encode_query_value(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Remove every whitespace character from a stored secret
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Replace the value of `auth_token` in a URL so it can be logged
pub fn redact_token(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("auth_token=") {
                "auth_token=****".to_string()
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

/// Generate a new request ID
pub fn generate_request_id() -> String {
    format!("flickr-reflect-{}", uuid::Uuid::new_v4())
}
