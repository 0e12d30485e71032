//! `Cookie` / `Set-Cookie` header values.

use std::collections::HashMap;

use crate::form::percent_decode;
use tracing::warn;

/// Decoded cookies from a `Cookie` header.
pub type CookieMap = HashMap<String, String>;

/// Name of the session flag cookie set on login.
pub const LOGINED: &str = "logined";

/// Decodes `a=1; b=2` into a [`CookieMap`].
///
/// Tokens are split on `;` and trimmed before splitting on the first `=`.
/// Components are percent-decoded (`+` stays a `+`) with the same fallback
/// as form fields: an undecodable component is kept raw.
pub fn decode(raw: &str) -> CookieMap {
    raw.split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (k, v) = token.split_once('=').unwrap_or((token, ""));
            (decode_or_raw(k), decode_or_raw(v))
        })
        .collect()
}

/// Builds a `Set-Cookie` value from pairs, in order: `a=1; b=2`.
///
/// ```rust
/// assert_eq!(porter::cookie::set_cookie([("logined", "true")]), "logined=true");
/// ```
pub fn set_cookie<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reads the `logined` flag. Only the exact value `true` counts as logged in.
pub fn is_logined(cookies: &CookieMap) -> bool {
    cookies.get(LOGINED).is_some_and(|v| v == "true")
}

fn decode_or_raw(raw: &str) -> String {
    percent_decode(raw).unwrap_or_else(|e| {
        warn!("cookie {e}; keeping raw value");
        raw.to_owned()
    })
}
