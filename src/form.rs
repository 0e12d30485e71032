//! `application/x-www-form-urlencoded` decoding.
//!
//! Used for POST bodies. The same rules apply to a URL query string.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{DecodeError, Error};

/// Decoded `key=value` pairs. A repeated key keeps its last value.
pub type FormMap = HashMap<String, String>;

/// Decodes `a=1&b=2` into a [`FormMap`].
///
/// Each `&`-separated token is split on its first `=`; a token without `=`
/// maps to an empty value and empty tokens are ignored. Keys and values are
/// percent-decoded. A component with a malformed escape, or one that does not
/// decode to UTF-8, is kept in its raw form and a warning is logged; the rest
/// of the map is unaffected.
///
/// ```rust
/// let form = porter::form::decode("name=J%C3%BCrgen&email=j%40x.com");
/// assert_eq!(form["name"], "Jürgen");
/// assert_eq!(form["email"], "j@x.com");
/// ```
pub fn decode(raw: &str) -> FormMap {
    raw.split('&')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (k, v) = token.split_once('=').unwrap_or((token, ""));
            (decode_or_raw(k), decode_or_raw(v))
        })
        .collect()
}

/// Percent-decodes one form component, treating `+` as a space.
pub fn decode_component(raw: &str) -> Result<String, Error> {
    strict_decode(&raw.replace('+', " "))
        .map_err(|source| Error::Decode { input: raw.to_owned(), source })
}

/// Reverses `%XY` escapes and checks the result is UTF-8. Every `%` must be
/// followed by two hex digits.
pub fn percent_decode(raw: &str) -> Result<String, Error> {
    strict_decode(raw).map_err(|source| Error::Decode { input: raw.to_owned(), source })
}

fn strict_decode(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(DecodeError::MalformedEscape(i));
        }
    }
    Ok(urlencoding::decode(raw)?.into_owned())
}

fn decode_or_raw(raw: &str) -> String {
    decode_component(raw).unwrap_or_else(|e| {
        warn!("{e}; keeping raw value");
        raw.to_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pairs() {
        let form = decode("a=1&b=2");
        assert_eq!(form.len(), 2);
        assert_eq!(form["a"], "1");
        assert_eq!(form["b"], "2");
    }

    #[test]
    fn last_duplicate_wins() {
        let form = decode("a=1&a=2");
        assert_eq!(form.len(), 1);
        assert_eq!(form["a"], "2");
    }

    #[test]
    fn missing_equals_gives_empty_value() {
        let form = decode("flag&x=1");
        assert_eq!(form["flag"], "");
        assert_eq!(form["x"], "1");
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        assert_eq!(decode("expr=a=b")["expr"], "a=b");
    }

    #[test]
    fn empty_input_is_empty_map() {
        assert!(decode("").is_empty());
        assert!(decode("&&").is_empty());
    }

    #[test]
    fn plus_is_space() {
        assert_eq!(decode("name=Jane+Doe")["name"], "Jane Doe");
        assert_eq!(decode("op=%2B")["op"], "+");
    }

    #[test]
    fn percent_round_trip() {
        for s in ["hello world", "a&b=c", "100% sure", "javajigi@slipp.net", "한글", "x+y"] {
            let encoded = urlencoding::encode(s);
            assert_eq!(decode_component(&encoded).unwrap(), s);
        }
    }

    #[test]
    fn invalid_utf8_keeps_raw_value_for_that_pair_only() {
        let form = decode("bad=%FF%FE&good=%41");
        assert_eq!(form["bad"], "%FF%FE");
        assert_eq!(form["good"], "A");
    }

    #[test]
    fn malformed_escape_keeps_whole_component_raw() {
        let form = decode("x=a+%20%ZZ&y=%2&z=50%25");
        assert_eq!(form["x"], "a+%20%ZZ");
        assert_eq!(form["y"], "%2");
        assert_eq!(form["z"], "50%");
    }

    #[test]
    fn malformed_escape_is_a_decode_error() {
        assert!(matches!(
            decode_component("%ZZ"),
            Err(Error::Decode { source: DecodeError::MalformedEscape(0), .. })
        ));
        assert!(matches!(
            percent_decode("ab%4"),
            Err(Error::Decode { source: DecodeError::MalformedEscape(2), .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        assert!(matches!(
            decode_component("%C3%28"),
            Err(Error::Decode { input, source: DecodeError::Utf8(_) }) if input == "%C3%28"
        ));
    }
}
