//! Header line parsing.

use crate::error::Error;

/// A single header as it arrived: `(name, value)`.
///
/// Names keep their original spelling. Lookups on a
/// [`Request`](crate::Request) compare names exactly.
pub type HeaderPair = (String, String);

/// Splits one header line on its first `": "`.
///
/// The value keeps everything after the separator, including further
/// `": "` sequences.
///
/// ```rust
/// let (k, v) = porter::header::parse("Host: localhost:8080").unwrap();
/// assert_eq!((k.as_str(), v.as_str()), ("Host", "localhost:8080"));
/// ```
pub fn parse(line: &str) -> Result<HeaderPair, Error> {
    line.split_once(": ")
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| Error::MalformedHeaderLine(line.to_owned()))
}
