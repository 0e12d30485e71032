//! Incoming HTTP request type and the reader that frames it off the stream.

use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::{debug, warn};

use crate::error::Error;
use crate::header::{self, HeaderPair};
use crate::method::Method;

/// An incoming HTTP request, parsed from the raw TCP stream.
///
/// Immutable once read. One request is read per connection.
#[derive(Clone, Debug)]
pub struct Request {
    method: Method,
    target: String,
    version: Option<String>,
    headers: Vec<HeaderPair>,
    body: Bytes,
}

impl Request {
    pub fn new(
        method: Method,
        target: impl Into<String>,
        headers: Vec<HeaderPair>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            method,
            target: target.into(),
            version: None,
            headers,
            body: body.into(),
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn target(&self) -> &str { &self.target }
    pub fn version(&self) -> Option<&str> { self.version.as_deref() }
    pub fn headers(&self) -> &[HeaderPair] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The target without its `?query` suffix.
    pub fn path(&self) -> &str {
        self.target.split_once('?').map_or(&self.target, |(path, _)| path)
    }

    /// First header whose name is exactly `name`. Case-sensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `Content-Length` as a byte count, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        content_length(&self.headers)
    }

    /// Reads exactly one request from `reader`.
    ///
    /// Header lines are read up to the first empty line or end of stream.
    /// Lines without a `": "` separator are logged and skipped. The body is
    /// read only when `Content-Length` is a positive integer, and is cut
    /// short if the peer closes first.
    pub async fn read_from<R>(reader: &mut R) -> Result<Self, Error>
    where
        R: AsyncBufRead + Unpin,
    {
        let start = read_line(reader).await?.unwrap_or_default();
        let (method, target, version) = parse_request_line(&start)?;

        let mut headers = Vec::new();
        while let Some(line) = read_line(reader).await? {
            if line.is_empty() {
                break;
            }
            debug!("{line}");
            match header::parse(&line) {
                Ok(pair) => headers.push(pair),
                Err(e) => warn!("{e}; skipping"),
            }
        }

        let mut body = Vec::new();
        if let Some(len) = content_length(&headers).filter(|&n| n > 0) {
            (&mut *reader)
                .take(len as u64)
                .read_to_end(&mut body)
                .await
                .map_err(Error::Stream)?;
        }

        Ok(Self {
            method,
            target,
            version,
            headers,
            body: Bytes::from(body),
        })
    }
}

/// Splits `METHOD SP TARGET [SP VERSION]` on single spaces.
pub fn parse_request_line(line: &str) -> Result<(Method, String, Option<String>), Error> {
    let mut tokens = line.split(' ');
    let (Some(method), Some(target)) = (tokens.next(), tokens.next()) else {
        return Err(Error::MalformedRequestLine(line.to_owned()));
    };
    let Ok(method) = method.parse::<Method>();
    Ok((method, target.to_owned(), tokens.next().map(str::to_owned)))
}

fn content_length(headers: &[HeaderPair]) -> Option<usize> {
    headers.iter()
        .find(|(k, _)| k == "Content-Length")
        .and_then(|(_, v)| v.trim().parse().ok())
}

/// One line without its terminator, or `None` at end of stream. Bytes that
/// are not UTF-8 become U+FFFD.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await.map_err(Error::Stream)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read(raw: &[u8]) -> Result<Request, Error> {
        let mut reader = raw;
        Request::read_from(&mut reader).await
    }

    #[test]
    fn request_line_splits_method_target_version() {
        let (m, t, v) = parse_request_line("GET /index.html HTTP/1.1").unwrap();
        assert_eq!(m, Method::Get);
        assert_eq!(t, "/index.html");
        assert_eq!(v.as_deref(), Some("HTTP/1.1"));
    }

    #[test]
    fn request_line_without_version_is_accepted() {
        let (m, t, v) = parse_request_line("POST /user/create").unwrap();
        assert_eq!(m, Method::Post);
        assert_eq!(t, "/user/create");
        assert!(v.is_none());
    }

    #[test]
    fn request_line_with_one_token_is_malformed() {
        for line in ["GET", ""] {
            assert!(matches!(
                parse_request_line(line),
                Err(Error::MalformedRequestLine(_))
            ));
        }
    }

    #[tokio::test]
    async fn reads_headers_in_arrival_order() {
        let req = read(b"GET /a HTTP/1.1\r\nHost: x\r\nAccept: */*\r\nHost: y\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(req.headers().len(), 3);
        assert_eq!(req.headers()[1], ("Accept".into(), "*/*".into()));
        assert_eq!(req.header("Host"), Some("x"));
        assert!(req.body().is_empty());
    }

    #[tokio::test]
    async fn header_lookup_is_case_sensitive() {
        let req = read(b"GET / HTTP/1.1\r\ncookie: logined=true\r\n\r\n").await.unwrap();
        assert_eq!(req.header("Cookie"), None);
        assert_eq!(req.header("cookie"), Some("logined=true"));
    }

    #[tokio::test]
    async fn malformed_header_is_skipped() {
        let req = read(b"GET / HTTP/1.1\r\nbroken\r\nHost: x\r\n\r\n").await.unwrap();
        assert_eq!(req.headers(), &[("Host".to_owned(), "x".to_owned())]);
    }

    #[tokio::test]
    async fn body_is_bounded_by_content_length() {
        let req = read(b"POST /user/create HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcdef")
            .await
            .unwrap();
        assert_eq!(req.body(), b"abc");
        assert_eq!(req.content_length(), Some(3));
    }

    #[tokio::test]
    async fn non_numeric_content_length_means_no_body() {
        let req = read(b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\nabc").await.unwrap();
        assert!(req.body().is_empty());
    }

    #[tokio::test]
    async fn short_body_is_what_arrived() {
        let req = read(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc").await.unwrap();
        assert_eq!(req.body(), b"abc");
    }

    #[tokio::test]
    async fn end_of_stream_ends_headers() {
        let req = read(b"GET /x HTTP/1.1\nHost: a").await.unwrap();
        assert_eq!(req.header("Host"), Some("a"));
    }

    #[tokio::test]
    async fn non_utf8_header_value_is_read_lossily() {
        let req = read(b"GET /index.html HTTP/1.1\r\nUser-Agent: caf\xe9\r\nHost: x\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(req.header("User-Agent"), Some("caf\u{fffd}"));
        assert_eq!(req.header("Host"), Some("x"));
        assert_eq!(req.target(), "/index.html");
    }

    #[tokio::test]
    async fn empty_stream_is_malformed() {
        assert!(matches!(read(b"").await, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn path_drops_query() {
        let req = Request::new(Method::Get, "/index.html?x=1", Vec::new(), Bytes::new());
        assert_eq!(req.path(), "/index.html");
        assert_eq!(req.target(), "/index.html?x=1");
    }
}
