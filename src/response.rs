//! Outgoing HTTP response plan and its serialisation.
//!
//! A [`Response`] is a plan: status, ordered headers, body. Nothing is added
//! on the way out. Whatever headers the plan carries are written, in order,
//! and nothing else. The body-terminating builder methods are what add
//! `Content-Type` and an exact `Content-Length`; redirects carry `Location`
//! and no body.

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::header::HeaderPair;
use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values used with [`ResponseBuilder::bytes`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Css,  // text/css;charset=utf-8
    Html, // text/html;charset=utf-8
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css  => "text/css;charset=utf-8",
            Self::Html => "text/html;charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use porter::{ContentType, Response, Status};
///
/// Response::html("<h1>hi</h1>");
/// Response::redirect("/index.html");
///
/// Response::builder()
///     .status(Status::Found)
///     .header("Location", "/index.html")
///     .header("Set-Cookie", "logined=true")
///     .no_body();
///
/// Response::builder()
///     .bytes(ContentType::Css, b"body{}".to_vec());
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    status: Status,
    headers: Vec<HeaderPair>,
    body: Bytes,
}

impl Response {
    /// `200 OK` — `text/html;charset=utf-8`.
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::builder().bytes(ContentType::Html, body)
    }

    /// `302 Found` to `location`, no body.
    pub fn redirect(location: &str) -> Self {
        Self::builder().redirect(location).no_body()
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status(&self) -> Status { self.status }
    pub fn headers(&self) -> &[HeaderPair] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// First header named exactly `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of headers named exactly `name`, in order.
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Writes the status line, the headers in plan order, a blank line and
    /// the body, then flushes.
    pub async fn write_to<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status.code(), self.status.reason());
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        writer.write_all(head.as_bytes()).await?;
        writer.write_all(&self.body).await?;
        writer.flush().await
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by [`bytes`](Self::bytes) or [`no_body`](Self::no_body).
pub struct ResponseBuilder {
    headers: Vec<HeaderPair>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// `302 Found` with a `Location` header.
    pub fn redirect(self, location: &str) -> Self {
        self.status(Status::Found).header("Location", location)
    }

    /// Terminate with a typed body. `Content-Type` and `Content-Length` are
    /// placed ahead of any headers added so far.
    pub fn bytes(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        let body = body.into();
        let mut headers = vec![
            ("Content-Type".to_owned(), content_type.as_str().to_owned()),
            ("Content-Length".to_owned(), body.len().to_string()),
        ];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }

    /// Terminate with no body and no length header (e.g. a redirect).
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn wire(resp: &Response) -> Vec<u8> {
        let mut out = Vec::new();
        resp.write_to(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn redirect_is_byte_exact() {
        let resp = Response::builder()
            .redirect("/index.html")
            .header("Set-Cookie", "logined=true")
            .no_body();
        assert_eq!(
            wire(&resp).await,
            b"HTTP/1.1 302 Found\r\nLocation: /index.html\r\nSet-Cookie: logined=true\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn body_follows_blank_line_with_exact_length() {
        let resp = Response::html("h\u{e9}llo");
        assert_eq!(
            wire(&resp).await,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html;charset=utf-8\r\nContent-Length: 6\r\n\r\nh\u{e9}llo"
                .as_bytes()
        );
    }

    #[test]
    fn redirect_has_no_body_or_length() {
        let resp = Response::redirect("/user/login.html");
        assert_eq!(resp.status(), Status::Found);
        assert_eq!(resp.header("Location"), Some("/user/login.html"));
        assert_eq!(resp.header("Content-Length"), None);
        assert!(resp.body().is_empty());
    }

    #[test]
    fn header_all_keeps_duplicates_in_order() {
        let resp = Response::builder()
            .header("Set-Cookie", "a=1")
            .header("Set-Cookie", "b=2")
            .no_body();
        assert_eq!(resp.header_all("Set-Cookie").collect::<Vec<_>>(), ["a=1", "b=2"]);
    }
}
