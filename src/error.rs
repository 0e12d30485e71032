//! Unified error type.

use std::path::PathBuf;

/// The error type returned by porter's fallible operations.
///
/// Application-level outcomes (redirects, a missing static file) are
/// expressed as [`Response`](crate::Response) values, not as `Error`s. This
/// type surfaces failures that end a connection without a response: a
/// request that cannot be framed, a file that cannot be read, a stream that
/// rejects reads or writes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The start line had fewer than two space-separated tokens.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// A header line had no `": "` separator.
    #[error("malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    /// A form or cookie component could not be percent-decoded.
    #[error("cannot decode {input:?}: {source}")]
    Decode {
        input: String,
        #[source]
        source: DecodeError,
    },

    /// The static file does not exist under the document root.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The static file exists but could not be read.
    #[error("io: {0}")]
    Io(#[source] std::io::Error),

    /// Reading from or writing to the client connection failed.
    #[error("stream: {0}")]
    Stream(#[source] std::io::Error),

    /// The listener could not be bound.
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a percent-encoded component was rejected.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A `%` at this byte offset is not followed by two hex digits.
    #[error("malformed escape at byte {0}")]
    MalformedEscape(usize),

    /// The escapes decode to bytes that are not UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}
