//! HTTP status codes as a typed enum.
//!
//! Only the codes porter actually sends are listed. Use [`Status`] with
//! `Response::builder().status()`:
//!
//! ```rust
//! use porter::{Response, Status};
//!
//! Response::builder()
//!     .status(Status::Found)
//!     .header("Location", "/index.html")
//!     .no_body();
//! ```

/// Status codes emitted by the request pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,       // 200
    Found,    // 302
    NotFound, // 404
}

impl Status {
    /// The numeric code.
    pub fn code(self) -> u16 {
        self.into()
    }

    /// The reason phrase written after the code on the status line.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok       => "OK",
            Self::Found    => "Found",
            Self::NotFound => "Not Found",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok       => 200,
            Status::Found    => 302,
            Status::NotFound => 404,
        }
    }
}
