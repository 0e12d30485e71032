//! # porter
//!
//! A minimal HTTP/1.1 server. One request per connection, parsed by hand
//! off the raw TCP stream, answered, closed.
//!
//! ## What it serves
//!
//! | Request | Answer |
//! |---|---|
//! | `POST /user/create…` | registers the form's user, `302` → `/index.html` (back to `/user/form.html` without a `userId`) |
//! | `POST /user/login…` | checks credentials, sets `logined`, `302` |
//! | `GET /user/list.html` | user table if `logined=true`, else `302` → `/user/login.html` |
//! | `GET` with `Accept: text/css…` | static file as `text/css` |
//! | any other `GET` | static file as `text/html` |
//! | anything else | `200 Hello World` |
//!
//! ## What it skips
//!
//! Keep-alive, pipelining, chunked bodies, ranges, compression and TLS. The
//! body is read by `Content-Length` only. There is no read timeout: a client
//! that never finishes its headers holds its worker until it disconnects.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use porter::{App, MemoryStore, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), porter::Error> {
//!     let app = App::new(Arc::new(MemoryStore::new()), "./webapp");
//!     Server::bind("127.0.0.1:8080").await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod render;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod config;
pub mod cookie;
pub mod form;
pub mod header;

pub use config::Config;
pub use error::{DecodeError, Error};
pub use handler::App;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, Response, ResponseBuilder};
pub use router::{Matcher, Route, Router};
pub use server::{Server, serve_connection};
pub use status::Status;
pub use store::{MemoryStore, User, UserStore};
