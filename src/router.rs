//! Ordered request dispatch table.
//!
//! Rules are checked top to bottom and the first match wins. A request that
//! matches no rule goes to [`Route::Fallback`]. Routing looks at the method,
//! the raw target and the headers only; it never touches the body or the
//! store.

use crate::method::Method;
use crate::request::Request;

/// What a request is dispatched to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    /// Form sign-up; mutates the store.
    CreateUser,
    /// Credential check; sets the `logined` cookie.
    Login,
    /// User table, gated on the `logined` cookie.
    ListUsers,
    /// Static file served as `text/css`.
    Stylesheet,
    /// Static file served as `text/html`.
    StaticFile,
    /// Fixed plaintext body.
    Fallback,
}

/// How a rule inspects a request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Matcher {
    /// Target starts with the given prefix.
    Prefix(&'static str),
    /// Target is exactly the given path.
    Exact(&'static str),
    /// The `Accept` header starts with the given media type.
    Accept(&'static str),
    /// Every request.
    Any,
}

impl Matcher {
    fn matches(&self, req: &Request) -> bool {
        match self {
            Self::Prefix(p) => req.target().starts_with(p),
            Self::Exact(p)  => req.target() == *p,
            Self::Accept(t) => req.header("Accept").unwrap_or("").starts_with(t),
            Self::Any       => true,
        }
    }
}

/// The dispatch table.
///
/// [`Router::new`] builds the standard table:
///
/// | # | Method | Matcher | Route |
/// |---|---|---|---|
/// | 1 | POST | target starts with `/user/create` | [`Route::CreateUser`] |
/// | 2 | POST | target starts with `/user/login` | [`Route::Login`] |
/// | 3 | GET | target is `/user/list.html` | [`Route::ListUsers`] |
/// | 4 | GET | `Accept` starts with `text/css` | [`Route::Stylesheet`] |
/// | 5 | GET | anything | [`Route::StaticFile`] |
///
/// ```rust
/// use porter::{Method, Request, Route, Router};
///
/// let req = Request::new(Method::Post, "/user/create", vec![], "userId=a");
/// assert_eq!(Router::new().route(&req), Route::CreateUser);
/// ```
#[derive(Clone, Debug)]
pub struct Router {
    rules: Vec<(Method, Matcher, Route)>,
}

impl Router {
    pub fn new() -> Self {
        Self::empty()
            .on(Method::Post, Matcher::Prefix("/user/create"), Route::CreateUser)
            .on(Method::Post, Matcher::Prefix("/user/login"),  Route::Login)
            .on(Method::Get,  Matcher::Exact("/user/list.html"), Route::ListUsers)
            .on(Method::Get,  Matcher::Accept("text/css"),     Route::Stylesheet)
            .on(Method::Get,  Matcher::Any,                    Route::StaticFile)
    }

    /// A table with no rules: everything falls back.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule below the existing ones. Returns `self` for chaining.
    pub fn on(mut self, method: Method, matcher: Matcher, route: Route) -> Self {
        self.rules.push((method, matcher, route));
        self
    }

    /// The route of the first rule matching `req`.
    pub fn route(&self, req: &Request) -> Route {
        self.rules.iter()
            .find(|(method, matcher, _)| method == req.method() && matcher.matches(req))
            .map_or(Route::Fallback, |&(_, _, route)| route)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn req(method: Method, target: &str, headers: &[(&str, &str)]) -> Request {
        let headers = headers.iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Request::new(method, target, headers, Bytes::new())
    }

    #[test]
    fn post_rules_match_on_prefix() {
        let r = Router::new();
        assert_eq!(r.route(&req(Method::Post, "/user/create?x", &[])), Route::CreateUser);
        assert_eq!(r.route(&req(Method::Post, "/user/login", &[])), Route::Login);
        assert_eq!(r.route(&req(Method::Post, "/user/login_failed.html", &[])), Route::Login);
    }

    #[test]
    fn list_requires_exact_target() {
        let r = Router::new();
        assert_eq!(r.route(&req(Method::Get, "/user/list.html", &[])), Route::ListUsers);
        assert_eq!(r.route(&req(Method::Get, "/user/list.html?a=1", &[])), Route::StaticFile);
    }

    #[test]
    fn list_rule_is_checked_before_accept() {
        let r = Router::new();
        let css = [("Accept", "text/css,*/*;q=0.1")];
        assert_eq!(r.route(&req(Method::Get, "/user/list.html", &css)), Route::ListUsers);
        assert_eq!(r.route(&req(Method::Get, "/css/styles.css", &css)), Route::Stylesheet);
    }

    #[test]
    fn accept_header_name_is_case_sensitive() {
        let r = Router::new();
        let lower = [("accept", "text/css")];
        assert_eq!(r.route(&req(Method::Get, "/css/a.css", &lower)), Route::StaticFile);
    }

    #[test]
    fn other_methods_fall_back() {
        let r = Router::new();
        assert_eq!(r.route(&req(Method::Put, "/user/create", &[])), Route::Fallback);
        assert_eq!(r.route(&req(Method::Post, "/index.html", &[])), Route::Fallback);
        assert_eq!(
            r.route(&req(Method::Extension("BREW".into()), "/", &[])),
            Route::Fallback
        );
    }

    #[test]
    fn get_on_post_paths_is_static() {
        let r = Router::new();
        assert_eq!(r.route(&req(Method::Get, "/user/create", &[])), Route::StaticFile);
    }

    #[test]
    fn empty_table_always_falls_back() {
        assert_eq!(Router::empty().route(&req(Method::Get, "/", &[])), Route::Fallback);
    }
}
