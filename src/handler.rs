//! Route execution.
//!
//! [`App`] owns everything a request can touch: the dispatch table, the user
//! store and the static document root. [`App::handle`] turns one [`Request`]
//! into one [`Response`] plan; it never writes to the connection.
//!
//! ```text
//! Request ──▶ Router::route ──▶ Route ──▶ App::<route handler> ──▶ Response
//!                                              │
//!                                   UserStore / document root
//! ```

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cookie::{self, LOGINED};
use crate::error::Error;
use crate::form;
use crate::render;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::router::{Route, Router};
use crate::status::Status;
use crate::store::{User, UserStore};

const FALLBACK_BODY: &str = "Hello World";
const NOT_FOUND_BODY: &str = "<h1>404 Not Found</h1>";
const SIGN_UP_FORM: &str = "/user/form.html";

/// The request pipeline's state, shared by every connection worker.
pub struct App {
    router: Router,
    store: Arc<dyn UserStore>,
    webapp: PathBuf,
}

impl App {
    /// An app with the standard [`Router`], serving static files from
    /// `webapp`.
    pub fn new(store: Arc<dyn UserStore>, webapp: impl Into<PathBuf>) -> Self {
        Self { router: Router::new(), store, webapp: webapp.into() }
    }

    /// Replaces the dispatch table.
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Produces the response plan for `req`.
    ///
    /// A missing static file becomes `404 Not Found`. Any other failure is
    /// returned, and the caller closes the connection without a response.
    pub async fn handle(&self, req: &Request) -> Result<Response, Error> {
        let route = self.router.route(req);
        debug!(?route, "dispatching");
        let result = match route {
            Route::CreateUser => Ok(self.create_user(req)),
            Route::Login      => Ok(self.login(req)),
            Route::ListUsers  => Ok(self.list_users(req)),
            Route::Stylesheet => self.static_file(req, ContentType::Css).await,
            Route::StaticFile => self.static_file(req, ContentType::Html).await,
            Route::Fallback   => Ok(Response::html(FALLBACK_BODY)),
        };
        match result {
            Err(Error::NotFound(path)) => {
                warn!(path = %path.display(), "static file not found");
                Ok(Response::builder()
                    .status(Status::NotFound)
                    .bytes(ContentType::Html, NOT_FOUND_BODY))
            }
            other => other,
        }
    }

    /// A form without a non-empty `userId` registers nothing and is sent
    /// back to the sign-up form.
    fn create_user(&self, req: &Request) -> Response {
        let mut form = form::decode(&body_text(req));
        let mut field = |name: &str| form.remove(name).unwrap_or_default();
        let user = User {
            user_id: field("userId"),
            password: field("password"),
            name: field("name"),
            email: field("email"),
        };
        if user.user_id.is_empty() {
            warn!("sign-up without userId");
            return Response::redirect(SIGN_UP_FORM);
        }
        info!(user_id = %user.user_id, "user created");
        self.store.add_user(user);
        Response::redirect("/index.html")
    }

    /// A missing `userId` or `password` field is a failed login.
    fn login(&self, req: &Request) -> Response {
        let form = form::decode(&body_text(req));
        let user_id = form.get("userId").map_or("", String::as_str);
        let password = form.get("password");

        let ok = !user_id.is_empty()
            && password.is_some_and(|password| {
                self.store
                    .find_user_by_id(user_id)
                    .is_some_and(|user| user.matches_password(password))
            });
        info!(user_id, ok, "login attempt");

        let (location, flag) = if ok {
            ("/index.html", "true")
        } else {
            ("/user/login_failed.html", "false")
        };
        Response::builder()
            .redirect(location)
            .header("Set-Cookie", &cookie::set_cookie([(LOGINED, flag)]))
            .no_body()
    }

    fn list_users(&self, req: &Request) -> Response {
        let cookies = cookie::decode(req.header("Cookie").unwrap_or(""));
        if !cookie::is_logined(&cookies) {
            return Response::redirect("/user/login.html");
        }
        Response::html(render::user_list(&self.store.find_all()))
    }

    async fn static_file(&self, req: &Request, content_type: ContentType) -> Result<Response, Error> {
        let path = resolve(&self.webapp, req.path())?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Response::builder().bytes(content_type, body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(path)),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Joins a request path under `root`.
///
/// `/` maps to `/index.html`. A path that tries to leave `root` (`..`) is
/// reported as not found.
fn resolve(root: &Path, path: &str) -> Result<PathBuf, Error> {
    let relative = match path.trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };
    let relative = Path::new(relative);
    if relative.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
        return Err(Error::NotFound(root.join(relative)));
    }
    Ok(root.join(relative))
}

fn body_text(req: &Request) -> Cow<'_, str> {
    String::from_utf8_lossy(req.body())
}
