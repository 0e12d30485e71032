//! TCP accept loop, per-connection workers and graceful shutdown.
//!
//! Every accepted connection gets its own task, reads exactly one request,
//! writes at most one response and closes. There is no keep-alive.
//!
//! # Failure boundary
//!
//! All errors from reading, handling and writing are returned to
//! [`serve_connection`] and logged there. A failed connection is simply
//! closed; the accept loop and other connections carry on.
//!
//! # Graceful shutdown
//!
//! On **SIGTERM** or **SIGINT** the server:
//! 1. Immediately stops `listener.accept()` — no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpListener;
use tracing::{Instrument, debug, error, info, info_span};

use crate::error::Error;
use crate::handler::App;
use crate::request::Request;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds the listening socket to `addr` (`host:port`).
    pub async fn bind(addr: &str) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr: addr.to_owned(), source })?;
        Ok(Self { listener })
    }

    /// The address actually bound; useful after binding port `0`.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        self.listener.local_addr().map_err(Error::Stream)
    }

    /// Accepts connections until SIGTERM / Ctrl-C, then drains.
    pub async fn serve(self, app: App) -> Result<(), Error> {
        self.serve_until(app, shutdown_signal()).await
    }

    /// Accepts connections until `shutdown` resolves, then waits for every
    /// in-flight connection to finish.
    pub async fn serve_until<F>(self, app: App, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let app = Arc::new(app);
        info!(addr = %self.local_addr()?, "porter listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting even when
                // more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };
                    let app = Arc::clone(&app);
                    let span = info_span!("connection", ip = %peer.ip(), port = peer.port());
                    tasks.spawn(
                        async move {
                            debug!("new client connected");
                            let (read, write) = stream.into_split();
                            serve_connection(&app, read, write).await;
                        }
                        .instrument(span),
                    );
                }

                // Reap finished tasks so the set does not grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("porter stopped");
        Ok(())
    }
}

/// Reads one request from `read`, answers it on `write` and logs any
/// failure. Never panics on client input.
pub async fn serve_connection<R, W>(app: &App, read: R, mut write: W)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = exchange(app, read, &mut write).await {
        error!("{e}");
    }
}

async fn exchange<R, W>(app: &App, read: R, write: &mut W) -> Result<(), Error>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(read);
    let req = Request::read_from(&mut reader).await?;
    info!(method = %req.method(), target = req.target(), "request");

    let resp = app.handle(&req).await?;
    resp.write_to(write).await.map_err(Error::Stream)?;
    debug!(status = resp.status().code(), bytes = resp.body().len(), "response written");
    Ok(())
}

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available. If a handler cannot be installed the
/// error is logged and that signal is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(e) => {
                error!("cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
