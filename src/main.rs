//! porter binary.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -- --webapp ./webapp
//!
//! Try:
//!   curl -i -d 'userId=javajigi&password=pw&name=Jaesung&email=j%40slipp.net' \
//!        http://localhost:8080/user/create
//!   curl -i -d 'userId=javajigi&password=pw' http://localhost:8080/user/login
//!   curl -i -H 'Cookie: logined=true' http://localhost:8080/user/list.html

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use porter::{App, Config, Error, MemoryStore, Server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Config::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    info!(webapp = %config.webapp.display(), "serving static files");
    let server = Server::bind(&config.addr).await?;
    let app = App::new(Arc::new(MemoryStore::new()), config.webapp);
    server.serve(app).await
}
