//! Runtime configuration.
//!
//! Every option can be given as a flag or through the environment:
//!
//! | Flag | Env | Default |
//! |---|---|---|
//! | `--addr` | `PORTER_ADDR` | `127.0.0.1:8080` |
//! | `--webapp` | `PORTER_WEBAPP` | `./webapp` |
//!
//! Log verbosity is read from `RUST_LOG` by the binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "porter", version, about = "Minimal HTTP/1.1 server with form sign-up and cookie login")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "PORTER_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: String,

    /// Directory static files are served from.
    #[arg(long, env = "PORTER_WEBAPP", default_value = "./webapp")]
    pub webapp: PathBuf,
}
