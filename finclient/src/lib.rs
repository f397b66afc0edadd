//! FinClient Application Library
//!
//! Client book service, configuration and command-line front end.
//!
//! # Architecture
//!
//! ```text
//! CLI → ClientBook → OrderSet → ClearingEngine
//!           ↓
//!   SnapshotRepository (JSON file)
//! ```
//!
//! # Components
//!
//! - **ClientBook**: applies commands to the order set and persists accepted ones
//! - **CLI**: clap front end rendering command output
//! - **Config**: Environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use finclient::{ClientBook, Config};
//! use finclient_store::JsonFileStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("Failed to load config");
//!     let book = ClientBook::open(JsonFileStore::new(&config.data_path)).await.expect("open");
//!     println!("{:?}", book.clearing_price());
//! }
//! ```

#![warn(clippy::all)]

pub mod book;
pub mod cli;
pub mod config;
pub mod error;

pub use book::ClientBook;
pub use cli::{execute, Cli, Command};
pub use config::{Config, Environment, LogFormat};
pub use error::{AppError, AppResult};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("finclient=info".parse()?);

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry().with(filter).with(pretty).with(json).try_init()?;
    Ok(())
}
