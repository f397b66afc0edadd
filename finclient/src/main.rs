//! FinClient command-line entry point
//!
//! # Usage
//!
//! ```bash
//! # List parties sorted by order price
//! cargo run -p finclient -- list --sort price
//!
//! # Set an order and show the clearing price
//! cargo run -p finclient -- order "Alex Yeoh" "BUY 10 @ $5.50"
//! cargo run -p finclient -- clearing
//! ```
//!
//! # Environment Variables
//!
//! - `FINCLIENT_ENV`: Environment (test, development, production)
//! - `FINCLIENT_DATA_PATH`: Snapshot file (default: data/finclient.json)
//! - `FINCLIENT_LOG_FORMAT`: pretty or json (default: pretty)
//! - `FINCLIENT_UPCOMING_COUNT`: Default upcoming list size (default: 5)

use clap::Parser;
use finclient::{execute, init_tracing, Cli, ClientBook, Config};
use finclient_store::JsonFileStore;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    init_tracing(config.log_format)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        data_path = %config.data_path.display(),
        "FinClient"
    );

    let mut book = ClientBook::open(JsonFileStore::new(&config.data_path)).await?;
    let today = chrono::Local::now().date_naive();

    let output = execute(&mut book, cli.command, today, config.upcoming_count).await?;
    println!("{}", output);

    Ok(())
}
