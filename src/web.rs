#![cfg(not(tarpaulin_include))]

use clap::Parser;
use fruzy_invoice::{Config, app};

/// Main entry point for the invoice web server
///
/// Reads the listen address and upload cap from the command line, sets up
/// logging (`RUST_LOG` overrides the default `info` level) and serves the
/// invoice page until the process is stopped.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::parse();
    log::info!(
        "Starting invoice server on {}:{} (uploads up to {} MiB)",
        config.host,
        config.port,
        config.max_upload_mb
    );

    app::run(config).await
}
