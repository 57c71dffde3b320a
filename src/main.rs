//! # Advertisement Data Layer CLI
//!
//! Loads configuration, initializes logging and the connection pool, then
//! runs the requested operator command.

use adverts::{
    cli::{self, Cli},
    config::ConfigLoader,
    db, telemetry,
};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;

    telemetry::init_tracing(&config).context("initializing logging")?;
    tracing::debug!(
        profile = %config.profile,
        config = %config.redacted_json()?,
        "Loaded configuration"
    );

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    for line in cli::run(args.command, &config, db).await? {
        println!("{line}");
    }

    Ok(())
}
