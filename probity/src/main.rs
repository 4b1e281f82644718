// probity/src/main.rs

mod cli;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use probity_core::infrastructure::connect;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--format json` stays parseable.
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::resolve_config(&cli.connection)?;
    tracing::debug!(?config, "Connection settings resolved");

    let connector = connect(&config).with_context(|| {
        format!(
            "Failed to connect to {} ({})",
            config.database.as_deref().unwrap_or("<no database>"),
            config.engine
        )
    })?;
    let schema = config.schema_or_default();

    match cli.command.planned_check() {
        None => commands::run::execute(connector.as_ref(), schema, cli.format).await,
        Some(check) => {
            commands::check::execute(connector.as_ref(), schema, check, cli.format).await
        }
    }
}
