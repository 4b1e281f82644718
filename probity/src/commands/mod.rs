// probity/src/commands/mod.rs

pub mod check;
pub mod run;

use anyhow::Context;
use probity_core::infrastructure::config::{self, WarehouseConfig};

use crate::cli::ConnectionArgs;

/// Settings resolved once: profile file, then environment, then flags.
pub fn resolve_config(args: &ConnectionArgs) -> anyhow::Result<WarehouseConfig> {
    let mut config = config::resolve(
        args.config.as_deref(),
        &args.profile,
        args.target.as_deref(),
        |key| std::env::var(key).ok(),
    )
    .with_context(|| match &args.config {
        Some(path) => format!("Failed to load connection settings from {:?}", path),
        None => "Failed to load connection settings".to_string(),
    })?;

    if let Some(database) = &args.database {
        config.database = Some(database.clone());
    }
    if let Some(schema) = &args.schema {
        config.schema = Some(schema.clone());
    }
    Ok(config)
}
