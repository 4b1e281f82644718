// probity-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;

use tracing::{debug, info, instrument};
use validator::Validate;

use crate::infrastructure::config::warehouse::WarehouseConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::Connector;
use self::duckdb::DuckDBConnector;

/// Connection provider: opens the driver selected by `config.engine`.
#[instrument(skip(config), fields(engine = %config.engine))]
pub fn connect(config: &WarehouseConfig) -> Result<Box<dyn Connector>, InfrastructureError> {
    config.validate()?;

    match config.engine.to_ascii_lowercase().as_str() {
        "duckdb" => {
            let db_path = config
                .database
                .as_deref()
                .ok_or(InfrastructureError::MissingSetting("database"))?;

            let unused: Vec<&str> = [
                ("user", config.user.is_some()),
                ("password", config.password.is_some()),
                ("account", config.account.is_some()),
                ("warehouse", config.warehouse.is_some()),
            ]
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect();
            if !unused.is_empty() {
                debug!(settings = ?unused, "Settings ignored by the DuckDB driver");
            }

            info!(database = db_path, "🦆 Opening DuckDB (read-only)");
            Ok(Box::new(DuckDBConnector::open_read_only(db_path)?))
        }
        other => Err(InfrastructureError::UnsupportedEngine(other.to_string())),
    }
}
