// probity-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;

pub use adapters::connect;
pub use adapters::duckdb::DuckDBConnector;
pub use config::WarehouseConfig;
