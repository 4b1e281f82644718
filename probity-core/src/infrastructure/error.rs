// probity-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(probity::infra::database::duckdb),
        help("The warehouse rejected the query (missing object, permission, type mismatch...).")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(probity::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(probity::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(probity::infra::config))]
    ConfigError(String),

    #[error("Connection profile not found: {0}")]
    #[diagnostic(code(probity::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Missing connection setting '{0}'")]
    #[diagnostic(
        code(probity::infra::missing_setting),
        help("Set it in the connection profile, the PROBITY_* environment or the matching CLI flag.")
    )]
    MissingSetting(&'static str),

    #[error("Unsupported engine '{0}'")]
    #[diagnostic(code(probity::infra::engine), help("Supported engines: duckdb."))]
    UnsupportedEngine(String),
}

// Shortcut for `?` on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

impl From<validator::ValidationErrors> for InfrastructureError {
    fn from(err: validator::ValidationErrors) -> Self {
        InfrastructureError::ConfigError(err.to_string())
    }
}
