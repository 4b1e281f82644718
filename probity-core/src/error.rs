// probity-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ProbityError {
    // --- DOMAIN (identifiers, result shapes) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (driver, IO, config) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<duckdb::Error> for ProbityError {
    fn from(err: duckdb::Error) -> Self {
        ProbityError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(err)))
    }
}
