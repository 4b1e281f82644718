// probity-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid identifier: '{0}'")]
    #[diagnostic(
        code(probity::domain::identifier),
        help("Schema, table and column names must match [A-Za-z_][A-Za-z0-9_$]* (max 255 chars).")
    )]
    InvalidIdentifier(String),

    #[error("Query returned no rows: {0}")]
    #[diagnostic(code(probity::domain::empty_result))]
    EmptyResult(String),

    #[error("Unexpected value in column '{column}': expected {expected}, got {found}")]
    #[diagnostic(code(probity::domain::unexpected_value))]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("Row has {found} cells but the result has {expected} columns")]
    #[diagnostic(code(probity::domain::row_width))]
    RowWidth { expected: usize, found: usize },
}
