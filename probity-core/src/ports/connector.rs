// probity-core/src/ports/connector.rs

// What the check catalog needs from a warehouse connection, without knowing
// which driver provides it. One adapter per driver lives in infrastructure/adapters.

use crate::domain::error::DomainError;
use crate::domain::table::{Table, Value};
use crate::error::ProbityError;
use async_trait::async_trait;

/// A value bound to a `?` placeholder instead of being spliced into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Integer(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Param::Integer(i64::from(v))
    }
}

impl From<u32> for Param {
    fn from(v: u32) -> Self {
        Param::Integer(i64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs a read-only query and materializes every row, with column names
    /// in result order. Column metadata is returned even when no row matches.
    async fn query(&self, sql: &str, params: &[Param]) -> Result<Table, ProbityError>;

    fn engine_name(&self) -> &str;

    /// Cursor-style access: the first row of the result.
    async fn query_row(&self, sql: &str, params: &[Param]) -> Result<Vec<Value>, ProbityError> {
        let table = self.query(sql, params).await?;
        table
            .into_rows()
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::EmptyResult(sql.trim().to_string()).into())
    }
}
