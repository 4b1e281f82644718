// probity-core/src/application/suite.rs
//
// The standard validation run: a fixed sequence of catalog checks against one
// schema. A failing check is recorded and the run moves on.

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::application::checks::{
    DEFAULT_TASK_HISTORY_DAYS, check_duplicates, check_failed_tasks, check_nulls, check_outliers,
    check_referential_integrity, compare_row_counts,
};
use crate::domain::report::{NullCounts, RowCountComparison};
use crate::domain::table::Table;
use crate::error::ProbityError;
use crate::ports::connector::{Connector, Param};

/// One catalog invocation with its hard-coded arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedCheck {
    Duplicates {
        table: String,
        key_column: String,
    },
    Nulls {
        table: String,
    },
    ReferentialIntegrity {
        parent_table: String,
        child_table: String,
        parent_key: String,
        child_key: String,
    },
    RowCounts {
        left: String,
        right: String,
    },
    Outliers {
        table: String,
        column: String,
        min: Param,
        max: Param,
    },
    FailedTasks {
        days: u32,
    },
}

impl PlannedCheck {
    pub fn title(&self) -> &'static str {
        match self {
            PlannedCheck::Duplicates { .. } => "Duplicate Check",
            PlannedCheck::Nulls { .. } => "Null Check",
            PlannedCheck::ReferentialIntegrity { .. } => "Referential Integrity",
            PlannedCheck::RowCounts { .. } => "Row Count Comparison",
            PlannedCheck::Outliers { .. } => "Outlier Check",
            PlannedCheck::FailedTasks { .. } => "Failed Tasks",
        }
    }

    pub async fn run(
        &self,
        conn: &dyn Connector,
        schema: &str,
    ) -> Result<CheckOutcome, ProbityError> {
        let outcome = match self {
            PlannedCheck::Duplicates { table, key_column } => {
                CheckOutcome::Rows(check_duplicates(conn, schema, table, key_column).await?)
            }
            PlannedCheck::Nulls { table } => {
                CheckOutcome::NullCounts(check_nulls(conn, schema, table).await?)
            }
            PlannedCheck::ReferentialIntegrity {
                parent_table,
                child_table,
                parent_key,
                child_key,
            } => CheckOutcome::Rows(
                check_referential_integrity(
                    conn,
                    schema,
                    parent_table,
                    child_table,
                    parent_key,
                    child_key,
                )
                .await?,
            ),
            PlannedCheck::RowCounts { left, right } => {
                CheckOutcome::RowCounts(compare_row_counts(conn, schema, left, right).await?)
            }
            PlannedCheck::Outliers {
                table,
                column,
                min,
                max,
            } => CheckOutcome::Rows(
                check_outliers(conn, schema, table, column, min.clone(), max.clone()).await?,
            ),
            PlannedCheck::FailedTasks { days } => {
                CheckOutcome::Rows(check_failed_tasks(conn, schema, *days).await?)
            }
        };
        Ok(outcome)
    }
}

/// The three result shapes of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum CheckOutcome {
    Rows(Table),
    NullCounts(NullCounts),
    RowCounts(RowCountComparison),
}

#[derive(Debug)]
pub struct CheckReport {
    pub title: &'static str,
    pub outcome: Result<CheckOutcome, ProbityError>,
    pub duration: Duration,
}

impl CheckReport {
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSuite {
    pub schema: String,
    pub checks: Vec<PlannedCheck>,
}

impl ValidationSuite {
    /// The stock ORDERS / CUSTOMERS run.
    pub fn standard(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            checks: vec![
                PlannedCheck::Duplicates {
                    table: "ORDERS".into(),
                    key_column: "order_id".into(),
                },
                PlannedCheck::Nulls {
                    table: "ORDERS".into(),
                },
                PlannedCheck::ReferentialIntegrity {
                    parent_table: "CUSTOMERS".into(),
                    child_table: "ORDERS".into(),
                    parent_key: "customer_id".into(),
                    child_key: "customer_id".into(),
                },
                PlannedCheck::RowCounts {
                    left: "ORDERS_STG".into(),
                    right: "ORDERS".into(),
                },
                PlannedCheck::Outliers {
                    table: "ORDERS".into(),
                    column: "amount".into(),
                    min: Param::Integer(0),
                    max: Param::Integer(10000),
                },
                PlannedCheck::FailedTasks {
                    days: DEFAULT_TASK_HISTORY_DAYS,
                },
            ],
        }
    }

    /// Runs every check in order on the one connection.
    #[instrument(skip(self, conn), fields(schema = %self.schema, engine = conn.engine_name()))]
    pub async fn run(&self, conn: &dyn Connector) -> Vec<CheckReport> {
        let mut reports = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let start = Instant::now();
            info!(check = check.title(), "▶️  Running");

            let outcome = check.run(conn, &self.schema).await;
            let duration = start.elapsed();
            match &outcome {
                Ok(_) => info!(check = check.title(), "✅ Done in {:.2?}", duration),
                Err(e) => warn!(check = check.title(), "❌ Failed after {:.2?}: {}", duration, e),
            }

            reports.push(CheckReport {
                title: check.title(),
                outcome,
                duration,
            });
        }

        reports
    }
}
