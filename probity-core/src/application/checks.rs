// probity-core/src/application/checks.rs
//
// The check catalog. Each check is independent: it borrows a connection,
// issues read-only queries strictly one after another, shapes the result and
// returns. Identifiers are validated before any SQL is built; values are bound.
// Warehouse errors are returned as-is.

use crate::domain::error::DomainError;
use crate::domain::identifier::{Identifier, qualified_table, quote_ident};
use crate::domain::report::{NullCounts, RowCountComparison};
use crate::domain::table::{Table, Value};
use crate::error::ProbityError;
use crate::ports::connector::{Connector, Param};

pub const DEFAULT_TASK_HISTORY_DAYS: u32 = 7;

/// Key values occurring more than once, with their occurrence count (`cnt`).
pub async fn check_duplicates(
    conn: &dyn Connector,
    schema: &str,
    table: &str,
    key_column: &str,
) -> Result<Table, ProbityError> {
    let source = qualified_table(schema, table)?;
    let key = Identifier::parse(key_column)?;

    let sql = format!(
        "SELECT {key}, COUNT(*) AS cnt
         FROM {source}
         GROUP BY {key}
         HAVING COUNT(*) > 1"
    );
    conn.query(&sql, &[]).await
}

/// Null count for every column of the table, discovered with a zero-row probe.
///
/// One count query per column, run in column order. A single
/// `SUM(CASE WHEN .. IS NULL ..)` pass would be equivalent.
pub async fn check_nulls(
    conn: &dyn Connector,
    schema: &str,
    table: &str,
) -> Result<NullCounts, ProbityError> {
    let source = qualified_table(schema, table)?;

    let probe = conn
        .query(&format!("SELECT * FROM {source} LIMIT 0"), &[])
        .await?;

    let mut counts = NullCounts::default();
    for column in probe.columns() {
        // Names reported by the warehouse: quoted, not validated.
        let sql = format!(
            "SELECT COUNT(*) FROM {source} WHERE {} IS NULL",
            quote_ident(column)
        );
        let row = conn.query_row(&sql, &[]).await?;
        counts.insert(column.clone(), count_at(&row, 0, column)?);
    }
    Ok(counts)
}

/// Child rows whose key has no match in the parent table.
///
/// Key columns are compared as-is: incompatible types yield no error, only a
/// misleading result.
pub async fn check_referential_integrity(
    conn: &dyn Connector,
    schema: &str,
    parent_table: &str,
    child_table: &str,
    parent_key: &str,
    child_key: &str,
) -> Result<Table, ProbityError> {
    let parent = qualified_table(schema, parent_table)?;
    let child = qualified_table(schema, child_table)?;
    let parent_key = Identifier::parse(parent_key)?;
    let child_key = Identifier::parse(child_key)?;

    let sql = format!(
        "SELECT c.*
         FROM {child} c
         LEFT JOIN {parent} p
           ON c.{child_key} = p.{parent_key}
         WHERE p.{parent_key} IS NULL"
    );
    conn.query(&sql, &[]).await
}

/// Cardinalities of both tables, fetched in a single query.
pub async fn compare_row_counts(
    conn: &dyn Connector,
    schema: &str,
    table1: &str,
    table2: &str,
) -> Result<RowCountComparison, ProbityError> {
    let first = qualified_table(schema, table1)?;
    let second = qualified_table(schema, table2)?;

    let sql = format!(
        "SELECT
            (SELECT COUNT(*) FROM {first}) AS table1_count,
            (SELECT COUNT(*) FROM {second}) AS table2_count"
    );
    let row = conn.query_row(&sql, &[]).await?;

    Ok(RowCountComparison {
        left: count_at(&row, 0, "table1_count")?,
        right: count_at(&row, 1, "table2_count")?,
    })
}

/// Rows whose `column` lies strictly below `min` or strictly above `max`.
/// Values equal to a bound are in range.
pub async fn check_outliers(
    conn: &dyn Connector,
    schema: &str,
    table: &str,
    column: &str,
    min: impl Into<Param> + Send,
    max: impl Into<Param> + Send,
) -> Result<Table, ProbityError> {
    let source = qualified_table(schema, table)?;
    let column = Identifier::parse(column)?;

    let sql = format!(
        "SELECT *
         FROM {source}
         WHERE {column} < ? OR {column} > ?"
    );
    conn.query(&sql, &[min.into(), max.into()]).await
}

/// Failed task runs of `schema` scheduled within the trailing `days` days,
/// newest completion first. Reads the warehouse's `TASK_HISTORY` table function.
pub async fn check_failed_tasks(
    conn: &dyn Connector,
    schema: &str,
    days: u32,
) -> Result<Table, ProbityError> {
    let sql = "SELECT name, completed_time, state
         FROM TABLE(
             INFORMATION_SCHEMA.TASK_HISTORY(
                 SCHEDULED_TIME_RANGE_START => DATEADD('DAY', ?, CURRENT_TIMESTAMP())
             )
         )
         WHERE schema_name = ? AND state = 'FAILED'
         ORDER BY completed_time DESC";

    let params = [Param::Integer(-i64::from(days)), Param::from(schema)];
    conn.query(sql, &params).await
}

fn count_at(row: &[Value], idx: usize, column: &str) -> Result<u64, ProbityError> {
    let value = row.get(idx).unwrap_or(&Value::Null);
    value
        .as_i64()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| {
            DomainError::UnexpectedValue {
                column: column.to_string(),
                expected: "non-negative integer count",
                found: format!("{} ({})", value, value.type_name()),
            }
            .into()
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::duckdb::DuckDBConnector;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- MOCK CONNECTOR ---
    #[derive(Clone, Default)]
    struct MockConnector {
        calls: Arc<Mutex<Vec<(String, Vec<Param>)>>>,
        response: Table,
    }

    impl MockConnector {
        fn returning(response: Table) -> Self {
            Self {
                calls: Arc::default(),
                response,
            }
        }

        fn calls(&self) -> Vec<(String, Vec<Param>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Connector for MockConnector {
        async fn query(&self, sql: &str, params: &[Param]) -> Result<Table, ProbityError> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), params.to_vec()));
            Ok(self.response.clone())
        }

        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    /// ORDERS(order_id, amount, customer_id) plus CUSTOMERS and a staging copy.
    fn warehouse() -> Result<DuckDBConnector> {
        let conn = DuckDBConnector::new(":memory:")?;
        conn.execute_batch(
            "CREATE SCHEMA shop;
             CREATE TABLE shop.customers (customer_id INTEGER, name VARCHAR);
             INSERT INTO shop.customers VALUES (10, 'ada'), (20, 'bob');
             CREATE TABLE shop.orders (order_id INTEGER, amount INTEGER, customer_id INTEGER);
             INSERT INTO shop.orders VALUES
                 (1, 50, 10),
                 (1, 50, 10),
                 (2, 9999999, 30),
                 (3, -5, NULL);
             CREATE TABLE shop.orders_stg AS SELECT * FROM shop.orders LIMIT 3;",
        )?;
        Ok(conn)
    }

    fn ints(table: &Table, column: &str) -> Vec<i64> {
        let mut v: Vec<i64> = table
            .column(column)
            .unwrap()
            .into_iter()
            .map(|v| v.as_i64().unwrap())
            .collect();
        v.sort();
        v
    }

    #[tokio::test]
    async fn test_duplicates_scenario() -> Result<()> {
        let conn = warehouse()?;
        let dups = check_duplicates(&conn, "shop", "orders", "order_id").await?;

        assert_eq!(dups.len(), 1);
        assert_eq!(dups.get(0, "order_id"), Some(&Value::Integer(1)));
        assert_eq!(dups.get(0, "cnt"), Some(&Value::Integer(2)));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicates_counts_every_repeated_key() -> Result<()> {
        let conn = warehouse()?;
        conn.execute_batch(
            "CREATE TABLE shop.events (k VARCHAR);
             INSERT INTO shop.events VALUES ('a'), ('b'), ('a'), ('c'), ('c'), ('c');",
        )?;
        let dups = check_duplicates(&conn, "shop", "events", "k").await?;

        let found: HashMap<String, i64> = dups
            .rows()
            .iter()
            .map(|r| (r[0].as_str().unwrap().to_string(), r[1].as_i64().unwrap()))
            .collect();
        assert_eq!(found, HashMap::from([("a".into(), 2), ("c".into(), 3)]));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicates_unique_keys_yield_empty_table() -> Result<()> {
        let conn = warehouse()?;
        let dups = check_duplicates(&conn, "shop", "customers", "customer_id").await?;
        assert!(dups.is_empty());
        assert_eq!(dups.columns().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_nulls_one_entry_per_column() -> Result<()> {
        let conn = warehouse()?;
        let nulls = check_nulls(&conn, "shop", "orders").await?;

        let got: Vec<(&str, u64)> = nulls.iter().collect();
        assert_eq!(
            got,
            vec![("order_id", 0), ("amount", 0), ("customer_id", 1)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_nulls_clean_table_is_all_zero() -> Result<()> {
        let conn = warehouse()?;
        let nulls = check_nulls(&conn, "shop", "customers").await?;
        assert_eq!(nulls.len(), 2);
        assert!(nulls.iter().all(|(_, n)| n == 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_nulls_queries_run_in_column_order() -> Result<()> {
        // The mock answers the probe and every count with the same table.
        let mut canned = Table::new(vec!["A".into(), "b\"c".into()]);
        canned.push_row(vec![Value::Integer(4), Value::Integer(4)])?;
        let mock = MockConnector::returning(canned);

        let nulls = check_nulls(&mock, "S", "T").await?;
        assert_eq!(nulls.get("A"), Some(4));
        assert_eq!(nulls.get("b\"c"), Some(4));

        let sqls: Vec<String> = mock.calls().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            sqls,
            vec![
                "SELECT * FROM S.T LIMIT 0".to_string(),
                r#"SELECT COUNT(*) FROM S.T WHERE "A" IS NULL"#.to_string(),
                r#"SELECT COUNT(*) FROM S.T WHERE "b""c" IS NULL"#.to_string(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_nulls_zero_column_table_is_empty() -> Result<()> {
        let mock = MockConnector::returning(Table::new(vec![]));
        let nulls = check_nulls(&mock, "S", "T").await?;
        assert!(nulls.is_empty());
        assert_eq!(mock.calls().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_referential_integrity_returns_orphans() -> Result<()> {
        let conn = warehouse()?;
        let orphans = check_referential_integrity(
            &conn,
            "shop",
            "customers",
            "orders",
            "customer_id",
            "customer_id",
        )
        .await?;

        // Full child rows: unknown customer 30 and the NULL key.
        assert_eq!(orphans.columns(), ["order_id", "amount", "customer_id"]);
        assert_eq!(ints(&orphans, "order_id"), vec![2, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_referential_integrity_all_matched() -> Result<()> {
        let conn = warehouse()?;
        conn.execute_batch(
            "CREATE TABLE shop.good_orders (order_id INTEGER, cust INTEGER);
             INSERT INTO shop.good_orders VALUES (1, 10), (2, 20), (3, 10);",
        )?;
        let orphans = check_referential_integrity(
            &conn,
            "shop",
            "customers",
            "good_orders",
            "customer_id",
            "cust",
        )
        .await?;
        assert!(orphans.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_row_counts() -> Result<()> {
        let conn = warehouse()?;
        let cmp = compare_row_counts(&conn, "shop", "orders_stg", "orders").await?;
        assert_eq!(<(u64, u64)>::from(cmp), (3, 4));
        assert!(!cmp.is_balanced());

        let same = compare_row_counts(&conn, "shop", "orders", "orders").await?;
        assert!(same.is_balanced());
        Ok(())
    }

    #[tokio::test]
    async fn test_row_counts_missing_table_propagates() -> Result<()> {
        let conn = warehouse()?;
        let res = compare_row_counts(&conn, "shop", "orders", "nope").await;
        assert!(matches!(res, Err(ProbityError::Infrastructure(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_outliers_scenario() -> Result<()> {
        let conn = warehouse()?;
        let out = check_outliers(&conn, "shop", "orders", "amount", 0, 10000).await?;

        assert_eq!(out.columns().len(), 3);
        assert_eq!(ints(&out, "order_id"), vec![2, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_outliers_bounds_are_inclusive() -> Result<()> {
        let conn = warehouse()?;
        let out = check_outliers(&conn, "shop", "orders", "amount", 50, 50).await?;
        // 50 sits on both bounds; everything else is outside.
        assert_eq!(ints(&out, "amount"), vec![-5, 9999999]);

        let none = check_outliers(&conn, "shop", "orders", "amount", -5, 9999999).await?;
        assert!(none.is_empty());

        let float_bounds = check_outliers(&conn, "shop", "orders", "amount", -4.5, 50.0).await?;
        assert_eq!(ints(&float_bounds, "amount"), vec![-5, 9999999]);
        Ok(())
    }

    #[tokio::test]
    async fn test_outliers_binds_bounds() -> Result<()> {
        let mock = MockConnector::returning(Table::default());
        check_outliers(&mock, "S", "T", "C", 0, "1; DROP TABLE T").await?;

        let (sql, params) = mock.calls().remove(0);
        assert!(!sql.contains("DROP"));
        assert_eq!(
            params,
            vec![Param::Integer(0), Param::Text("1; DROP TABLE T".into())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_tasks_query_shape() -> Result<()> {
        let mock = MockConnector::returning(Table::new(vec![
            "NAME".into(),
            "COMPLETED_TIME".into(),
            "STATE".into(),
        ]));
        let res = check_failed_tasks(&mock, "MY_SCHEMA", DEFAULT_TASK_HISTORY_DAYS).await?;
        assert_eq!(res.columns(), ["NAME", "COMPLETED_TIME", "STATE"]);

        let (sql, params) = mock.calls().remove(0);
        assert!(sql.contains("INFORMATION_SCHEMA.TASK_HISTORY"));
        assert!(sql.contains("state = 'FAILED'"));
        assert!(sql.contains("ORDER BY completed_time DESC"));
        assert!(!sql.contains("MY_SCHEMA"));
        assert_eq!(
            params,
            vec![Param::Integer(-7), Param::Text("MY_SCHEMA".into())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_tasks_zero_days() -> Result<()> {
        let mock = MockConnector::default();
        check_failed_tasks(&mock, "S", 0).await?;
        assert_eq!(mock.calls()[0].1[0], Param::Integer(0));
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_identifiers_never_reach_the_warehouse() -> Result<()> {
        let mock = MockConnector::default();

        let attempts = [
            check_duplicates(&mock, "S", "T; DROP TABLE T", "k").await.err(),
            check_duplicates(&mock, "S", "T", "k) --").await.err(),
            check_nulls(&mock, "S x", "T").await.err(),
            check_referential_integrity(&mock, "S", "P", "C", "id", "id OR 1=1")
                .await
                .err(),
            compare_row_counts(&mock, "S", "T", "T2 UNION SELECT 1").await.err(),
            check_outliers(&mock, "S", "T", "c'", 0, 1).await.err(),
        ];
        for err in attempts {
            assert!(matches!(
                err,
                Some(ProbityError::Domain(DomainError::InvalidIdentifier(_)))
            ));
        }
        assert!(mock.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_non_integer_count_is_reported() -> Result<()> {
        let mut t = Table::new(vec!["table1_count".into(), "table2_count".into()]);
        t.push_row(vec![Value::Text("many".into()), Value::Integer(1)])?;
        let mock = MockConnector::returning(t);

        let res = compare_row_counts(&mock, "S", "A", "B").await;
        assert!(matches!(
            res,
            Err(ProbityError::Domain(DomainError::UnexpectedValue { .. }))
        ));
        Ok(())
    }
}
