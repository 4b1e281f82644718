// probity-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, Value as DuckValue, ValueRef};
use duckdb::{AccessMode, Config, Connection, params_from_iter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, error, instrument};

// Hexagonal imports
use crate::domain::table::{Table, Value};
use crate::error::ProbityError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, Param};

// Days between 0001-01-01 (CE) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    /// Read-write handle, `":memory:"` for an in-process database.
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();
        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Read-only handle on an existing database file. Any DDL/DML is refused
    /// by the engine itself.
    pub fn open_read_only(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(db_path, config)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs one or more statements without returning rows (fixtures, seeding).
    pub fn execute_batch(&self, sql: &str) -> Result<(), ProbityError> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ProbityError> {
        self.conn
            .lock()
            .map_err(|_| ProbityError::InternalError("DuckDB Mutex Poisoned".into()))
    }

    fn run(&self, sql: &str, params: &[Param]) -> Result<Table, ProbityError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;

        let bound: Vec<DuckValue> = params.iter().map(to_duck_value).collect();
        let mut rows = stmt.query(params_from_iter(bound))?;

        let columns = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();
        let width = columns.len();
        let mut table = Table::new(columns);

        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(from_value_ref(row.get_ref(i)?));
            }
            table.push_row(cells)?;
        }

        Ok(table)
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    #[instrument(skip(self, params), fields(params.len = params.len()))]
    async fn query(&self, sql: &str, params: &[Param]) -> Result<Table, ProbityError> {
        let start = Instant::now();
        debug!("⚡ Executing Query: {}", sql.trim());

        let result = self.run(sql, params);
        let duration = start.elapsed();

        match &result {
            Ok(table) => debug!(rows = table.len(), "✅ Query finished in {:.2?}", duration),
            Err(e) => error!("❌ Query failed after {:.2?}: {}", duration, e),
        }
        result
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

fn to_duck_value(param: &Param) -> DuckValue {
    match param {
        Param::Integer(i) => DuckValue::BigInt(*i),
        Param::Float(f) => DuckValue::Double(*f),
        Param::Text(s) => DuckValue::Text(s.clone()),
    }
}

fn from_value_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Boolean(b),
        ValueRef::TinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::SmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::Int(i) => Value::Integer(i64::from(i)),
        ValueRef::BigInt(i) => Value::Integer(i),
        ValueRef::HugeInt(i) => {
            i64::try_from(i).map_or_else(|_| Value::Text(i.to_string()), Value::Integer)
        }
        ValueRef::UTinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::USmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::UInt(i) => Value::Integer(i64::from(i)),
        ValueRef::UBigInt(i) => {
            i64::try_from(i).map_or_else(|_| Value::Text(i.to_string()), Value::Integer)
        }
        ValueRef::Float(f) => Value::Float(f64::from(f)),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Decimal(d) => Value::Decimal(d.to_string()),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Text(format!("\\x{}", hex::encode(bytes))),
        ValueRef::Date32(days) => days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map_or(Value::Null, Value::Date),
        ValueRef::Time64(unit, raw) => to_micros(unit, raw)
            .and_then(time_from_micros)
            .map_or(Value::Null, Value::Time),
        ValueRef::Timestamp(unit, raw) => to_micros(unit, raw)
            .and_then(DateTime::from_timestamp_micros)
            .map_or(Value::Null, |dt| Value::Timestamp(dt.naive_utc())),
        ValueRef::Interval {
            months,
            days,
            nanos,
        } => Value::Text(format_interval(months, days, nanos)),
        // Nested and enum columns have no flat cell representation.
        other => {
            debug!("Unmapped DuckDB value: {:?}", other);
            Value::Text(format!("{:?}", other))
        }
    }
}

fn to_micros(unit: TimeUnit, raw: i64) -> Option<i64> {
    match unit {
        TimeUnit::Second => raw.checked_mul(1_000_000),
        TimeUnit::Millisecond => raw.checked_mul(1_000),
        TimeUnit::Microsecond => Some(raw),
        TimeUnit::Nanosecond => Some(raw / 1_000),
    }
}

fn time_from_micros(micros: i64) -> Option<NaiveTime> {
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok()?;
    let nanos = u32::try_from(micros.rem_euclid(1_000_000) * 1_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}

/// Renders an interval the way DuckDB prints it: `1 year 2 months 3 days 04:05:06.5`.
fn format_interval(months: i32, days: i32, nanos: i64) -> String {
    let mut parts = Vec::new();
    for (n, unit) in [(months / 12, "year"), (months % 12, "month"), (days, "day")] {
        if n != 0 {
            let plural = if n.abs() == 1 { "" } else { "s" };
            parts.push(format!("{n} {unit}{plural}"));
        }
    }

    if nanos != 0 || parts.is_empty() {
        let sign = if nanos < 0 { "-" } else { "" };
        let total = nanos.unsigned_abs();
        let (secs, frac) = (total / 1_000_000_000, total % 1_000_000_000);
        let mut clock = format!(
            "{sign}{:02}:{:02}:{:02}",
            secs / 3600,
            secs / 60 % 60,
            secs % 60
        );
        if frac != 0 {
            clock.push('.');
            clock.push_str(format!("{frac:09}").trim_end_matches('0'));
        }
        parts.push(clock);
    }

    parts.join(" ")
}
