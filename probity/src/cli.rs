// probity/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use probity_core::Param;
use probity_core::application::{DEFAULT_TASK_HISTORY_DAYS, PlannedCheck};

#[derive(Parser)]
#[command(name = "probity")]
#[command(about = "Data-quality checks for warehouse tables", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// More logs on stderr (-v info, -vv debug with SQL text)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings layered over the profile file and `PROBITY_*` variables.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Connection profiles file (connections.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to read from the connections file
    #[arg(long, default_value = "default", global = true)]
    pub profile: String,

    /// Output of the profile to use (defaults to the profile's target)
    #[arg(long, global = true)]
    pub target: Option<String>,

    /// Database to open (DuckDB file path)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Schema holding the checked tables
    #[arg(long, global = true)]
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 🚀 Runs the standard suite (ORDERS / CUSTOMERS)
    Run,

    /// 🔁 Key values appearing more than once
    Duplicates {
        #[arg(long, short)]
        table: String,

        #[arg(long)]
        key_column: String,
    },

    /// 🕳️  Null count of every column
    Nulls {
        #[arg(long, short)]
        table: String,
    },

    /// 🔗 Child rows without a parent (referential integrity)
    Orphans {
        #[arg(long)]
        parent_table: String,

        #[arg(long)]
        child_table: String,

        #[arg(long)]
        parent_key: String,

        #[arg(long)]
        child_key: String,
    },

    /// ⚖️  Row counts of two tables
    RowCounts {
        #[arg(long)]
        left: String,

        #[arg(long)]
        right: String,
    },

    /// 📏 Rows outside the inclusive range [min, max]
    Outliers {
        #[arg(long, short)]
        table: String,

        #[arg(long, short)]
        column: String,

        /// Lower bound (integer, decimal or literal)
        #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
        min: Param,

        /// Upper bound (integer, decimal or literal)
        #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
        max: Param,
    },

    /// 🧯 Failed task runs over the trailing days
    FailedTasks {
        #[arg(long, default_value_t = DEFAULT_TASK_HISTORY_DAYS)]
        days: u32,
    },
}

impl Commands {
    /// The catalog call behind a single-check subcommand; `None` for `run`.
    pub fn planned_check(&self) -> Option<PlannedCheck> {
        let planned = match self {
            Commands::Run => return None,
            Commands::Duplicates { table, key_column } => PlannedCheck::Duplicates {
                table: table.clone(),
                key_column: key_column.clone(),
            },
            Commands::Nulls { table } => PlannedCheck::Nulls {
                table: table.clone(),
            },
            Commands::Orphans {
                parent_table,
                child_table,
                parent_key,
                child_key,
            } => PlannedCheck::ReferentialIntegrity {
                parent_table: parent_table.clone(),
                child_table: child_table.clone(),
                parent_key: parent_key.clone(),
                child_key: child_key.clone(),
            },
            Commands::RowCounts { left, right } => PlannedCheck::RowCounts {
                left: left.clone(),
                right: right.clone(),
            },
            Commands::Outliers {
                table,
                column,
                min,
                max,
            } => PlannedCheck::Outliers {
                table: table.clone(),
                column: column.clone(),
                min: min.clone(),
                max: max.clone(),
            },
            Commands::FailedTasks { days } => PlannedCheck::FailedTasks { days: *days },
        };
        Some(planned)
    }
}

fn parse_bound(raw: &str) -> Result<Param, String> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Param::Integer(i));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Param::Float(f)),
        Ok(_) => Err(format!("bound must be finite, got '{raw}'")),
        Err(_) if raw.is_empty() => Err("bound cannot be empty".to_string()),
        Err(_) => Ok(Param::Text(raw.to_string())),
    }
}
