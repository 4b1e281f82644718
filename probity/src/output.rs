// probity/src/output.rs
//
// Terminal and JSON rendering of check results.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as TermTable};
use serde_json::json;

use probity_core::application::{CheckOutcome, CheckReport};
use probity_core::domain::{NullCounts, RowCountComparison};
use probity_core::Table;

use crate::cli::OutputFormat;

/// Prints every report and returns how many of them errored.
pub fn print_reports(reports: Vec<CheckReport>, format: OutputFormat) -> anyhow::Result<usize> {
    let failures = reports.iter().filter(|r| r.is_error()).count();

    match format {
        OutputFormat::Json => println!("{}", render_json(&reports)?),
        OutputFormat::Table => {
            for (i, report) in reports.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("=== {} ===", report.title);
                match report.outcome {
                    Ok(outcome) => println!("{}", render_outcome(&outcome)),
                    Err(e) => eprintln!("{:?}", miette::Report::new(e)),
                }
            }
        }
    }

    Ok(failures)
}

pub fn render_outcome(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Rows(table) => render_rows(table),
        CheckOutcome::NullCounts(counts) => render_null_counts(counts),
        CheckOutcome::RowCounts(cmp) => render_row_counts(cmp),
    }
}

fn term_table() -> TermTable {
    let mut table = TermTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn render_rows(rows: &Table) -> String {
    if rows.is_empty() {
        return "✅ 0 rows".to_string();
    }

    let mut table = term_table();
    table.set_header(rows.columns().to_vec());
    for row in rows.rows() {
        table.add_row(row.iter().map(ToString::to_string).collect::<Vec<_>>());
    }
    let noun = if rows.len() == 1 { "row" } else { "rows" };
    format!("{table}\n⚠️  {} {noun}", rows.len())
}

fn render_null_counts(counts: &NullCounts) -> String {
    if counts.is_empty() {
        return "✅ no columns".to_string();
    }

    let mut table = term_table();
    table.set_header(vec!["column", "null_count"]);
    for (column, n) in counts.iter() {
        table.add_row(vec![column.to_string(), n.to_string()]);
    }
    table.to_string()
}

fn render_row_counts(cmp: &RowCountComparison) -> String {
    let parity = if cmp.is_balanced() {
        "✅ equal".to_string()
    } else {
        format!("❌ differ by {}", cmp.difference().abs())
    };

    let mut table = term_table();
    table.set_header(vec!["table1_count", "table2_count", "parity"]);
    table.add_row(vec![cmp.left.to_string(), cmp.right.to_string(), parity]);
    table.to_string()
}

pub fn render_json(reports: &[CheckReport]) -> anyhow::Result<String> {
    let items = reports
        .iter()
        .map(|r| {
            let duration_ms = u64::try_from(r.duration.as_millis()).unwrap_or(u64::MAX);
            match &r.outcome {
                Ok(outcome) => json!({
                    "check": r.title,
                    "duration_ms": duration_ms,
                    "outcome": outcome,
                    "status": "ok",
                }),
                Err(e) => json!({
                    "check": r.title,
                    "duration_ms": duration_ms,
                    "error": e.to_string(),
                    "status": "error",
                }),
            }
        })
        .collect::<Vec<_>>();

    Ok(serde_json::to_string_pretty(&items)?)
}
