// probity/src/commands/check.rs
//
// USE CASE: Run a single catalog check with ad-hoc arguments.

use std::time::Instant;

use probity_core::Connector;
use probity_core::application::{CheckReport, PlannedCheck};

use crate::cli::OutputFormat;
use crate::output::print_reports;

pub async fn execute(
    connector: &dyn Connector,
    schema: &str,
    check: PlannedCheck,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let outcome = check.run(connector, schema).await;

    let report = CheckReport {
        title: check.title(),
        outcome,
        duration: start.elapsed(),
    };

    if print_reports(vec![report], format)? > 0 {
        std::process::exit(1);
    }
    Ok(())
}
