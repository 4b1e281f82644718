// probity/src/commands/run.rs
//
// USE CASE: Run the standard validation suite.

use probity_core::Connector;
use probity_core::application::ValidationSuite;

use crate::cli::OutputFormat;
use crate::output::print_reports;

pub async fn execute(
    connector: &dyn Connector,
    schema: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let suite = ValidationSuite::standard(schema);

    let reports = suite.run(connector).await;
    let total = reports.len();
    let failures = print_reports(reports, format)?;

    if failures > 0 {
        eprintln!("\n❌ FAILURE. {} of {} checks errored.", failures, total);
        std::process::exit(1);
    }
    if format == OutputFormat::Table {
        println!("\n✨ SUCCESS! {} checks finished in {:.2?}", total, start.elapsed());
    }
    Ok(())
}
