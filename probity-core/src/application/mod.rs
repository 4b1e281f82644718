// probity-core/src/application/mod.rs

pub mod checks;
pub mod suite;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use probity_core::application::{check_nulls, ValidationSuite};`
// without knowing the file layout.

pub use checks::{
    DEFAULT_TASK_HISTORY_DAYS, check_duplicates, check_failed_tasks, check_nulls, check_outliers,
    check_referential_integrity, compare_row_counts,
};
pub use suite::{CheckOutcome, CheckReport, PlannedCheck, ValidationSuite};
