pub mod error;
pub mod identifier;
pub mod report;
pub mod table;

// Re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use identifier::Identifier;
pub use report::{NullCounts, RowCountComparison};
pub use table::{Table, Value};
