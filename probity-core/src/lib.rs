// probity-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The capability a warehouse connection must offer (run a query, get rows back).
pub mod ports;

// 2. Domain
// Identifiers, materialized results and their invariants.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB driver, connection provider, configuration loading.
pub mod infrastructure;

// 4. Application (Use Cases)
// The check catalog and the standard validation suite.
pub mod application;

// --- GLOBAL ERROR ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use probity_core::{ProbityError, Connector, Table};
pub use domain::table::{Table, Value};
pub use error::ProbityError;
pub use ports::connector::{Connector, Param};
