//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the aggregation engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//!
//! Layers:
//! - `record`: The immutable order record model (what we load)
//! - `filter`: Predicate sets and filter application (what the user selected)
//! - `aggregate`: Group/reduce/top-N pipeline (what the charts consume)

pub mod aggregate;
pub mod filter;
pub mod record;

// Re-export commonly used types at the crate root
pub use aggregate::{aggregate, aggregate_monthly, month_key, top_n, DerivedRow, DerivedTable, GroupKey};
pub use filter::{apply_filters, PredicateSet};
pub use record::{AggregationType, GroupField, Measure, OrderRecord, RecordSet};
