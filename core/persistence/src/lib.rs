//! FILENAME: core/persistence/src/lib.rs
//! Order File Loading
//!
//! Handles loading the retail order spreadsheet into an engine `RecordSet`.
//! Loading is the one place malformed input can surface; any problem aborts
//! the load with a typed error rather than producing a partial record set.

mod error;
mod xlsx_reader;

pub use error::PersistenceError;
pub use xlsx_reader::load_orders;
