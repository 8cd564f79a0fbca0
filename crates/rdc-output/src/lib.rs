//! Persistence for cleaned retail dimension tables.

pub mod error;
pub mod sink;

pub use error::{OutputError, Result};
pub use sink::{CsvDirectorySink, MemorySink, Persisted, Sink};
