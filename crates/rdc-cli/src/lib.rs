//! CLI library components for the retail dimension cleaner.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use pipeline::clean_entity;
pub use types::{Disposition, EntityResult};
