//! Cleaning pipeline for retail dimension extracts.
//!
//! This crate holds the transformation logic that turns raw extracts into
//! analysis-ready record sets:
//!
//! - **normalization**: null standardization and per-field normalizers
//! - **filter**: corrupted-row detection and required-field checks
//! - **dedupe**: primary-key, full-row and composite-key deduplication
//! - **reshape**: columnar date-event documents and datetime assembly
//! - **pipeline**: declarative per-entity step lists and their runner
//! - **frame**: entity-tagged record sets

pub mod data_utils;
pub mod dedupe;
pub mod error;
pub mod filter;
pub mod frame;
pub mod normalization;
pub mod pipeline;
pub mod reshape;

pub use error::{Result, TransformError};
pub use filter::is_corrupted_token;
pub use frame::{EntityFrame, FrameMeta};
pub use normalization::{ColumnChange, DateParser, parse_date};
pub use pipeline::{
    CleanOutcome, PipelineRunner, Step, check_row_count, clean_date_events, render_plan,
    render_plan_json, run_pipeline, steps_for,
};
pub use reshape::{reshape_columnar, reshape_date_events};
