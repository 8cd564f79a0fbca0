//! Per-step and per-run cleaning reports.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// What one pipeline step did to the record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step identifier as rendered in the plan.
    pub step: String,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Cells degraded to null by the step.
    pub cells_nulled: usize,
    /// Cells rewritten to a different non-null value.
    pub cells_changed: usize,
}

impl StepReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Rows removed by each deduplication stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupReport {
    pub by_primary_key: usize,
    pub by_full_row: usize,
    pub by_composite_key: usize,
}

impl DedupReport {
    pub fn total(&self) -> usize {
        self.by_primary_key + self.by_full_row + self.by_composite_key
    }
}

/// Summary of one entity's cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub kind: EntityKind,
    pub input_rows: usize,
    pub output_rows: usize,
    pub steps: Vec<StepReport>,
    pub dedup: Option<DedupReport>,
}

impl RunReport {
    pub fn new(kind: EntityKind, input_rows: usize) -> Self {
        Self {
            kind,
            input_rows,
            output_rows: input_rows,
            steps: Vec::new(),
            dedup: None,
        }
    }

    pub fn rows_removed(&self) -> usize {
        self.input_rows.saturating_sub(self.output_rows)
    }

    pub fn cells_nulled(&self) -> usize {
        self.steps.iter().map(|s| s.cells_nulled).sum()
    }
}
