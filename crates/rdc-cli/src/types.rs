use rdc_model::{EntityKind, RunReport};
use rdc_output::Persisted;

/// What happened to the cleaned table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Persisted(Persisted),
    /// Cleaned and reported, not written.
    DryRun,
    /// Extraction produced nothing; the destination was left untouched.
    SkippedEmpty,
}

#[derive(Debug)]
pub struct EntityResult {
    pub kind: EntityKind,
    pub source: String,
    pub report: RunReport,
    pub disposition: Disposition,
}

impl EntityResult {
    pub fn destination_table(&self) -> &'static str {
        self.kind.destination_table()
    }
}
