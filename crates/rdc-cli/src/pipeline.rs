//! Extract, clean and persist one entity.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use rdc_ingest::{Extractor, RawInput, extract_or_empty};
use rdc_model::{CleaningOptions, EntityKind, RunReport, schema_for};
use rdc_output::Sink;
use rdc_transform::{CleanOutcome, EntityFrame, clean_date_events, reshape_columnar, run_pipeline};

use crate::types::{Disposition, EntityResult};

/// Run one entity end to end.
///
/// Persistence happens only after every step and the integrity gate
/// succeeded; any error leaves the destination untouched. An empty
/// extraction is reported and skipped rather than written.
pub fn clean_entity(
    kind: EntityKind,
    extractor: &dyn Extractor,
    sink: &dyn Sink,
    options: &CleaningOptions,
    dry_run: bool,
) -> Result<EntityResult> {
    let source = extractor.source();
    let span = info_span!("entity", entity = %kind, source = %source);
    let _guard = span.enter();

    let input = extract_or_empty(extractor);
    if input.is_empty() {
        warn!("empty extraction, destination left untouched");
        return Ok(EntityResult {
            kind,
            source,
            report: RunReport::new(kind, 0),
            disposition: Disposition::SkippedEmpty,
        });
    }

    let CleanOutcome { mut frame, report } =
        clean_input(kind, input, &source, options).with_context(|| format!("clean {kind}"))?;

    let disposition = if dry_run {
        info!(rows = report.output_rows, "dry run, not persisting");
        Disposition::DryRun
    } else {
        let table = kind.destination_table();
        let persisted = sink
            .persist(&mut frame.data, table)
            .with_context(|| format!("persist {table}"))?;
        Disposition::Persisted(persisted)
    };
    Ok(EntityResult {
        kind,
        source,
        report,
        disposition,
    })
}

fn clean_input(
    kind: EntityKind,
    input: RawInput,
    source: &str,
    options: &CleaningOptions,
) -> Result<CleanOutcome> {
    match input {
        RawInput::Table(data) => {
            let frame = EntityFrame::new(kind, data).with_source(source);
            Ok(run_pipeline(frame, options)?)
        }
        RawInput::Columnar(document) if kind == EntityKind::DateEvent => {
            let mut outcome = clean_date_events(&document, options)?;
            outcome.frame = outcome.frame.with_source(source);
            Ok(outcome)
        }
        RawInput::Columnar(document) => {
            // Any entity may arrive as parallel field mappings.
            let fields: Vec<&str> = schema_for(kind).field_names().collect();
            let data = reshape_columnar(&document, &fields)?;
            let frame = EntityFrame::new(kind, data).with_source(source);
            Ok(run_pipeline(frame, options)?)
        }
    }
}
