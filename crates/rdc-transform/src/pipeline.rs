//! Per-entity cleaning pipelines.
//!
//! Every entity kind has a fixed, ordered list of [`Step`]s. The lists are data,
//! so one generic runner executes them all: it validates the source columns,
//! applies each step inside its own tracing span, records a [`StepReport`] per
//! step and finally applies the row-count integrity gate.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use rdc_model::{
    CleaningOptions, DedupReport, EntityKind, RunReport, StepReport, schema_for,
};

use crate::dedupe::deduplicate;
use crate::error::{Result, TransformError};
use crate::filter::{drop_rows_missing, remove_invalid_rows};
use crate::frame::EntityFrame;
use crate::normalization::{
    ColumnChange, clean_card_number, clean_continent, clean_country, clean_country_code,
    clean_locality, clean_phone_number, clean_staff_numbers, clean_store_type, coerce_numeric,
    convert_weight_column, drop_columns, merge_latitude, parse_date_columns, rename_column,
    single_line_address, standardize_nulls, strip_currency,
};
use crate::reshape::{combine_datetime, reshape_date_events};

/// One cleaning operation in an entity's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    StandardizeNulls,
    SingleLineAddress { column: &'static str },
    CleanCountry { column: &'static str },
    CleanCountryCode { column: &'static str },
    CleanPhoneNumber { column: &'static str },
    CleanCardNumber { column: &'static str },
    CleanStoreType { column: &'static str },
    CleanContinent { column: &'static str },
    CleanLocality { column: &'static str },
    CleanStaffNumbers { column: &'static str },
    MergeLatitude { primary: &'static str, alternate: &'static str },
    ParseDates { columns: &'static [&'static str] },
    /// Drop rows carrying a corruption token; `exempt` honours the store exemption.
    RemoveInvalidRows { exempt: bool },
    DropRowsMissing { columns: &'static [&'static str], exempt: bool },
    ConvertWeight { source: &'static str, target: &'static str },
    StripCurrency { column: &'static str },
    CoerceNumeric { column: &'static str },
    RenameColumn { from: &'static str, to: &'static str },
    DropColumns { columns: &'static [&'static str] },
    Deduplicate,
    CombineDateTime,
}

impl Step {
    /// Short identifier used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Step::StandardizeNulls => "standardize_nulls",
            Step::SingleLineAddress { .. } => "single_line_address",
            Step::CleanCountry { .. } => "clean_country",
            Step::CleanCountryCode { .. } => "clean_country_code",
            Step::CleanPhoneNumber { .. } => "clean_phone_number",
            Step::CleanCardNumber { .. } => "clean_card_number",
            Step::CleanStoreType { .. } => "clean_store_type",
            Step::CleanContinent { .. } => "clean_continent",
            Step::CleanLocality { .. } => "clean_locality",
            Step::CleanStaffNumbers { .. } => "clean_staff_numbers",
            Step::MergeLatitude { .. } => "merge_latitude",
            Step::ParseDates { .. } => "parse_dates",
            Step::RemoveInvalidRows { .. } => "remove_invalid_rows",
            Step::DropRowsMissing { .. } => "drop_rows_missing",
            Step::ConvertWeight { .. } => "convert_weight",
            Step::StripCurrency { .. } => "strip_currency",
            Step::CoerceNumeric { .. } => "coerce_numeric",
            Step::RenameColumn { .. } => "rename_column",
            Step::DropColumns { .. } => "drop_columns",
            Step::Deduplicate => "deduplicate",
            Step::CombineDateTime => "combine_datetime",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Step::StandardizeNulls | Step::Deduplicate | Step::CombineDateTime => {
                write!(f, "{name}")
            }
            Step::SingleLineAddress { column }
            | Step::CleanCountry { column }
            | Step::CleanCountryCode { column }
            | Step::CleanPhoneNumber { column }
            | Step::CleanCardNumber { column }
            | Step::CleanStoreType { column }
            | Step::CleanContinent { column }
            | Step::CleanLocality { column }
            | Step::CleanStaffNumbers { column }
            | Step::StripCurrency { column }
            | Step::CoerceNumeric { column } => write!(f, "{name}({column})"),
            Step::MergeLatitude { primary, alternate } => {
                write!(f, "{name}({alternate} -> {primary})")
            }
            Step::ParseDates { columns } | Step::DropColumns { columns } => {
                write!(f, "{name}({})", columns.join(", "))
            }
            Step::RemoveInvalidRows { exempt } => {
                if *exempt {
                    write!(f, "{name}(with exemptions)")
                } else {
                    write!(f, "{name}")
                }
            }
            Step::DropRowsMissing { columns, exempt } => {
                write!(f, "{name}({})", columns.join(", "))?;
                if *exempt {
                    write!(f, " with exemptions")?;
                }
                Ok(())
            }
            Step::ConvertWeight { source, target }
            | Step::RenameColumn {
                from: source,
                to: target,
            } => write!(f, "{name}({source} -> {target})"),
        }
    }
}

const USER_STEPS: &[Step] = &[
    Step::StandardizeNulls,
    Step::SingleLineAddress { column: "address" },
    Step::CleanCountry { column: "country" },
    Step::CleanCountryCode { column: "country_code" },
    Step::CleanPhoneNumber { column: "phone_number" },
    Step::ParseDates { columns: &["date_of_birth", "join_date"] },
    Step::RemoveInvalidRows { exempt: false },
    Step::Deduplicate,
];

const CARD_STEPS: &[Step] = &[
    Step::StandardizeNulls,
    Step::ParseDates { columns: &["date_payment_confirmed"] },
    Step::RemoveInvalidRows { exempt: false },
    Step::CleanCardNumber { column: "card_number" },
];

const STORE_STEPS: &[Step] = &[
    Step::StandardizeNulls,
    Step::SingleLineAddress { column: "address" },
    Step::MergeLatitude { primary: "latitude", alternate: "lat" },
    Step::ParseDates { columns: &["opening_date"] },
    Step::CleanStoreType { column: "store_type" },
    Step::CleanCountryCode { column: "country_code" },
    Step::CleanContinent { column: "continent" },
    Step::CleanLocality { column: "locality" },
    Step::CleanStaffNumbers { column: "staff_numbers" },
    Step::RemoveInvalidRows { exempt: true },
    Step::DropRowsMissing { columns: &["store_code"], exempt: true },
];

const PRODUCT_STEPS: &[Step] = &[
    Step::StandardizeNulls,
    Step::RemoveInvalidRows { exempt: false },
    Step::ConvertWeight { source: "weight", target: "weight_kg" },
    Step::StripCurrency { column: "product_price" },
    Step::CoerceNumeric { column: "product_price" },
    Step::RenameColumn { from: "product_price", to: "product_price_gbp" },
    Step::ParseDates { columns: &["date_added"] },
];

const ORDER_STEPS: &[Step] = &[
    Step::StandardizeNulls,
    Step::RemoveInvalidRows { exempt: false },
    Step::DropColumns { columns: &["first_name", "last_name", "1"] },
    Step::CoerceNumeric { column: "product_quantity" },
];

const DATE_EVENT_STEPS: &[Step] = &[
    Step::StandardizeNulls,
    Step::DropRowsMissing { columns: &["timestamp", "day", "month", "year"], exempt: false },
    Step::RemoveInvalidRows { exempt: false },
    Step::CombineDateTime,
];

/// The ordered steps for an entity kind.
pub fn steps_for(kind: EntityKind) -> &'static [Step] {
    match kind {
        EntityKind::User => USER_STEPS,
        EntityKind::Card => CARD_STEPS,
        EntityKind::Store => STORE_STEPS,
        EntityKind::Product => PRODUCT_STEPS,
        EntityKind::Order => ORDER_STEPS,
        EntityKind::DateEvent => DATE_EVENT_STEPS,
    }
}

/// Render an entity's pipeline as a numbered list, one step per line.
pub fn render_plan(kind: EntityKind) -> String {
    let mut out = String::new();
    for (idx, step) in steps_for(kind).iter().enumerate() {
        out.push_str(&format!("{}. {step}\n", idx + 1));
    }
    out
}

/// Serialize an entity's pipeline as a JSON array of tagged steps.
pub fn render_plan_json(kind: EntityKind) -> serde_json::Result<String> {
    serde_json::to_string_pretty(steps_for(kind))
}

/// A cleaned frame and what the pipeline did to it.
#[derive(Debug)]
pub struct CleanOutcome {
    pub frame: EntityFrame,
    pub report: RunReport,
}

/// Runs entity pipelines with a fixed set of options.
#[derive(Debug, Clone, Copy)]
pub struct PipelineRunner<'a> {
    options: &'a CleaningOptions,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(options: &'a CleaningOptions) -> Self {
        Self { options }
    }

    /// Clean a row-oriented frame with its entity's pipeline.
    ///
    /// An empty frame (a failed extraction) is returned unchanged with an empty
    /// report. Any hard error aborts the run; nothing partial is returned.
    pub fn run(&self, mut frame: EntityFrame) -> Result<CleanOutcome> {
        let kind = frame.kind;
        let mut report = RunReport::new(kind, frame.record_count());
        if frame.is_empty() {
            warn!(entity = %kind, "empty record set, nothing to clean");
            return Ok(CleanOutcome { frame, report });
        }
        validate_columns(&frame)?;
        info!(
            entity = %kind,
            source = frame.source().unwrap_or("-"),
            rows = report.input_rows,
            "cleaning started"
        );

        for step in steps_for(kind) {
            let span = info_span!("step", entity = %kind, step = step.name());
            let _guard = span.enter();
            let rows_before = frame.data.height();
            let (change, dedup) = self.apply(step, &mut frame)?;
            let rows_after = frame.data.height();
            debug_assert!(rows_after <= rows_before);
            if let Some(dedup) = dedup {
                info!(removed = dedup.by_primary_key, stage = "primary_key", "dedup stage");
                info!(removed = dedup.by_full_row, stage = "full_row", "dedup stage");
                info!(removed = dedup.by_composite_key, stage = "composite_key", "dedup stage");
                report.dedup = Some(dedup);
            }
            info!(
                rows_before,
                rows_after,
                rows_removed = rows_before - rows_after,
                cells_nulled = change.nulled,
                "step complete"
            );
            debug!(cells_changed = change.changed, detail = %step, "step detail");
            report.steps.push(StepReport {
                step: step.to_string(),
                rows_before,
                rows_after,
                cells_nulled: change.nulled,
                cells_changed: change.changed,
            });
        }
        report.output_rows = frame.data.height();

        check_row_count(kind, report.output_rows, self.options)?;
        Ok(CleanOutcome { frame, report })
    }

    fn apply(
        &self,
        step: &Step,
        frame: &mut EntityFrame,
    ) -> Result<(ColumnChange, Option<DedupReport>)> {
        let df = &mut frame.data;
        let options = self.options;
        let change = match *step {
            Step::StandardizeNulls => standardize_nulls(df, &options.null_tokens)?,
            Step::SingleLineAddress { column } => single_line_address(df, column)?,
            Step::CleanCountry { column } => clean_country(df, column)?,
            Step::CleanCountryCode { column } => clean_country_code(df, column)?,
            Step::CleanPhoneNumber { column } => clean_phone_number(df, column)?,
            Step::CleanCardNumber { column } => clean_card_number(df, column)?,
            Step::CleanStoreType { column } => clean_store_type(df, column)?,
            Step::CleanContinent { column } => clean_continent(df, column)?,
            Step::CleanLocality { column } => clean_locality(df, column)?,
            Step::CleanStaffNumbers { column } => clean_staff_numbers(df, column)?,
            Step::MergeLatitude { primary, alternate } => merge_latitude(df, primary, alternate)?,
            Step::ParseDates { columns } => parse_date_columns(df, columns)?,
            Step::RemoveInvalidRows { exempt } => {
                let exemption = exempt.then_some(&options.store_exemption);
                remove_invalid_rows(df, exemption)?;
                ColumnChange::default()
            }
            Step::DropRowsMissing { columns, exempt } => {
                let exemption = exempt.then_some(&options.store_exemption);
                drop_rows_missing(df, columns, exemption)?;
                ColumnChange::default()
            }
            Step::ConvertWeight { source, target } => convert_weight_column(df, source, target)?,
            Step::StripCurrency { column } => strip_currency(df, column, &options.currency_symbols)?,
            Step::CoerceNumeric { column } => coerce_numeric(df, column)?,
            Step::RenameColumn { from, to } => {
                rename_column(df, from, to)?;
                ColumnChange::default()
            }
            Step::DropColumns { columns } => {
                let dropped = drop_columns(df, columns);
                debug!(dropped, "columns dropped");
                ColumnChange::default()
            }
            Step::Deduplicate => {
                let Some(keys) = schema_for(frame.kind).dedup else {
                    return Ok((ColumnChange::default(), None));
                };
                let report = deduplicate(df, &keys)?;
                return Ok((ColumnChange::default(), Some(report)));
            }
            Step::CombineDateTime => {
                combine_datetime(df)?;
                ColumnChange::default()
            }
        };
        Ok((change, None))
    }
}

/// Every schema field must be present before any step runs.
fn validate_columns(frame: &EntityFrame) -> Result<()> {
    let schema = schema_for(frame.kind);
    for name in schema.field_names() {
        if frame.data.column(name).is_err() {
            return Err(TransformError::MissingColumn {
                kind: frame.kind,
                column: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Fail when a configured expected row count does not match.
pub fn check_row_count(kind: EntityKind, actual: usize, options: &CleaningOptions) -> Result<()> {
    match options.expected_rows_for(kind) {
        Some(expected) if expected != actual => {
            Err(TransformError::RowCountMismatch { kind, expected, actual })
        }
        _ => Ok(()),
    }
}

/// Clean a row-oriented frame with default runner semantics.
pub fn run_pipeline(frame: EntityFrame, options: &CleaningOptions) -> Result<CleanOutcome> {
    PipelineRunner::new(options).run(frame)
}

/// Reshape a columnar date-event document and clean it.
pub fn clean_date_events(
    document: &serde_json::Value,
    options: &CleaningOptions,
) -> Result<CleanOutcome> {
    let span = info_span!("reshape", entity = %EntityKind::DateEvent);
    let data = span.in_scope(|| reshape_date_events(document))?;
    info!(rows = data.height(), "reshaped columnar document");
    run_pipeline(EntityFrame::new(EntityKind::DateEvent, data), options)
}
