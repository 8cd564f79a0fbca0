use anyhow::{Context, Result};
use comfy_table::Table;
use std::path::PathBuf;

use rdc_cli::clean_entity;
use rdc_cli::config::{apply_overrides, load_options};
use rdc_cli::types::EntityResult;
use rdc_ingest::FileExtractor;
use rdc_model::{EntityKind, schema_for};
use rdc_output::CsvDirectorySink;
use rdc_transform::{render_plan, render_plan_json};

use crate::cli::{CleanArgs, PlanArgs};
use crate::summary::apply_table_style;

pub fn run_clean(args: &CleanArgs) -> Result<EntityResult> {
    let options = load_options(args.config.as_deref()).context("load cleaning options")?;
    let options = apply_overrides(options, args.entity, args.expect_rows);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("output"));
    let extractor = FileExtractor::new(&args.input);
    let sink = CsvDirectorySink::new(output_dir);
    clean_entity(args.entity, &extractor, &sink, &options, args.dry_run)
}

pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let kind = args.entity;
    if args.json {
        let json = render_plan_json(kind).context("serialize plan")?;
        println!("{json}");
        return Ok(());
    }
    let schema = schema_for(kind);
    println!("{kind}: {} -> {}", kind.description(), kind.destination_table());
    let mut table = Table::new();
    table.set_header(vec!["Field", "Cleaned as"]);
    apply_table_style(&mut table);
    for field in schema.fields {
        table.add_row(vec![field.name, field.semantic.label()]);
    }
    println!("{table}");
    if let Some(keys) = schema.dedup {
        println!(
            "Dedup keys: {} (primary), {} (composite)",
            keys.primary,
            keys.composite.join(" + ")
        );
    }
    print!("{}", render_plan(kind));
    Ok(())
}

pub fn run_entities() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Entity", "Description", "Destination", "Source shape"]);
    apply_table_style(&mut table);
    for kind in EntityKind::ALL {
        let shape = if kind.is_columnar_source() {
            "columnar JSON"
        } else {
            "table"
        };
        table.add_row(vec![
            kind.code(),
            kind.description(),
            kind.destination_table(),
            shape,
        ]);
    }
    println!("{table}");
    Ok(())
}
