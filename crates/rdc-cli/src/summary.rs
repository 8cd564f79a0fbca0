use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rdc_model::RunReport;
use rdc_output::Persisted;

use rdc_cli::types::{Disposition, EntityResult};

pub fn print_summary(result: &EntityResult) {
    println!("Entity: {} ({})", result.kind, result.kind.description());
    println!("Source: {}", result.source);
    match &result.disposition {
        Disposition::Persisted(Persisted::File(path)) => {
            println!("Output: {} -> {}", result.destination_table(), path.display());
        }
        Disposition::Persisted(Persisted::Memory(table)) => println!("Output: {table}"),
        Disposition::DryRun => println!("Output: dry run, {} not written", result.destination_table()),
        Disposition::SkippedEmpty => {
            println!("Output: extraction was empty, {} left untouched", result.destination_table());
            return;
        }
    }

    let report = &result.report;
    println!("{}", step_table(report));

    if let Some(dedup) = &report.dedup {
        println!(
            "Duplicates removed: {} by primary key, {} identical rows, {} by composite key",
            dedup.by_primary_key, dedup.by_full_row, dedup.by_composite_key
        );
    }
}

/// Per-step row and cell counts with a totals row.
fn step_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Step"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Removed"),
        header_cell("Nulled"),
        header_cell("Changed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [0, 2, 3, 4, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (idx, step) in report.steps.iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(&step.step),
            Cell::new(step.rows_before),
            Cell::new(step.rows_after),
            count_cell(step.rows_removed(), Color::Red),
            count_cell(step.cells_nulled, Color::Yellow),
            count_cell(step.cells_changed, Color::Green),
        ]);
    }
    let changed: usize = report.steps.iter().map(|s| s.cells_changed).sum();
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.input_rows).add_attribute(Attribute::Bold),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
        count_cell(report.rows_removed(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.cells_nulled(), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(changed, Color::Green).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use rdc_model::{EntityKind, StepReport};

    use super::*;

    #[test]
    fn step_table_has_a_row_per_step_and_a_total() {
        let mut report = RunReport::new(EntityKind::Card, 3);
        report.steps.push(StepReport {
            step: "remove_invalid_rows".to_string(),
            rows_before: 3,
            rows_after: 2,
            cells_nulled: 0,
            cells_changed: 0,
        });
        report.output_rows = 2;
        let rendered = step_table(&report).to_string();
        assert!(rendered.contains("remove_invalid_rows"));
        assert!(rendered.contains("TOTAL"));
    }

    #[test]
    fn skipped_result_targets_the_entity_table() {
        let result = EntityResult {
            kind: EntityKind::Card,
            source: "cards.csv".to_string(),
            report: RunReport::new(EntityKind::Card, 0),
            disposition: Disposition::SkippedEmpty,
        };
        assert_eq!(result.destination_table(), "dim_card_details");
    }
}
