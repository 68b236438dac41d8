//! Console summaries for `map` and `apply` runs.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use imu_map::{Convention, segment_term_summary};

use crate::types::{ApplyResult, FileStatus, MapResult};

pub fn print_map_summary(result: &MapResult) {
    println!("Dataset: {}", result.dataset);
    println!(
        "Columns: {} total, {} mapped, {} rejected",
        result.columns.len(),
        result.draft.mapping.len(),
        result.draft.rejected.len()
    );
    match result.draft.convention {
        Convention::Dominant(id) => println!("Convention: dominant ({id})"),
        Convention::Mixed => println!("Convention: mixed"),
    }

    if !result.draft.mapping.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Raw column"), header_cell("Canonical")]);
        apply_table_style(&mut table);
        for entry in result.draft.mapping.entries() {
            table.add_row(vec![
                Cell::new(entry.raw.as_str()),
                Cell::new(entry.canonical.to_string())
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }
        println!("{table}");
    }

    if !result.draft.rejected.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Unmapped column"), header_cell("Reason")]);
        apply_table_style(&mut table);
        for rejected in &result.draft.rejected {
            table.add_row(vec![
                dim_cell(rejected.raw.as_str()),
                Cell::new(rejected.reason.to_string()).fg(Color::Yellow),
            ]);
        }
        println!("{table}");
    }

    let terms = segment_term_summary(&result.draft.mapping, &result.vocab);
    if !terms.is_empty() {
        let rendered: Vec<String> = terms
            .iter()
            .map(|(term, segment)| format!("{term} -> {segment}"))
            .collect();
        println!("Segment terms: {}", rendered.join(", "));
    }

    println!("Consistency: {}", result.report.formula());
}

pub fn print_apply_summary(result: &ApplyResult) {
    println!("Dataset: {}", result.dataset);
    println!("Output: {}", result.output_root.display());
    if result.dry_run {
        println!("Dry run: no files were written.");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attempted"),
        header_cell("Converted"),
        header_cell("No relevant columns"),
        header_cell("Failed"),
        header_cell("Columns renamed"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.attempted()),
        count_cell(result.converted(), Color::Green),
        count_cell(result.no_relevant_columns(), Color::Yellow),
        count_cell(result.failed(), Color::Red),
        Cell::new(result.renamed_columns_total()),
    ]);
    println!("{table}");

    if result.has_failures() {
        eprintln!("Failed files:");
        for file in &result.files {
            if file.status == FileStatus::Failed {
                let detail = file.error.as_deref().unwrap_or("unknown error");
                eprintln!("- {}: {}", file.input.display(), detail);
            }
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
