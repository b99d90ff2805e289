use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use shelter_cli::types::{RunResult, TableSummary};

pub fn print_summary(result: &RunResult) {
    if result.dry_run {
        println!("Output: dry run, nothing written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Records"),
        header_cell("Columns"),
        header_cell("File"),
        header_cell("Nulls"),
        header_cell("Dup line_id"),
        header_cell("Bad season"),
        header_cell("Bad weekday"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [1, 2, 4, 5, 6, 7] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 3, CellAlignment::Center);

    let mut total_records = 0usize;
    for summary in &result.tables {
        total_records += summary.records;
        table.add_row(summary_row(summary));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn summary_row(summary: &TableSummary) -> Vec<Cell> {
    let audit = &summary.audit;
    vec![
        Cell::new(summary.table.as_str())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.records),
        Cell::new(summary.columns),
        match &summary.output {
            Some(_) => Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        },
        count_cell(Some(audit.total_nulls()), Color::Yellow),
        count_cell(audit.duplicate_line_ids, Color::Red),
        count_cell(audit.unexpected_seasons, Color::Red),
        count_cell(audit.unexpected_weekdays, Color::Red),
    ]
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
