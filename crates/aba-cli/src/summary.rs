use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use aba_core::{LengthMismatch, RecordType, ValidationError};

use crate::types::{GenerateResult, LineIssue, RecordView};

pub fn print_generate_summary(result: &GenerateResult) {
    match result {
        GenerateResult::Written { output, lines } => {
            if let Some(path) = output {
                eprintln!("Wrote {lines} lines to {}", path.display());
            }
        }
        GenerateResult::Invalid(errors) => print_validation_errors(errors),
        GenerateResult::Overflow(mismatches) => print_length_mismatches(mismatches),
    }
}

fn print_validation_errors(errors: &[ValidationError]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Value"),
        header_cell("Rule"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for error in errors {
        table.add_row(vec![
            Cell::new(&error.attribute),
            value_cell(&error.value),
            rule_cell(error.rule.as_str()),
        ]);
    }
    eprintln!("Validation failed: {} error(s)", errors.len());
    eprintln!("{table}");
}

fn print_length_mismatches(mismatches: &[LengthMismatch]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Type"),
        header_cell("Expected"),
        header_cell("Actual"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for mismatch in mismatches {
        table.add_row(vec![
            Cell::new(mismatch.index),
            type_cell(mismatch.record_type),
            Cell::new(mismatch.expected),
            Cell::new(mismatch.actual)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    eprintln!(
        "{} record(s) do not render to the fixed line width",
        mismatches.len()
    );
    eprintln!("{table}");
}

pub fn print_records(records: &[RecordView]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Type"),
        header_cell("Attribute"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for record in records {
        for (idx, attribute) in record.attributes.iter().enumerate() {
            let (line, kind) = if idx == 0 {
                (Cell::new(record.line), type_cell(record.record_type))
            } else {
                (dim_cell(""), dim_cell(""))
            };
            table.add_row(vec![
                line,
                kind,
                Cell::new(attribute.name),
                value_cell(&attribute.value),
            ]);
        }
    }
    println!("{table}");
}

pub fn print_issues(issues: &[LineIssue]) {
    if issues.is_empty() {
        println!("No validation errors.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Type"),
        header_cell("Attribute"),
        header_cell("Value"),
        header_cell("Rule"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.line),
            type_cell(issue.record_type),
            Cell::new(&issue.error.attribute),
            value_cell(&issue.error.value),
            rule_cell(issue.error.rule.as_str()),
        ]);
    }
    println!("Validation failed: {} error(s)", issues.len());
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
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

fn type_cell(record_type: RecordType) -> Cell {
    let color = match record_type {
        RecordType::Descriptive => Color::Blue,
        RecordType::Transaction => Color::Reset,
        RecordType::FileTotal => Color::Magenta,
    };
    Cell::new(record_type).fg(color)
}

fn rule_cell(rule: &str) -> Cell {
    Cell::new(rule).fg(Color::Red)
}

/// Quote values so padding and blanks stay visible.
fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(blank)")
    } else {
        Cell::new(format!("{value:?}"))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
