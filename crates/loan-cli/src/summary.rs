use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use loan_encode::SchemaDrift;
use loan_encode::rules::{CATEGORICAL_RULES, Encoding, NUMERIC_RULES, one_hot_feature};
use loan_model::{FeatureRow, Prediction, Schema};
use loan_schema::LoadSummary;

use loan_cli::pipeline::Diagnosis;

pub fn print_prediction(prediction: &Prediction) {
    println!("{}", prediction.message());
}

pub fn print_row(row: &FeatureRow) {
    println!("{}", row_table(row));
}

pub fn row_table(row: &FeatureRow) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Feature"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let defaults = row.schema().defaults();
    for (idx, ((name, value), default)) in row.iter().zip(defaults).enumerate() {
        let changed = value.to_bits() != default.to_bits();
        table.add_row(vec![
            dim_cell(idx),
            Cell::new(name),
            value_cell(value, changed),
        ]);
    }
    table
}

pub fn print_drift(drift: &[SchemaDrift]) {
    if drift.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Selection"),
        header_cell("Missing feature"),
    ]);
    apply_table_style(&mut table);
    for record in drift {
        table.add_row(vec![
            Cell::new(record.source.label()),
            record
                .value
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&record.feature).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Dropped (no schema feature):");
    println!("{table}");
}

pub fn print_schema(summary: &LoadSummary, schema: &Schema) {
    println!("Schema: {}", summary.path.display());
    println!("Fingerprint: {}", summary.fingerprint);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Feature"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (idx, (name, default)) in schema.iter().enumerate() {
        table.add_row(vec![dim_cell(idx), Cell::new(name), Cell::new(default)]);
    }
    println!("{table}");
}

pub fn print_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Choices"),
        header_cell("Features"),
    ]);
    apply_table_style(&mut table);
    for rule in CATEGORICAL_RULES {
        let features = match rule.encoding {
            Encoding::Indicator { feature, sentinel } => format!("{feature} (= {sentinel})"),
            Encoding::OneHot { prefix, baseline } => rule
                .field
                .choices()
                .iter()
                .filter(|choice| Some(**choice) != baseline)
                .map(|choice| one_hot_feature(prefix, choice))
                .collect::<Vec<_>>()
                .join(", "),
        };
        table.add_row(vec![
            Cell::new(rule.field.label()).add_attribute(Attribute::Bold),
            Cell::new(rule.field.choices().join(" | ")),
            Cell::new(features),
        ]);
    }
    for rule in NUMERIC_RULES {
        table.add_row(vec![
            Cell::new(rule.field.label()).add_attribute(Attribute::Bold),
            dim_cell(if rule.field.is_integer() {
                "integer >= 0"
            } else {
                "number >= 0"
            }),
            Cell::new(rule.feature),
        ]);
    }
    println!("{table}");
}

pub fn print_diagnosis(diagnosis: &Diagnosis) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Artifact"),
        header_cell("Path"),
        header_cell("Kind"),
        header_cell("Features"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("schema").add_attribute(Attribute::Bold),
        Cell::new(diagnosis.schema.path.display()),
        dim_cell("-"),
        Cell::new(diagnosis.schema.feature_count),
        Cell::new(&diagnosis.schema.fingerprint),
    ]);
    table.add_row(vec![
        Cell::new("model").add_attribute(Attribute::Bold),
        Cell::new(diagnosis.model.path.display()),
        Cell::new(diagnosis.model.kind),
        Cell::new(diagnosis.model.n_features),
        Cell::new(&diagnosis.model.fingerprint),
    ]);
    println!("{table}");

    let alignment = &diagnosis.alignment;
    for name in &alignment.missing_in_schema {
        println!("model feature missing from schema: {name}");
    }
    for name in &alignment.missing_in_model {
        println!("schema feature unused by model: {name}");
    }
    if !alignment.order_matches {
        println!("schema and model list their features in different orders");
    }
    if let Some((model, schema)) = alignment.width_mismatch {
        println!("model reads {model} features, schema has {schema}");
    }
    for name in &diagnosis.unreachable {
        println!("form can select '{name}', which the schema lacks");
    }
    if diagnosis.is_healthy() {
        println!("Schema and model agree.");
    } else {
        println!("Schema and model disagree; predictions are undefined.");
    }
}

fn apply_table_style(table: &mut Table) {
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

fn value_cell(value: f64, changed: bool) -> Cell {
    if changed {
        Cell::new(value)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
