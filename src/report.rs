use clap::ValueEnum;
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Rendered rows with their column headers. Cells keep JSON types so the
/// same table can be printed as text or serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ReportTable {
    pub fn new(columns: &[&str], title: Option<String>) -> Self {
        ReportTable {
            title,
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: vec![],
        }
    }

    pub fn add_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Table => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string_pretty(&self.to_json()),
        }
    }

    fn to_text(&self) -> String {
        let mut table = Table::new();
        table.set_format(*FORMAT_BOX_CHARS);
        table.set_titles(Row::new(
            self.columns.iter().map(|column| Cell::new(column)).collect(),
        ));
        for row in &self.rows {
            table.add_row(Row::new(
                row.iter().map(|value| Cell::new(&display_cell(value))).collect(),
            ));
        }
        match &self.title {
            Some(title) => format!("{}\n{}", title, table),
            None => table.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    let object: Map<String, Value> = self
                        .columns
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect();
                    Value::Object(object)
                })
                .collect(),
        )
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
