use rust_decimal::Decimal;

use crate::error::GlimtError;
use crate::extraction::unique_headers;
use crate::model::{Column, Table, Value};

/// Read a whole delimited byte stream as one table. The first record is the
/// header row; each cell is typed by its apparent scalar form.
pub fn read_csv(bytes: &[u8]) -> Result<Table, GlimtError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| GlimtError::Parse(format!("malformed CSV: {e}")))?
        .clone();

    let names = unique_headers(headers.iter().map(|h| h.to_string()));
    let mut columns: Vec<Column> = names
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for record in reader.records() {
        let record = record.map_err(|e| GlimtError::Parse(format!("malformed CSV: {e}")))?;
        for (i, column) in columns.iter_mut().enumerate() {
            let value = record.get(i).map(parse_scalar).unwrap_or(Value::Empty);
            column.values.push(value);
        }
    }

    Table::new(columns)
}

fn parse_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Empty;
    }
    match trimmed.parse::<Decimal>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(trimmed.to_string()),
    }
}
