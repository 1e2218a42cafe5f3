use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_decimal::Decimal;

use crate::error::GlimtError;
use crate::extraction::unique_headers;
use crate::model::{Column, Table, Value};

/// Sheet names of a workbook, in file order. Side-effect free; used to let
/// the caller pick a sheet before reading it.
pub fn list_sheet_names(bytes: &[u8]) -> Result<Vec<String>, GlimtError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| GlimtError::Parse(format!("failed to open workbook: {e}")))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read exactly the named sheet into a table. The first row is the header
/// row; ragged data rows are padded with empty cells to the header width.
pub fn read_sheet(bytes: &[u8], sheet_name: &str) -> Result<Table, GlimtError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| GlimtError::Parse(format!("failed to open workbook: {e}")))?;

    if !workbook.sheet_names().iter().any(|s| s == sheet_name) {
        return Err(GlimtError::SheetNotFound {
            sheet: sheet_name.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| GlimtError::Parse(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let header_row = match rows.next() {
        Some(row) => row,
        None => return Ok(Table::empty()),
    };

    let names = unique_headers(header_row.iter().map(cell_to_header));
    let mut columns: Vec<Column> = names
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for row in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            let value = row.get(i).map(cell_to_value).unwrap_or(Value::Empty);
            column.values.push(value);
        }
    }

    Table::new(columns)
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => format!("{other}"),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Empty
            } else {
                Value::Text(trimmed.to_string())
            }
        }
        Data::Float(f) => Value::Number(f64_to_decimal(*f)),
        Data::Int(i) => Value::Number(Decimal::from(*i)),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::DateTime(dt) => Value::Date(dt.to_string()),
        Data::DateTimeIso(s) => Value::Date(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(format!("{e}")),
    }
}

/// Convert f64 to Decimal, preserving reasonable precision.
///
/// Uses string round-trip to avoid floating-point artifacts
/// (e.g., 0.0035_f64 becoming 0.00349999...).
pub(crate) fn f64_to_decimal(f: f64) -> Decimal {
    let s = format!("{f}");
    s.parse::<Decimal>()
        .unwrap_or_else(|_| Decimal::try_from(f).unwrap_or_default())
}
