use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GlimtError;

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Number(Decimal),
    Text(String),
    Date(String),
    Empty,
}

impl Value {
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Empty => Ok(()),
        }
    }
}

/// Apparent scalar type of a column, inferred from its non-empty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Text,
    Date,
    Mixed,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Number => write!(f, "number"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Date => write!(f, "date"),
            ColumnType::Mixed => write!(f, "mixed"),
        }
    }
}

/// A named column of equal-typed-ish values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Column {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Infer the column type from its non-empty values: a uniform kind wins,
    /// anything heterogeneous is Mixed, an all-empty column counts as text.
    pub fn inferred_type(&self) -> ColumnType {
        let mut inferred: Option<ColumnType> = None;
        for value in &self.values {
            let kind = match value {
                Value::Number(_) => ColumnType::Number,
                Value::Text(_) => ColumnType::Text,
                Value::Date(_) => ColumnType::Date,
                Value::Empty => continue,
            };
            match inferred {
                None => inferred = Some(kind),
                Some(seen) if seen == kind => {}
                Some(_) => return ColumnType::Mixed,
            }
        }
        inferred.unwrap_or(ColumnType::Text)
    }
}

/// An immutable rectangular table: ordered columns with unique names and
/// equal row counts. Selecting a subset produces a new table, never an
/// in-place edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, enforcing the name-uniqueness and equal-length
    /// invariants.
    pub fn new(columns: Vec<Column>) -> Result<Table, GlimtError> {
        let mut seen = std::collections::HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(GlimtError::Parse(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        if let Some(first) = columns.first() {
            let rows = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != rows) {
                return Err(GlimtError::Parse(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.values.len(),
                    rows
                )));
            }
        }
        Ok(Table { columns })
    }

    pub fn empty() -> Table {
        Table { columns: vec![] }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// First `n` rows as a new table (all columns kept).
    pub fn preview(&self, n: usize) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.iter().take(n).cloned().collect(),
                })
                .collect(),
        }
    }
}

/// Flattened text of a document: non-empty text units concatenated in
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlob(String);

impl TextBlob {
    pub fn new(text: impl Into<String>) -> TextBlob {
        TextBlob(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when there is no extractable content (whitespace only counts as
    /// empty).
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Presentation-only preview: at most `max_chars` characters, with a
    /// trailing ellipsis marker only when something was cut. The blob itself
    /// is never altered.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.0.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

impl fmt::Display for TextBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
