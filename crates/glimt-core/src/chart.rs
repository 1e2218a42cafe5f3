use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GlimtError;
use crate::model::{Table, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Line => write!(f, "line"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = GlimtError;

    fn from_str(s: &str) -> Result<ChartKind, GlimtError> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "line" => Ok(ChartKind::Line),
            "scatter" => Ok(ChartKind::Scatter),
            other => Err(GlimtError::Parse(format!(
                "unknown chart kind '{other}' (expected bar, pie, line or scatter)"
            ))),
        }
    }
}

/// Declarative description of one chart, independent of any rendering
/// library: a category axis, a numeric axis and a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_column: String,
    pub y_column: String,
    /// Category axis values, one per table row, in row order.
    pub categories: Vec<Value>,
    /// Numeric axis values; None where the cell is not numeric.
    pub values: Vec<Option<Decimal>>,
}

/// Build a chart from an ordered column selection: the first selected
/// column is the x/category axis, the second the y/value axis.
///
/// Fewer than two selected columns is the expected "nothing to plot yet"
/// state and returns Ok(None). Rows keep their order for every kind; a Line
/// over an unsorted x column zig-zags on purpose. Pie rows whose y value is
/// missing, non-numeric or non-positive are dropped from the chart entirely
/// rather than drawn as zero-sized slices.
pub fn build_chart(
    table: &Table,
    selection: &[String],
    kind: ChartKind,
    title: Option<String>,
) -> Result<Option<ChartSpec>, GlimtError> {
    let (x_name, y_name) = match (selection.first(), selection.get(1)) {
        (Some(x), Some(y)) => (x.as_str(), y.as_str()),
        _ => return Ok(None),
    };

    let x = table.column(x_name).ok_or_else(|| GlimtError::ColumnNotFound {
        column: x_name.to_string(),
    })?;
    let y = table.column(y_name).ok_or_else(|| GlimtError::ColumnNotFound {
        column: y_name.to_string(),
    })?;

    let mut categories = Vec::with_capacity(x.values.len());
    let mut values = Vec::with_capacity(y.values.len());
    for (category, value) in x.values.iter().zip(&y.values) {
        let numeric = value.as_number();
        if kind == ChartKind::Pie {
            match numeric {
                Some(n) if n > Decimal::ZERO => {
                    categories.push(category.clone());
                    values.push(Some(n));
                }
                _ => continue,
            }
        } else {
            categories.push(category.clone());
            values.push(numeric);
        }
    }

    let title = title.unwrap_or_else(|| default_title(kind, x_name, y_name));

    Ok(Some(ChartSpec {
        kind,
        title,
        x_column: x_name.to_string(),
        y_column: y_name.to_string(),
        categories,
        values,
    }))
}

fn default_title(kind: ChartKind, x: &str, y: &str) -> String {
    match kind {
        ChartKind::Bar => format!("{y} by {x}"),
        ChartKind::Pie => format!("{y} distribution by {x}"),
        ChartKind::Line => format!("{y} trend by {x}"),
        ChartKind::Scatter => format!("{y} vs {x}"),
    }
}
