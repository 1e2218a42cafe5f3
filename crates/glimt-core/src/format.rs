use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GlimtError;

/// Declared format of an uploaded file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Spreadsheet,
    DelimitedText,
    PortableDocument,
    WordDocument,
}

impl FormatTag {
    /// Classify a filename by extension (case-insensitive).
    ///
    /// The interactive shell restricts the selectable types to exactly this
    /// set, but anything else is still rejected here: the core is also
    /// reachable from the CLI where nothing restricts input.
    pub fn from_filename(filename: &str) -> Result<FormatTag, GlimtError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xls" => Ok(FormatTag::Spreadsheet),
            "csv" => Ok(FormatTag::DelimitedText),
            "pdf" => Ok(FormatTag::PortableDocument),
            "docx" => Ok(FormatTag::WordDocument),
            _ => Err(GlimtError::UnsupportedFormat { extension }),
        }
    }

    /// Formats that extract into a rectangular [`Table`](crate::model::Table).
    pub fn is_tabular(&self) -> bool {
        matches!(self, FormatTag::Spreadsheet | FormatTag::DelimitedText)
    }

    /// Formats that extract into a flat [`TextBlob`](crate::model::TextBlob).
    pub fn is_document(&self) -> bool {
        !self.is_tabular()
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatTag::Spreadsheet => write!(f, "spreadsheet"),
            FormatTag::DelimitedText => write!(f, "delimited text"),
            FormatTag::PortableDocument => write!(f, "PDF document"),
            FormatTag::WordDocument => write!(f, "Word document"),
        }
    }
}
