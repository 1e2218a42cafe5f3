#[derive(Debug, thiserror::Error)]
pub enum GlimtError {
    #[error("unsupported file format '.{extension}'. Supported: xlsx, xls, csv, pdf, docx")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse input: {0}")]
    Parse(String),

    #[error("column '{column}' not found in table")]
    ColumnNotFound { column: String },

    #[error("sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
