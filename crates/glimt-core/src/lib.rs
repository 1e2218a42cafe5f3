//! Format-dispatch and extraction pipeline: classify an uploaded file by
//! extension, extract a tabular frame (xlsx/xls/csv) or a flat text string
//! (pdf/docx), and hand the result to chart building or word-frequency
//! visualization.

pub mod cache;
pub mod chart;
pub mod cloud;
pub mod error;
pub mod extraction;
pub mod format;
pub mod model;
pub mod pipeline;

pub use chart::{build_chart, ChartKind, ChartSpec};
pub use cloud::{build_word_cloud, WordCloud};
pub use error::GlimtError;
pub use extraction::{extract_pdf_text, PageWindow, PdfExtractor};
pub use format::FormatTag;
pub use model::{Column, ColumnType, Table, TextBlob, Value};
pub use pipeline::{Run, RunState, Session, UploadedFile};
