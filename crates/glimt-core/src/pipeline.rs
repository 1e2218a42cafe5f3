use serde::{Deserialize, Serialize};

use crate::cache::{CacheKey, ExtractionCache};
use crate::chart::{build_chart, ChartKind, ChartSpec};
use crate::cloud::{build_word_cloud, WordCloud};
use crate::error::GlimtError;
use crate::extraction::pdftotext::PdftotextExtractor;
use crate::extraction::{self, PageWindow, PdfExtractor};
use crate::format::FormatTag;
use crate::model::{Table, TextBlob};

/// Displayed text previews are cut to this many characters; the underlying
/// blob is never altered.
pub const EXCERPT_CHARS: usize = 2000;

/// One uploaded file: opaque bytes plus the declared name. Immutable once
/// received, consumed once per pipeline run.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            bytes,
        }
    }
}

/// Observable pipeline state of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Classified,
    Extracted,
    Rendered,
    Failed,
}

/// Canonical in-memory representation produced by extraction.
#[derive(Debug, Clone)]
pub enum Content {
    Table(Table),
    Text(TextBlob),
}

/// Session-scoped pipeline context: the extraction cache and the PDF
/// backend live here, one interactive session each. Every stage is a pure
/// function of explicit inputs, so memoization through the cache is safe.
pub struct Session {
    cache: ExtractionCache,
    pdf_backend: Option<Box<dyn PdfExtractor>>,
    pdf_window: PageWindow,
}

impl Session {
    /// Session with the bundled pdftotext backend and the default
    /// first-five-pages window.
    pub fn new() -> Session {
        Session {
            cache: ExtractionCache::new(),
            pdf_backend: None,
            pdf_window: PageWindow::default(),
        }
    }

    /// Session with a caller-supplied PDF backend (tests use a mock).
    pub fn with_backend(backend: Box<dyn PdfExtractor>) -> Session {
        Session {
            cache: ExtractionCache::new(),
            pdf_backend: Some(backend),
            pdf_window: PageWindow::default(),
        }
    }

    pub fn pdf_window(mut self, window: PageWindow) -> Session {
        self.pdf_window = window;
        self
    }

    pub fn cache(&self) -> &ExtractionCache {
        &self.cache
    }

    /// Run the classify-and-extract half of the pipeline for one upload.
    ///
    /// Idle -> Classified -> Extracted; any parse failure aborts the run and
    /// surfaces as the returned error (the Failed terminal state). Document
    /// formats render immediately: the returned run already carries the word
    /// cloud built from the full extracted text.
    pub fn ingest(&mut self, file: UploadedFile) -> Result<Run<'_>, GlimtError> {
        let format = FormatTag::from_filename(&file.name)?;
        let (content, selected_sheet) = self.extract(&file, format, None)?;

        let (word_cloud, state) = match &content {
            Content::Text(blob) => (build_word_cloud(blob), RunState::Rendered),
            Content::Table(_) => (None, RunState::Extracted),
        };

        Ok(Run {
            session: self,
            file,
            format,
            content,
            selected_sheet,
            word_cloud,
            chart: None,
            state,
        })
    }

    fn extract(
        &mut self,
        file: &UploadedFile,
        format: FormatTag,
        sheet: Option<&str>,
    ) -> Result<(Content, Option<String>), GlimtError> {
        match format {
            FormatTag::Spreadsheet => {
                let sheet = match sheet {
                    Some(name) => name.to_string(),
                    None => self
                        .sheet_names(file)?
                        .into_iter()
                        .next()
                        .ok_or_else(|| GlimtError::Parse("workbook has no sheets".into()))?,
                };
                let key = CacheKey::new("read_sheet", &file.bytes, &sheet)?;
                let bytes = &file.bytes;
                let table = self
                    .cache
                    .table(key, || extraction::spreadsheet::read_sheet(bytes, &sheet))?;
                Ok((Content::Table(table), Some(sheet)))
            }
            FormatTag::DelimitedText => {
                let key = CacheKey::new("read_csv", &file.bytes, &())?;
                let bytes = &file.bytes;
                let table = self
                    .cache
                    .table(key, || extraction::delimited::read_csv(bytes))?;
                Ok((Content::Table(table), None))
            }
            FormatTag::PortableDocument => {
                let window = self.pdf_window;
                let key = CacheKey::new("extract_pdf_text", &file.bytes, &window)?;
                let bytes = &file.bytes;
                let text = match &self.pdf_backend {
                    Some(backend) => {
                        let backend = backend.as_ref();
                        self.cache
                            .text(key, || extraction::extract_pdf_text(bytes, backend, window))?
                    }
                    None => {
                        let backend = Self::bundled_backend(window);
                        self.cache
                            .text(key, || extraction::extract_pdf_text(bytes, &backend, window))?
                    }
                };
                Ok((Content::Text(text), None))
            }
            FormatTag::WordDocument => {
                let key = CacheKey::new("extract_docx_text", &file.bytes, &())?;
                let bytes = &file.bytes;
                let text = self
                    .cache
                    .text(key, || extraction::docx::extract_docx_text(bytes))?;
                Ok((Content::Text(text), None))
            }
        }
    }

    /// The pdftotext backend used when no explicit one was supplied. Built
    /// per extraction so its `-l` page limit tracks the current window.
    fn bundled_backend(window: PageWindow) -> PdftotextExtractor {
        PdftotextExtractor::with_page_limit(window.end)
    }

    fn sheet_names(&mut self, file: &UploadedFile) -> Result<Vec<String>, GlimtError> {
        let key = CacheKey::new("list_sheet_names", &file.bytes, &())?;
        let bytes = &file.bytes;
        self.cache
            .sheets(key, || extraction::spreadsheet::list_sheet_names(bytes))
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

/// One transient upload-and-render run. Holds the extracted representation
/// and re-enters the render stage on every sheet/column/kind change.
pub struct Run<'s> {
    session: &'s mut Session,
    file: UploadedFile,
    format: FormatTag,
    content: Content,
    selected_sheet: Option<String>,
    word_cloud: Option<WordCloud>,
    chart: Option<ChartSpec>,
    state: RunState,
}

impl Run<'_> {
    pub fn format(&self) -> FormatTag {
        self.format
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn file_name(&self) -> &str {
        &self.file.name
    }

    /// Sheet names of the uploaded workbook; empty for non-spreadsheets.
    pub fn sheet_names(&mut self) -> Result<Vec<String>, GlimtError> {
        if self.format != FormatTag::Spreadsheet {
            return Ok(vec![]);
        }
        self.session.sheet_names(&self.file)
    }

    /// Currently selected sheet (spreadsheets only).
    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    /// Re-extract with a different sheet. Any previously built chart is
    /// discarded; the run re-enters the Extracted state.
    pub fn select_sheet(&mut self, sheet: &str) -> Result<(), GlimtError> {
        if self.format != FormatTag::Spreadsheet {
            return Err(GlimtError::Parse(format!(
                "cannot select a sheet in a {} file",
                self.format
            )));
        }
        match self.session.extract(&self.file, self.format, Some(sheet)) {
            Ok((content, selected)) => {
                self.content = content;
                self.selected_sheet = selected;
                self.chart = None;
                self.state = RunState::Extracted;
                Ok(())
            }
            Err(e) => {
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }

    /// The extracted table, for tabular formats.
    pub fn table(&self) -> Option<&Table> {
        match &self.content {
            Content::Table(table) => Some(table),
            Content::Text(_) => None,
        }
    }

    /// First `n` rows of the extracted table.
    pub fn preview(&self, n: usize) -> Option<Table> {
        self.table().map(|t| t.preview(n))
    }

    /// The full extracted text, for document formats.
    pub fn text(&self) -> Option<&TextBlob> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Table(_) => None,
        }
    }

    /// Display excerpt of the extracted text (at most [`EXCERPT_CHARS`]
    /// characters, ellipsis-suffixed when cut). Presentation-only; the blob
    /// handed to the word cloud is always the full text.
    pub fn excerpt(&self) -> Option<String> {
        self.text().map(|t| t.excerpt(EXCERPT_CHARS))
    }

    /// Word cloud built from the full extracted text. None for tabular runs
    /// and for documents with no extractable words — the run still renders
    /// its (empty) excerpt in that case.
    pub fn word_cloud(&self) -> Option<&WordCloud> {
        self.word_cloud.as_ref()
    }

    /// Last built chart, if any.
    pub fn chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    /// Build a chart from the user's ordered column selection. Re-enterable:
    /// every column/kind change is a new call.
    ///
    /// Fewer than two selected columns builds nothing (Ok(None), the run
    /// stays Extracted). A selection naming an absent column fails the run.
    /// Document-format runs have no table and build nothing.
    pub fn render_chart(
        &mut self,
        selection: &[String],
        kind: ChartKind,
        title: Option<String>,
    ) -> Result<Option<ChartSpec>, GlimtError> {
        let table = match self.table() {
            Some(table) => table,
            None => return Ok(None),
        };
        match build_chart(table, selection, kind, title) {
            Ok(Some(spec)) => {
                self.chart = Some(spec.clone());
                self.state = RunState::Rendered;
                Ok(Some(spec))
            }
            Ok(None) => {
                self.chart = None;
                self.state = RunState::Extracted;
                Ok(None)
            }
            Err(e) => {
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }
}
