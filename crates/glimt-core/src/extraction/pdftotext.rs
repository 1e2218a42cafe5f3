use std::io::Write;
use std::process::Command;

use crate::error::GlimtError;
use crate::extraction::{PageContent, PdfExtractor};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so extracted previews keep their whitespace
/// alignment. Pages arrive separated by form feeds on stdout.
pub struct PdftotextExtractor {
    page_limit: Option<usize>,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { page_limit: None }
    }

    /// Stop extraction after `pages` pages (`pdftotext -l`), bounding the
    /// cost of extracting from very large documents. pdftotext clamps the
    /// limit to the actual page count itself.
    pub fn with_page_limit(pages: usize) -> Self {
        PdftotextExtractor {
            page_limit: Some(pages),
        }
    }

    /// The configured `-l` page limit, if any.
    pub fn page_limit(&self) -> Option<usize> {
        self.page_limit
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, GlimtError> {
        // Write PDF bytes to a temp file; dropped (and deleted) on every
        // exit path, including errors.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| GlimtError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| GlimtError::Extraction(e.to_string()))?;

        let mut command = Command::new("pdftotext");
        command.arg("-layout");
        if let Some(limit) = self.page_limit {
            if limit > 0 {
                command.arg("-l").arg(limit.to_string());
            }
        }

        let output = command
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GlimtError::PdftotextNotFound
                } else {
                    GlimtError::Extraction(format!("pdftotext failed: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GlimtError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);

        // pdftotext separates pages with a form feed; the trailing one
        // produces a final empty chunk that is not a page.
        let mut pages: Vec<PageContent> = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| PageContent {
                page_number: i,
                text: page_text.trim().to_string(),
            })
            .collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.text.is_empty()) {
            pages.pop();
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
