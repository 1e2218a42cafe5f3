pub mod delimited;
pub mod docx;
pub mod pdftotext;
pub mod spreadsheet;

use serde::{Deserialize, Serialize};

use crate::error::GlimtError;
use crate::model::TextBlob;

/// Text content extracted from a single page of a PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Zero-based page index.
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per
    /// page in document order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, GlimtError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Zero-based half-open page range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn new(start: usize, end: usize) -> PageWindow {
        PageWindow { start, end }
    }

    /// First `n` pages.
    pub fn first(n: usize) -> PageWindow {
        PageWindow { start: 0, end: n }
    }
}

impl Default for PageWindow {
    /// First five pages, bounding extraction cost for large documents.
    fn default() -> PageWindow {
        PageWindow::first(5)
    }
}

/// Extract the text of the pages inside `window`, joined in page order.
///
/// The window end is clamped to the actual page count; a start beyond the
/// last page yields an empty blob, never an out-of-range error. Pages
/// without extractable text contribute nothing.
pub fn extract_pdf_text(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    window: PageWindow,
) -> Result<TextBlob, GlimtError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let end = window.end.min(pages.len());
    let start = window.start.min(end);

    let parts: Vec<&str> = pages[start..end]
        .iter()
        .map(|p| p.text.trim())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(TextBlob::new(parts.join(" ")))
}

/// Turn raw header cells into unique, non-empty column names: blanks become
/// `column_N` (1-based position), repeats get a ` (2)`, ` (3)`... suffix.
/// A suffixed candidate that collides with a literal header already taken
/// (e.g. a real `Amount (2)` column) keeps counting until the name is free.
pub(crate) fn unique_headers(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    use std::collections::{HashMap, HashSet};

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::new();
    for (i, header) in raw.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("column_{}", i + 1)
        } else {
            trimmed.to_string()
        };
        let mut n = counts.get(&base).copied().unwrap_or(0) + 1;
        let mut candidate = if n == 1 {
            base.clone()
        } else {
            format!("{base} ({n})")
        };
        while !taken.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{base} ({n})");
        }
        counts.insert(base, n);
        names.push(candidate);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticPages(Vec<PageContent>);

    impl PdfExtractor for StaticPages {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, GlimtError> {
            Ok(self.0.clone())
        }

        fn backend_name(&self) -> &str {
            "static"
        }
    }

    fn ten_pages() -> StaticPages {
        StaticPages(
            (0..10)
                .map(|i| PageContent {
                    page_number: i,
                    text: format!("page{i}"),
                })
                .collect(),
        )
    }

    #[test]
    fn window_selects_exactly_the_requested_pages() {
        let blob = extract_pdf_text(&[], &ten_pages(), PageWindow::new(0, 5)).unwrap();
        assert_eq!(blob.as_str(), "page0 page1 page2 page3 page4");
    }

    #[test]
    fn window_end_is_clamped_to_page_count() {
        let blob = extract_pdf_text(&[], &ten_pages(), PageWindow::new(8, 20)).unwrap();
        assert_eq!(blob.as_str(), "page8 page9");
    }

    #[test]
    fn window_start_beyond_document_yields_empty_blob() {
        let blob = extract_pdf_text(&[], &ten_pages(), PageWindow::new(12, 20)).unwrap();
        assert!(blob.is_empty());
    }

    #[test]
    fn pages_without_text_contribute_nothing() {
        let pages = StaticPages(vec![
            PageContent {
                page_number: 0,
                text: "intro".into(),
            },
            PageContent {
                page_number: 1,
                text: "   ".into(),
            },
            PageContent {
                page_number: 2,
                text: "outro".into(),
            },
        ]);
        let blob = extract_pdf_text(&[], &pages, PageWindow::new(0, 3)).unwrap();
        assert_eq!(blob.as_str(), "intro outro");
    }

    #[test]
    fn headers_are_deduplicated_and_filled() {
        let names = unique_headers(
            ["Amount", "", "Amount", "Name"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(names, vec!["Amount", "column_2", "Amount (2)", "Name"]);
    }

    #[test]
    fn suffixed_header_skips_past_a_literal_collision() {
        let names = unique_headers(
            ["Amount", "Amount (2)", "Amount"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(names, vec!["Amount", "Amount (2)", "Amount (3)"]);
    }
}
