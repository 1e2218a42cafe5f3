//! Integration tests for the upload-and-render pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without invoking
//! pdftotext, so these tests run without poppler-utils. Tabular inputs are
//! in-memory CSV bytes; docx and xlsx inputs are zip archives built
//! in-memory.

use std::io::Write;

use glimt_core::error::GlimtError;
use glimt_core::extraction::{PageContent, PageWindow, PdfExtractor};
use glimt_core::pipeline::{Session, UploadedFile, EXCERPT_CHARS};
use glimt_core::{ChartKind, RunState, Value};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, GlimtError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn pages(texts: &[&str]) -> Vec<PageContent> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| PageContent {
            page_number: i,
            text: t.to_string(),
        })
        .collect()
}

fn pdf_session(texts: &[&str]) -> Session {
    Session::with_backend(Box::new(MockExtractor {
        pages: pages(texts),
    }))
}

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for p in paragraphs {
        xml.push_str("<w:p><w:r><w:t>");
        xml.push_str(p);
        xml.push_str("</w:t></w:r></w:p>");
    }
    xml.push_str("</w:body></w:document>");

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// Minimal two-sheet workbook built in-memory: "Totals" (region/amount,
/// two rows) followed by "Notes" (a/b/c, one row). Inline strings only, so
/// no shared-strings part is needed.
fn xlsx_bytes() -> Vec<u8> {
    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;
    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Totals" sheetId="1" r:id="rId1"/><sheet name="Notes" sheetId="2" r:id="rId2"/></sheets></workbook>"#;
    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#;
    const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>region</t></is></c><c r="B1" t="inlineStr"><is><t>amount</t></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>north</t></is></c><c r="B2"><v>10</v></c></row><row r="3"><c r="A3" t="inlineStr"><is><t>south</t></is></c><c r="B3"><v>25.5</v></c></row></sheetData></worksheet>"#;
    const SHEET2: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>a</t></is></c><c r="B1" t="inlineStr"><is><t>b</t></is></c><c r="C1" t="inlineStr"><is><t>c</t></is></c></row><row r="2"><c r="A2"><v>1</v></c><c r="B2"><v>2</v></c><c r="C2"><v>3</v></c></row></sheetData></worksheet>"#;

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", SHEET1),
        ("xl/worksheets/sheet2.xml", SHEET2),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

// ---------------------------------------------------------------------------
// Test 1: CSV upload extracts a table and charts on demand
// ---------------------------------------------------------------------------
#[test]
fn csv_upload_extracts_and_charts() {
    let mut session = Session::new();
    let mut run = session
        .ingest(UploadedFile::new(
            "sales.csv",
            b"region,amount\nnorth,10\nsouth,25\n".to_vec(),
        ))
        .unwrap();

    assert_eq!(run.state(), RunState::Extracted);
    let table = run.table().unwrap();
    assert_eq!(table.column_names(), vec!["region", "amount"]);
    assert_eq!(table.row_count(), 2);

    // One selected column: nothing to chart yet, not an error.
    let none = run
        .render_chart(&["region".into()], ChartKind::Bar, None)
        .unwrap();
    assert!(none.is_none());
    assert_eq!(run.state(), RunState::Extracted);

    // Two columns: chart built, run rendered.
    let spec = run
        .render_chart(&["region".into(), "amount".into()], ChartKind::Bar, None)
        .unwrap()
        .unwrap();
    assert_eq!(run.state(), RunState::Rendered);
    assert_eq!(spec.x_column, "region");
    assert_eq!(spec.y_column, "amount");
    assert_eq!(spec.categories[0], Value::Text("north".into()));
}

// ---------------------------------------------------------------------------
// Test 2: chart x/y follow selection order, re-rendering is re-enterable
// ---------------------------------------------------------------------------
#[test]
fn chart_axes_follow_selection_order() {
    let mut session = Session::new();
    let mut run = session
        .ingest(UploadedFile::new("t.csv", b"A,B\n1,2\n3,4\n".to_vec()))
        .unwrap();

    let spec = run
        .render_chart(&["A".into(), "B".into()], ChartKind::Bar, None)
        .unwrap()
        .unwrap();
    assert_eq!((spec.x_column.as_str(), spec.y_column.as_str()), ("A", "B"));

    // Swapped selection swaps the axes on the next render.
    let spec = run
        .render_chart(&["B".into(), "A".into()], ChartKind::Line, None)
        .unwrap()
        .unwrap();
    assert_eq!((spec.x_column.as_str(), spec.y_column.as_str()), ("B", "A"));
    assert_eq!(run.state(), RunState::Rendered);
}

// ---------------------------------------------------------------------------
// Test 3: a bad column selection fails the run
// ---------------------------------------------------------------------------
#[test]
fn missing_chart_column_fails_the_run() {
    let mut session = Session::new();
    let mut run = session
        .ingest(UploadedFile::new("t.csv", b"A,B\n1,2\n".to_vec()))
        .unwrap();

    let result = run.render_chart(&["A".into(), "nope".into()], ChartKind::Pie, None);
    assert!(matches!(
        result,
        Err(GlimtError::ColumnNotFound { column }) if column == "nope"
    ));
    assert_eq!(run.state(), RunState::Failed);
}

// ---------------------------------------------------------------------------
// Test 4: PDF default window reads the first five pages only
// ---------------------------------------------------------------------------
#[test]
fn pdf_default_window_is_first_five_pages() {
    let texts: Vec<String> = (0..10).map(|i| format!("page{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
    let mut session = pdf_session(&refs);

    let run = session
        .ingest(UploadedFile::new("doc.pdf", vec![1, 2, 3]))
        .unwrap();

    assert_eq!(run.state(), RunState::Rendered);
    assert_eq!(
        run.text().unwrap().as_str(),
        "page0 page1 page2 page3 page4"
    );
    assert!(run.word_cloud().is_some());
}

// ---------------------------------------------------------------------------
// Test 5: window past the end of the document clamps instead of failing
// ---------------------------------------------------------------------------
#[test]
fn pdf_window_clamps_to_page_count() {
    let texts: Vec<String> = (0..10).map(|i| format!("page{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
    let mut session = pdf_session(&refs).pdf_window(PageWindow::new(8, 20));

    let run = session
        .ingest(UploadedFile::new("doc.pdf", vec![1, 2, 3]))
        .unwrap();

    assert_eq!(run.text().unwrap().as_str(), "page8 page9");
}

// ---------------------------------------------------------------------------
// Test 6: text excerpt truncates at 2000 chars without touching the blob
// ---------------------------------------------------------------------------
#[test]
fn excerpt_is_presentation_only() {
    let long_page = "word ".repeat(600); // 3000 chars
    let mut session = pdf_session(&[long_page.as_str()]);

    let run = session
        .ingest(UploadedFile::new("doc.pdf", vec![1]))
        .unwrap();

    let excerpt = run.excerpt().unwrap();
    assert_eq!(excerpt.chars().count(), EXCERPT_CHARS + 3);
    assert!(excerpt.ends_with("..."));
    // The underlying blob keeps the full text.
    assert!(run.text().unwrap().as_str().len() > EXCERPT_CHARS);
}

// ---------------------------------------------------------------------------
// Test 7: docx paragraphs flatten with empties dropped
// ---------------------------------------------------------------------------
#[test]
fn docx_upload_flattens_paragraphs() {
    let bytes = docx_bytes(&["Hello", "", "  ", "World"]);
    let mut session = Session::new();

    let run = session
        .ingest(UploadedFile::new("letter.docx", bytes))
        .unwrap();

    assert_eq!(run.state(), RunState::Rendered);
    assert_eq!(run.text().unwrap().as_str(), "Hello World");
    assert!(run.word_cloud().is_some());
}

// ---------------------------------------------------------------------------
// Test 8: a document with no words still renders (empty excerpt, no cloud)
// ---------------------------------------------------------------------------
#[test]
fn empty_document_renders_without_cloud() {
    let bytes = docx_bytes(&[]);
    let mut session = Session::new();

    let run = session
        .ingest(UploadedFile::new("blank.docx", bytes))
        .unwrap();

    assert_eq!(run.state(), RunState::Rendered);
    assert_eq!(run.excerpt().unwrap(), "");
    assert!(run.word_cloud().is_none());
}

// ---------------------------------------------------------------------------
// Test 9: corrupt container bytes abort the run with a parse error
// ---------------------------------------------------------------------------
#[test]
fn corrupt_docx_is_a_parse_error() {
    let mut session = Session::new();
    let result = session.ingest(UploadedFile::new(
        "broken.docx",
        b"not a zip archive".to_vec(),
    ));
    assert!(matches!(result, Err(GlimtError::Parse(_))));
}

// ---------------------------------------------------------------------------
// Test 10: unsupported extensions are rejected before extraction
// ---------------------------------------------------------------------------
#[test]
fn unsupported_extension_is_rejected() {
    let mut session = Session::new();
    let result = session.ingest(UploadedFile::new("notes.txt", b"hello".to_vec()));
    assert!(matches!(
        result,
        Err(GlimtError::UnsupportedFormat { extension }) if extension == "txt"
    ));
}

// ---------------------------------------------------------------------------
// Test 11: repeated ingest of identical bytes hits the extraction cache
// ---------------------------------------------------------------------------
#[test]
fn repeated_ingest_hits_the_cache() {
    let bytes = b"A,B\n1,2\n".to_vec();
    let mut session = Session::new();

    {
        let run = session
            .ingest(UploadedFile::new("t.csv", bytes.clone()))
            .unwrap();
        assert!(run.table().is_some());
    }
    assert_eq!(session.cache().misses(), 1);
    assert_eq!(session.cache().hits(), 0);

    {
        let run = session.ingest(UploadedFile::new("t.csv", bytes)).unwrap();
        assert!(run.table().is_some());
    }
    assert_eq!(session.cache().misses(), 1);
    assert_eq!(session.cache().hits(), 1);
}

// ---------------------------------------------------------------------------
// Test 12: selecting a sheet only makes sense for spreadsheets
// ---------------------------------------------------------------------------
#[test]
fn sheet_selection_rejected_for_csv() {
    let mut session = Session::new();
    let mut run = session
        .ingest(UploadedFile::new("t.csv", b"A,B\n1,2\n".to_vec()))
        .unwrap();

    assert!(run.select_sheet("Sheet1").is_err());
    assert!(run.sheet_names().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test 13: a window wider than the default extracts that many pages
// ---------------------------------------------------------------------------
#[test]
fn widened_window_reaches_past_the_default_bound() {
    let texts: Vec<String> = (0..10).map(|i| format!("page{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
    let mut session = pdf_session(&refs).pdf_window(PageWindow::first(8));

    let run = session
        .ingest(UploadedFile::new("doc.pdf", vec![1, 2, 3]))
        .unwrap();

    assert_eq!(
        run.text().unwrap().as_str(),
        "page0 page1 page2 page3 page4 page5 page6 page7"
    );
}

// ---------------------------------------------------------------------------
// Test 14: xlsx sheets keep workbook order; selection switches tables
// ---------------------------------------------------------------------------
#[test]
fn xlsx_sheets_keep_workbook_order() {
    let mut session = Session::new();
    let mut run = session
        .ingest(UploadedFile::new("book.xlsx", xlsx_bytes()))
        .unwrap();

    assert_eq!(run.sheet_names().unwrap(), vec!["Totals", "Notes"]);
    assert_eq!(run.selected_sheet(), Some("Totals"));

    let table = run.table().unwrap();
    assert_eq!(table.column_names(), vec!["region", "amount"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("amount").unwrap().values[1].to_string(), "25.5");

    run.select_sheet("Notes").unwrap();
    assert_eq!(run.selected_sheet(), Some("Notes"));
    let table = run.table().unwrap();
    assert_eq!(table.column_names(), vec!["a", "b", "c"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(run.state(), RunState::Extracted);
}

// ---------------------------------------------------------------------------
// Test 15: selecting an absent sheet fails the run
// ---------------------------------------------------------------------------
#[test]
fn missing_sheet_fails_the_run() {
    let mut session = Session::new();
    let mut run = session
        .ingest(UploadedFile::new("book.xlsx", xlsx_bytes()))
        .unwrap();

    let result = run.select_sheet("Ghost");
    assert!(matches!(
        result,
        Err(GlimtError::SheetNotFound { sheet }) if sheet == "Ghost"
    ));
    assert_eq!(run.state(), RunState::Failed);
}
