use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::GlimtError;
use crate::model::TextBlob;

/// Extract paragraph text from a .docx byte stream.
///
/// Paragraphs whose trimmed text is empty are dropped; the rest are joined
/// with a single space, preserving document order.
pub fn extract_docx_text(bytes: &[u8]) -> Result<TextBlob, GlimtError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| GlimtError::Parse(format!("not a valid docx archive: {e}")))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| GlimtError::Parse(format!("word/document.xml missing: {e}")))?
        .read_to_string(&mut document_xml)
        .map_err(|e| GlimtError::Parse(format!("failed to read document.xml: {e}")))?;

    paragraphs_from_xml(&document_xml)
}

/// Pull-parse WordprocessingML: text lives in `w:t` runs inside `w:p`
/// paragraphs; tabs and line breaks count as a space within a paragraph.
fn paragraphs_from_xml(xml: &str) -> Result<TextBlob, GlimtError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" | b"w:br" => current.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| GlimtError::Parse(format!("invalid text in document.xml: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let trimmed = current.trim();
                    if !trimmed.is_empty() {
                        paragraphs.push(trimmed.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GlimtError::Parse(format!("malformed document.xml: {e}")));
            }
            _ => {}
        }
    }

    Ok(TextBlob::new(paragraphs.join(" ")))
}
