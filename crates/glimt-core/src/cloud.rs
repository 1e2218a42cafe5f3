use std::collections::HashMap;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::error::GlimtError;
use crate::model::TextBlob;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;
/// Cap on distinct rendered words.
pub const MAX_WORDS: usize = 200;

const MIN_FONT_SIZE: f32 = 12.0;
const MAX_FONT_SIZE: f32 = 72.0;
const PADDING: f32 = 8.0;

const PALETTE: &[&str] = &["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

/// Common English words excluded from the frequency ranking.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "before", "being", "between", "both", "but", "by", "can", "could", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "hers", "him", "his", "how", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours",
];

/// One word placed on the canvas. `y` is the text baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
}

/// Word-frequency visualization on a fixed canvas. Words are ordered by
/// frequency rank (descending, ties alphabetical); the exact placement is
/// not part of the contract, the rendered set and size ordering are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

/// Build a word cloud from extracted text.
///
/// Returns None when the text is empty after trimming, or when nothing
/// survives tokenization — the expected state for documents with no
/// extractable words, not a failure.
pub fn build_word_cloud(text: &TextBlob) -> Option<WordCloud> {
    if text.is_empty() {
        return None;
    }
    let ranked = rank_words(text.as_str());
    if ranked.is_empty() {
        return None;
    }
    Some(layout(&ranked))
}

/// Tokenize, drop stop words and rank by frequency, capped at [`MAX_WORDS`].
fn rank_words(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        let word = token.to_lowercase();
        if word.chars().count() < 2 || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // Frequency descending, ties alphabetical, so the rendered set is stable.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(MAX_WORDS);
    ranked
}

/// Greedy left-to-right, row-wrapping placement. Words that no longer fit
/// on the canvas are cut from the tail of the ranking.
fn layout(ranked: &[(String, usize)]) -> WordCloud {
    let max_count = ranked.first().map(|(_, c)| *c).unwrap_or(1) as f32;
    let min_count = ranked.last().map(|(_, c)| *c).unwrap_or(1) as f32;
    let span = (max_count - min_count).max(1.0);

    let mut words = Vec::new();
    let mut x = PADDING;
    let mut y = PADDING;
    let mut row_height = 0.0f32;

    for (word, count) in ranked {
        let scale = (*count as f32 - min_count) / span;
        let font_size = MIN_FONT_SIZE + scale * (MAX_FONT_SIZE - MIN_FONT_SIZE);
        // Crude glyph metrics: advance ~0.6em, line height ~1.2em.
        let word_width = word.chars().count() as f32 * font_size * 0.6;
        let word_height = font_size * 1.2;

        if x + word_width > CANVAS_WIDTH as f32 - PADDING {
            x = PADDING;
            y += row_height + PADDING;
            row_height = 0.0;
        }
        if y + word_height > CANVAS_HEIGHT as f32 - PADDING {
            break;
        }

        words.push(PlacedWord {
            text: word.clone(),
            count: *count,
            font_size,
            x,
            y: y + font_size,
        });
        x += word_width + PADDING;
        row_height = row_height.max(word_height);
    }

    WordCloud {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        words,
    }
}

impl WordCloud {
    /// Render to a standalone SVG document: white background, one text
    /// element per placed word.
    pub fn to_svg(&self) -> Result<String, GlimtError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(svg_error)?;

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute(("width", self.width.to_string().as_str()));
        svg.push_attribute(("height", self.height.to_string().as_str()));
        writer.write_event(Event::Start(svg)).map_err(svg_error)?;

        let mut background = BytesStart::new("rect");
        background.push_attribute(("width", "100%"));
        background.push_attribute(("height", "100%"));
        background.push_attribute(("fill", "white"));
        writer
            .write_event(Event::Empty(background))
            .map_err(svg_error)?;

        for (i, word) in self.words.iter().enumerate() {
            let mut text = BytesStart::new("text");
            text.push_attribute(("x", format!("{:.1}", word.x).as_str()));
            text.push_attribute(("y", format!("{:.1}", word.y).as_str()));
            text.push_attribute(("font-size", format!("{:.1}", word.font_size).as_str()));
            text.push_attribute(("font-family", "sans-serif"));
            text.push_attribute(("fill", PALETTE[i % PALETTE.len()]));
            writer.write_event(Event::Start(text)).map_err(svg_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&word.text)))
                .map_err(svg_error)?;
            writer
                .write_event(Event::End(BytesEnd::new("text")))
                .map_err(svg_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(svg_error)?;

        String::from_utf8(writer.into_inner().into_inner()).map_err(svg_error)
    }
}

fn svg_error(e: impl std::fmt::Display) -> GlimtError {
    GlimtError::Parse(format!("failed to write SVG: {e}"))
}
