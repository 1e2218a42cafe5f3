use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::GlimtError;
use crate::model::{Table, TextBlob};

/// Key of one memoized extraction: operation name, content hash of the
/// input bytes and the JSON-encoded call parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: &'static str,
    pub content_hash: u64,
    pub params: String,
}

impl CacheKey {
    pub fn new(
        operation: &'static str,
        bytes: &[u8],
        params: &impl Serialize,
    ) -> Result<CacheKey, GlimtError> {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Ok(CacheKey {
            operation,
            content_hash: hasher.finish(),
            params: serde_json::to_string(params)?,
        })
    }
}

#[derive(Debug, Clone)]
enum CachedEntry {
    Sheets(Vec<String>),
    Table(Table),
    Text(TextBlob),
}

/// Session-scoped memoization of extraction results.
///
/// Safe because every extraction operation is a pure function of its
/// explicit inputs. Eviction-free: entries are bounded by user actions
/// within one upload exploration, so the map stays small for the lifetime
/// of a session.
#[derive(Debug, Default)]
pub struct ExtractionCache {
    entries: HashMap<CacheKey, CachedEntry>,
    hits: usize,
    misses: usize,
}

impl ExtractionCache {
    pub fn new() -> ExtractionCache {
        ExtractionCache::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn table(
        &mut self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<Table, GlimtError>,
    ) -> Result<Table, GlimtError> {
        if let Some(CachedEntry::Table(table)) = self.entries.get(&key) {
            let table = table.clone();
            self.hits += 1;
            return Ok(table);
        }
        self.misses += 1;
        let table = compute()?;
        self.entries.insert(key, CachedEntry::Table(table.clone()));
        Ok(table)
    }

    pub fn text(
        &mut self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<TextBlob, GlimtError>,
    ) -> Result<TextBlob, GlimtError> {
        if let Some(CachedEntry::Text(text)) = self.entries.get(&key) {
            let text = text.clone();
            self.hits += 1;
            return Ok(text);
        }
        self.misses += 1;
        let text = compute()?;
        self.entries.insert(key, CachedEntry::Text(text.clone()));
        Ok(text)
    }

    pub fn sheets(
        &mut self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<Vec<String>, GlimtError>,
    ) -> Result<Vec<String>, GlimtError> {
        if let Some(CachedEntry::Sheets(sheets)) = self.entries.get(&key) {
            let sheets = sheets.clone();
            self.hits += 1;
            return Ok(sheets);
        }
        self.misses += 1;
        let sheets = compute()?;
        self.entries.insert(key, CachedEntry::Sheets(sheets.clone()));
        Ok(sheets)
    }
}
