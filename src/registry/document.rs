use crate::counter::WordCount;
use crate::parser::{ParseResult, RAW_TEXT, SENTIMENT, WORDCOUNT};
use crate::sentiment::Sentiment;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// A registered document and the statistics computed for it
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique label, the file path unless the caller picked one
    pub label: String,
    /// File the statistics were computed from
    pub source: PathBuf,
    pub stats: ParseResult,
}

impl Document {
    /// Look up one statistic by name
    pub fn statistic(&self, name: &str) -> Option<Statistic<'_>> {
        match name {
            WORDCOUNT => Some(Statistic::WordCount(&self.stats.wordcount)),
            SENTIMENT => Some(Statistic::Sentiment(&self.stats.sentiment)),
            RAW_TEXT => Some(Statistic::Text(&self.stats.raw_text)),
            other => self.stats.custom.get(other).map(Statistic::Custom),
        }
    }
}

/// Borrowed view of a single statistic value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statistic<'a> {
    WordCount(&'a WordCount),
    Sentiment(&'a Sentiment),
    Text(&'a str),
    Custom(&'a Value),
}
