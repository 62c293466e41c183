use crate::counter::WordCount;
use crate::sentiment::Sentiment;
use serde_json::Value;
use std::collections::BTreeMap;

/// Statistic name for word frequencies
pub const WORDCOUNT: &str = "wordcount";
/// Statistic name for polarity scores
pub const SENTIMENT: &str = "sentiment";
/// Statistic name for the cleaned text
pub const RAW_TEXT: &str = "raw_text";

/// Names every parser result carries
pub const BUILTIN_STATISTICS: [&str; 3] = [WORDCOUNT, SENTIMENT, RAW_TEXT];

/// Statistics extracted from one file
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Word frequencies of the cleaned text
    pub wordcount: WordCount,
    /// Polarity scores of the cleaned text
    pub sentiment: Sentiment,
    /// Cleaned text the other statistics were computed from
    pub raw_text: String,
    /// Additional named statistics from domain-specific parsers
    pub custom: BTreeMap<String, Value>,
}

impl ParseResult {
    pub fn new(wordcount: WordCount, sentiment: Sentiment, raw_text: impl Into<String>) -> Self {
        Self {
            wordcount,
            sentiment,
            raw_text: raw_text.into(),
            custom: BTreeMap::new(),
        }
    }

    /// Attach a custom statistic
    pub fn with_custom(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// All statistic names in this result, built-ins first
    pub fn statistic_names(&self) -> Vec<&str> {
        BUILTIN_STATISTICS
            .iter()
            .copied()
            .chain(self.custom.keys().map(|k| k.as_str()))
            .collect()
    }
}
