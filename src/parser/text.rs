use super::{ParseResult, Parser};
use crate::counter::count;
use crate::error::Result;
use crate::loader::load_text;
use crate::sentiment::{SentimentScorer, VaderScorer};
use crate::text::Preprocessor;
use std::path::Path;

/// Default parser for plain-text files
pub struct TextParser {
    preprocessor: Preprocessor,
    scorer: Box<dyn SentimentScorer>,
}

impl TextParser {
    pub fn new() -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            scorer: Box::new(VaderScorer),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_scorer(mut self, scorer: impl SentimentScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Compute statistics for text already in memory
    pub fn parse_str(&self, content: &str) -> ParseResult {
        let cleaned = self.preprocessor.preprocess(content);
        let wordcount = count(&cleaned);
        let sentiment = self.scorer.score(&cleaned);

        ParseResult::new(wordcount, sentiment, cleaned)
    }
}

impl Default for TextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for TextParser {
    fn parse(&self, path: &Path) -> Result<ParseResult> {
        let content = load_text(path)?;
        Ok(self.parse_str(&content))
    }
}
