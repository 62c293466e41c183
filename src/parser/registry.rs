use super::{Parser, TextParser};
use std::collections::BTreeMap;
use std::path::Path;

/// Picks the parser a document is registered with, keyed on its file
/// extension. Extensions compare case-insensitively; a file whose extension
/// has no entry, or that has none at all, goes to the fallback.
pub struct ParserRegistry {
    by_extension: BTreeMap<String, Box<dyn Parser>>,
    fallback: Box<dyn Parser>,
}

/// "TXT", ".txt" and "txt" all key the same entry
fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

impl ParserRegistry {
    /// No extension entries; everything is parsed as plain text
    pub fn new() -> Self {
        Self::with_fallback(TextParser::new())
    }

    pub fn with_fallback(fallback: impl Parser + 'static) -> Self {
        Self {
            by_extension: BTreeMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Route files ending in `extension` to `parser`, replacing any earlier
    /// entry. Closures work too:
    ///
    /// ```ignore
    /// parsers.register("csv", |path: &Path| parse_reviews(path));
    /// ```
    pub fn register(&mut self, extension: &str, parser: impl Parser + 'static) {
        self.by_extension.insert(normalize(extension), Box::new(parser));
    }

    pub fn select(&self, path: &Path) -> &dyn Parser {
        let entry = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.by_extension.get(&normalize(e)));

        match entry {
            Some(parser) => parser.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    /// Extension entries, not counting the fallback
    pub fn parser_count(&self) -> usize {
        self.by_extension.len()
    }

    /// Registered extensions, lowercased and sorted
    pub fn registered_extensions(&self) -> Vec<&str> {
        self.by_extension.keys().map(String::as_str).collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
