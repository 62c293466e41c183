mod registry;
mod result;
mod text;


pub use registry::ParserRegistry;
pub use result::{ParseResult, BUILTIN_STATISTICS, RAW_TEXT, SENTIMENT, WORDCOUNT};
pub use text::TextParser;

use crate::error::Result;
use std::path::Path;

/// Core trait that all parsers must implement
pub trait Parser: Send + Sync {
    /// Read the file at `path` and compute its statistics
    ///
    /// # Returns
    /// Word counts, sentiment and cleaned text, plus any custom statistics
    fn parse(&self, path: &Path) -> Result<ParseResult>;
}

impl<F> Parser for F
where
    F: Fn(&Path) -> Result<ParseResult> + Send + Sync,
{
    fn parse(&self, path: &Path) -> Result<ParseResult> {
        self(path)
    }
}
