// Public API exports
pub mod config;
pub mod counter;
pub mod error;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod sentiment;
pub mod text;
pub mod viz;

// Re-export main types for convenience
pub use config::{AnalysisConfig, RenderConfig};
pub use error::{NlpError, Result};
pub use loader::load_text;

pub use counter::{count, WordCount};
pub use sentiment::{score, Sentiment, SentimentScorer, VaderScorer};
pub use text::{preprocess, Lemmatizer, Preprocessor, StopwordFilter};

pub use parser::{ParseResult, Parser, ParserRegistry, TextParser};

pub use registry::{
    Document, DocumentRegistry, DuplicateLabelPolicy, Statistic, WordcountFilter, DEFAULT_TOP_K,
};

pub use viz::{render_flow, sentiment_bars, word_clouds, wordcount_sankey};
