use crate::error::{NlpError, Result};
use crate::parser::{ParserRegistry, TextParser};
use crate::registry::{DocumentRegistry, DuplicateLabelPolicy, WordcountFilter};
use crate::text::{Preprocessor, StopwordFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart dimensions and layout limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of the flow diagram and bar chart
    pub width: u32,
    /// Height of the flow diagram and bar chart
    pub height: u32,
    /// Width of one word-cloud panel
    pub cloud_panel_width: u32,
    pub cloud_height: u32,
    /// Most words drawn in one word-cloud panel
    pub max_words: usize,
    pub min_font: f64,
    pub max_font: f64,
    /// Flow links carrying fewer occurrences are not drawn
    pub min_flow: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            cloud_panel_width: 500,
            cloud_height: 500,
            max_words: 200,
            min_font: 10.0,
            max_font: 64.0,
            min_flow: 0,
        }
    }
}

/// Settings for a whole analysis run, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub filter: WordcountFilter,
    pub duplicate_labels: DuplicateLabelPolicy,
    /// Added to the English stop-word list
    pub extra_stopwords: Vec<String>,
    pub render: RenderConfig,
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| NlpError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = crate::loader::load_text(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.filter
            .validate()
            .map_err(|e| NlpError::Config(e.to_string()))?;

        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            return Err(NlpError::Config("chart size must be non-zero".to_string()));
        }
        if render.cloud_panel_width == 0 || render.cloud_height == 0 {
            return Err(NlpError::Config("word-cloud size must be non-zero".to_string()));
        }
        if render.min_font <= 0.0 || render.max_font < render.min_font {
            return Err(NlpError::Config(format!(
                "font range {}..{} is invalid",
                render.min_font, render.max_font
            )));
        }
        Ok(())
    }

    pub fn top_k(mut self, k: usize) -> Self {
        self.filter.top_k = k;
        self
    }

    pub fn word_list<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.word_list = Some(words.into_iter().map(Into::into).collect());
        self
    }

    pub fn duplicate_labels(mut self, policy: DuplicateLabelPolicy) -> Self {
        self.duplicate_labels = policy;
        self
    }

    /// Default parser with this config's stop-words
    pub fn text_parser(&self) -> TextParser {
        let mut stopwords = StopwordFilter::english();
        stopwords.add_stopwords(self.extra_stopwords.as_slice());
        TextParser::new().with_preprocessor(Preprocessor::new().with_stopwords(stopwords))
    }

    /// Empty registry set up from this config
    pub fn registry(&self) -> DocumentRegistry {
        DocumentRegistry::with_parsers(ParserRegistry::with_fallback(self.text_parser()))
            .duplicate_policy(self.duplicate_labels)
    }
}
