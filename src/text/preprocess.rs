use super::{Lemmatizer, NounLemmatizer, StopwordFilter};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHA: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-zA-Z]").expect("static pattern is valid"));

/// Turns raw text into a space-separated bag of base-form words
pub struct Preprocessor {
    stopwords: StopwordFilter,
    lemmatizer: Box<dyn Lemmatizer>,
}

impl Preprocessor {
    /// English stop-words with noun-plural folding
    pub fn new() -> Self {
        Self {
            stopwords: StopwordFilter::english(),
            lemmatizer: Box::new(NounLemmatizer::new()),
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Box::new(lemmatizer);
        self
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    pub fn stopwords_mut(&mut self) -> &mut StopwordFilter {
        &mut self.stopwords
    }

    /// Clean `text`.
    ///
    /// Every non-ASCII-letter becomes whitespace, the rest is lowercased and
    /// split. Stop-words are dropped before reduction; surviving tokens keep
    /// their original order and are joined by single spaces.
    pub fn preprocess(&self, text: &str) -> String {
        let letters = NON_ALPHA.replace_all(text, " ").to_ascii_lowercase();

        letters
            .split_whitespace()
            .filter(|token| !self.stopwords.is_stopword(token))
            .map(|token| self.lemmatizer.lemmatize(token).into_owned())
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean `text` with the default English preprocessor
pub fn preprocess(text: &str) -> String {
    Preprocessor::new().preprocess(text)
}
