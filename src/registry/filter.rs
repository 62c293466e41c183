use crate::counter::WordCount;
use crate::error::{NlpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default number of words kept per document
pub const DEFAULT_TOP_K: usize = 5;

/// Selects which word counts survive a filter pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordcountFilter {
    /// Keep only these words. Takes precedence over `top_k`.
    pub word_list: Option<BTreeSet<String>>,
    /// Keep the `top_k` most frequent words
    pub top_k: usize,
}

impl Default for WordcountFilter {
    fn default() -> Self {
        Self {
            word_list: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl WordcountFilter {
    pub fn top_k(k: usize) -> Self {
        Self {
            word_list: None,
            top_k: k,
        }
    }

    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            word_list: Some(words.into_iter().map(Into::into).collect()),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_list.is_none() && self.top_k == 0 {
            return Err(NlpError::Validation(
                "top_k must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Filtered copy of `counts`
    pub fn apply(&self, counts: &WordCount) -> WordCount {
        match &self.word_list {
            Some(words) => counts.retain_words(|w| words.contains(w)),
            None => counts.top_k(self.top_k),
        }
    }
}
