use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Word frequencies in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCount {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl WordCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `word`. New words go to the end.
    pub fn add(&mut self, word: &str, n: usize) {
        match self.index.get(word) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), n));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&pos| self.entries[pos].1)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, n)| (w.as_str(), *n))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    /// The `k` most frequent words, highest first.
    ///
    /// The sort is stable, so equal counts keep first-occurrence order.
    pub fn top_k(&self, k: usize) -> WordCount {
        let mut sorted: Vec<&(String, usize)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
            .into_iter()
            .take(k)
            .map(|(w, n)| (w.clone(), *n))
            .collect()
    }

    /// Entries whose word satisfies `keep`, in their current order
    pub fn retain_words(&self, mut keep: impl FnMut(&str) -> bool) -> WordCount {
        self.entries
            .iter()
            .filter(|(w, _)| keep(w.as_str()))
            .cloned()
            .collect()
    }
}

impl FromIterator<(String, usize)> for WordCount {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut counts = WordCount::new();
        for (word, n) in iter {
            counts.add(&word, n);
        }
        counts
    }
}

impl Serialize for WordCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, n) in &self.entries {
            map.serialize_entry(word, n)?;
        }
        map.end()
    }
}

/// Tally whitespace-separated tokens of already-cleaned text
pub fn count(text: &str) -> WordCount {
    let mut counts = WordCount::new();
    for token in text.split_whitespace() {
        counts.add(token, 1);
    }
    counts
}
