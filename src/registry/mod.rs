mod document;
mod filter;

#[cfg(test)]
mod tests;

pub use document::{Document, Statistic};
pub use filter::{WordcountFilter, DEFAULT_TOP_K};

use crate::counter::WordCount;
use crate::error::{NlpError, Result};
use crate::parser::{ParseResult, Parser, ParserRegistry, BUILTIN_STATISTICS};
use crate::sentiment::Sentiment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to do when a label is registered a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateLabelPolicy {
    /// Replace every statistic of the earlier registration
    #[default]
    Overwrite,
    /// Fail with `NlpError::DuplicateLabel`
    Reject,
}

/// Per-document statistics keyed by label, in registration order
pub struct DocumentRegistry {
    documents: Vec<Document>,
    /// Label -> position in `documents`
    index: HashMap<String, usize>,
    parsers: ParserRegistry,
    duplicates: DuplicateLabelPolicy,
}

impl DocumentRegistry {
    /// Empty registry that parses every file with `TextParser`
    pub fn new() -> Self {
        Self::with_parsers(ParserRegistry::new())
    }

    /// Empty registry dispatching by extension through `parsers`
    pub fn with_parsers(parsers: ParserRegistry) -> Self {
        Self {
            documents: Vec::new(),
            index: HashMap::new(),
            parsers,
            duplicates: DuplicateLabelPolicy::default(),
        }
    }

    pub fn duplicate_policy(mut self, policy: DuplicateLabelPolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn parsers_mut(&mut self) -> &mut ParserRegistry {
        &mut self.parsers
    }

    /// Parse `filename` and store its statistics under `label`.
    ///
    /// `label` defaults to the path as given. Without an explicit `parser`
    /// the one registered for the file's extension is used. On error the
    /// registry is left exactly as it was.
    pub fn register(
        &mut self,
        filename: impl AsRef<Path>,
        label: Option<&str>,
        parser: Option<&dyn Parser>,
    ) -> Result<()> {
        let path = filename.as_ref();
        if path.as_os_str().is_empty() {
            return Err(NlpError::Validation("filename must not be empty".to_string()));
        }

        let label = match label {
            Some(label) if label.trim().is_empty() => {
                return Err(NlpError::Validation("label must not be empty".to_string()));
            }
            Some(label) => label.to_string(),
            None => path.display().to_string(),
        };

        if self.duplicates == DuplicateLabelPolicy::Reject && self.index.contains_key(&label) {
            return Err(NlpError::DuplicateLabel(label));
        }

        let parser = parser.unwrap_or_else(|| self.parsers.select(path));
        let stats = parser.parse(path)?;
        validate_result(&stats)?;

        tracing::debug!(
            label = %label,
            words = stats.wordcount.len(),
            custom = stats.custom.len(),
            "registered document"
        );

        self.insert(Document {
            label,
            source: path.to_path_buf(),
            stats,
        });
        Ok(())
    }

    /// Register every file under `dir` whose extension matches, labelled by path.
    ///
    /// Symlinks are followed. Files are visited in path order. Returns the
    /// labels registered. Any entry the walk cannot read fails the call
    /// before a single file is parsed.
    pub fn register_dir(&mut self, dir: impl AsRef<Path>, extension: &str) -> Result<Vec<String>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(NlpError::NotFound(dir.display().to_string()));
        }

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(walk_error)?;
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
            if matches && entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();

        let mut labels = Vec::with_capacity(files.len());
        for file in files {
            self.register(&file, None, None)?;
            labels.push(file.display().to_string());
        }

        tracing::debug!(dir = %dir.display(), count = labels.len(), "registered directory");
        Ok(labels)
    }

    /// Replace every document's word counts with a filtered copy.
    ///
    /// Filtering is not reversible; take a [`snapshot`](Self::snapshot)
    /// first to keep the full counts.
    pub fn filter_wordcount(&mut self, filter: &WordcountFilter) -> Result<()> {
        filter.validate()?;

        for doc in &mut self.documents {
            doc.stats.wordcount = filter.apply(&doc.stats.wordcount);
        }

        tracing::debug!(
            documents = self.documents.len(),
            top_k = filter.top_k,
            word_list = filter.word_list.as_ref().map(|w| w.len()),
            "filtered word counts"
        );
        Ok(())
    }

    /// Copy of every document's statistics
    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.clone()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.label.as_str())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, label: &str) -> Option<&Document> {
        self.index.get(label).map(|&pos| &self.documents[pos])
    }

    pub fn wordcount(&self, label: &str) -> Option<&WordCount> {
        self.document(label).map(|d| &d.stats.wordcount)
    }

    pub fn sentiment(&self, label: &str) -> Option<&Sentiment> {
        self.document(label).map(|d| &d.stats.sentiment)
    }

    pub fn raw_text(&self, label: &str) -> Option<&str> {
        self.document(label).map(|d| d.stats.raw_text.as_str())
    }

    pub fn wordcounts(&self) -> impl Iterator<Item = (&str, &WordCount)> {
        self.documents
            .iter()
            .map(|d| (d.label.as_str(), &d.stats.wordcount))
    }

    pub fn sentiments(&self) -> impl Iterator<Item = (&str, &Sentiment)> {
        self.documents
            .iter()
            .map(|d| (d.label.as_str(), &d.stats.sentiment))
    }

    pub fn raw_texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents
            .iter()
            .map(|d| (d.label.as_str(), d.stats.raw_text.as_str()))
    }

    /// Values of a custom statistic, for the documents that have it
    pub fn custom<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.documents
            .iter()
            .filter_map(move |d| d.stats.custom.get(name).map(|v| (d.label.as_str(), v)))
    }

    /// Label -> value view of any statistic, built-in or custom
    pub fn statistic(&self, name: &str) -> Vec<(&str, Statistic<'_>)> {
        self.documents
            .iter()
            .filter_map(|d| d.statistic(name).map(|s| (d.label.as_str(), s)))
            .collect()
    }

    /// Every statistic name present in the registry, built-ins first
    pub fn statistic_names(&self) -> Vec<String> {
        if self.documents.is_empty() {
            return Vec::new();
        }

        let mut names: Vec<String> = BUILTIN_STATISTICS.iter().map(|s| s.to_string()).collect();
        for doc in &self.documents {
            for key in doc.stats.custom.keys() {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }
        names
    }

    fn insert(&mut self, document: Document) {
        match self.index.get(&document.label) {
            Some(&pos) => {
                tracing::warn!(label = %document.label, "label already registered, replacing statistics");
                self.documents[pos] = document;
            }
            None => {
                self.index
                    .insert(document.label.clone(), self.documents.len());
                self.documents.push(document);
            }
        }
    }
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom statistics may not shadow the built-in names
fn validate_result(result: &ParseResult) -> Result<()> {
    for key in result.custom.keys() {
        if BUILTIN_STATISTICS.contains(&key.as_str()) {
            return Err(NlpError::Validation(format!(
                "custom statistic '{}' collides with a built-in statistic",
                key
            )));
        }
        if key.is_empty() {
            return Err(NlpError::Validation(
                "custom statistic name must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Directory walk failures keep the io error kind of the entry that failed
fn walk_error(err: walkdir::Error) -> NlpError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    if let Some(ancestor) = err.loop_ancestor() {
        return NlpError::Validation(format!(
            "symlink loop: {} points back to {}",
            path.display(),
            ancestor.display()
        ));
    }
    match err.into_io_error() {
        Some(io) => crate::loader::io_error(&path, io),
        None => NlpError::Validation(format!("cannot walk {}", path.display())),
    }
}
