use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Reduces an inflected token to its base form
pub trait Lemmatizer: Send + Sync {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// Plural suffix rewrites, tried in order; first match wins
const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

/// Endings that look plural but belong to the singular
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("men", "man"),
        ("children", "child"),
        ("people", "person"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("oxen", "ox"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("loaves", "loaf"),
        ("movies", "movie"),
        ("cookies", "cookie"),
        ("aches", "ache"),
        ("headaches", "headache"),
        ("buses", "bus"),
        ("gases", "gas"),
        ("lenses", "lens"),
        ("goes", "go"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("data", "datum"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("heroes", "hero"),
        ("potatoes", "potato"),
        ("tomatoes", "tomato"),
        ("echoes", "echo"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in a plural suffix that are already base forms
static UNINFLECTED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "news", "series", "species", "physics", "mathematics", "economics", "politics",
        "ethics", "always", "perhaps", "sometimes", "besides", "towards", "afterwards",
        "backwards", "whereas", "yes", "lens", "gas", "bus", "omen", "abdomen",
        "specimen", "semen", "amen",
    ]
    .into_iter()
    .collect()
});

/// Folds English noun plurals to their singular and leaves every other word
/// alone: "studies" -> "study", "flies" -> "fly", "happy" and "running" stay.
///
/// Regular plurals go through suffix rewrites; irregular forms come from a
/// fixed table. Output stays a real word, so sentiment lexicons still match it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounLemmatizer;

impl NounLemmatizer {
    pub fn new() -> Self {
        Self
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if let Some(&base) = IRREGULAR_PLURALS.get(word) {
            return Cow::Borrowed(base);
        }
        if word.len() <= 3
            || UNINFLECTED.contains(word)
            || SINGULAR_ENDINGS.iter().any(|end| word.ends_with(end))
        {
            return Cow::Borrowed(word);
        }

        for (suffix, replacement) in NOUN_SUFFIXES {
            if let Some(stem) = word.strip_suffix(suffix) {
                // "ies" needs a real stem: "ties" is handled as a plain "s"
                if *suffix == "ies" && stem.len() < 2 {
                    continue;
                }
                return Cow::Owned(format!("{}{}", stem, replacement));
            }
        }
        Cow::Borrowed(word)
    }
}

/// Snowball English stemming backed by `rust-stemmers`.
///
/// More aggressive than [`NounLemmatizer`]: verbs and adjectives are cut as
/// well and the output is often not a word ("happy" -> "happi").
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
}

impl SnowballLemmatizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.stemmer.stem(word)
    }
}

/// Leaves tokens untouched
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}
