use serde::{Deserialize, Serialize};

/// Polarity scores for one document
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentiment {
    /// Share of positive lexicon weight, in [0, 1]
    pub pos: f64,
    /// Share of negative lexicon weight, in [0, 1]
    pub neg: f64,
    /// Share of neutral lexicon weight, in [0, 1]
    pub neu: f64,
    /// Normalized overall polarity, in [-1, 1]
    pub compound: f64,
}

impl Sentiment {
    /// Look up a score by its conventional name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "pos" => Some(self.pos),
            "neg" => Some(self.neg),
            "neu" => Some(self.neu),
            "compound" => Some(self.compound),
            _ => None,
        }
    }
}

/// Produces polarity scores for cleaned text
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Sentiment;
}

/// Lexicon scorer backed by `vader_sentiment`
pub struct VaderScorer;

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> Sentiment {
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let pick = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        Sentiment {
            pos: pick("pos"),
            neg: pick("neg"),
            neu: pick("neu"),
            compound: pick("compound"),
        }
    }
}

/// Score `text` with the default lexicon scorer
pub fn score(text: &str) -> Sentiment {
    VaderScorer.score(text)
}
