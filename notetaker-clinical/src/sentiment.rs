//! Patient sentiment and intent.
//!
//! Both judgements come from external models behind [`SentimentModel`] and
//! [`ZeroShotModel`]. This module only maps their raw outputs onto the fixed
//! three-bucket sentiment taxonomy and picks the top intent label.

use serde::Serialize;

use crate::errors::ClassifierError;

/// Scores must be strictly above this to count as Anxious or Reassured.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Candidate labels offered to the zero-shot model, in this order.
pub const INTENT_LABELS: [&str; 5] = [
    "Seeking reassurance",
    "Reporting symptoms",
    "Expressing concern",
    "Providing history",
    "Scheduling follow-up",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Anxious,
    Neutral,
    Reassured,
}

/// Raw binary label from a sentiment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Parse a model label (`POSITIVE`/`NEGATIVE`, any case).
    pub fn parse(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("positive") {
            Some(SentimentLabel::Positive)
        } else if label.eq_ignore_ascii_case("negative") {
            Some(SentimentLabel::Negative)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub score: f64,
}

impl SentimentScore {
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self { label, score }
    }

    pub fn to_sentiment(self) -> Sentiment {
        if !(self.score > CONFIDENCE_THRESHOLD) {
            return Sentiment::Neutral;
        }
        match self.label {
            SentimentLabel::Negative => Sentiment::Anxious,
            SentimentLabel::Positive => Sentiment::Reassured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentIntent {
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Intent")]
    pub intent: String,
}

/// Binary sentiment classification.
pub trait SentimentModel: Send + Sync {
    fn classify(&self, text: &str) -> Result<SentimentScore, ClassifierError>;
}

/// Zero-shot classification: rank `candidate_labels` for `text`, best first.
pub trait ZeroShotModel: Send + Sync {
    fn rank(&self, text: &str, candidate_labels: &[&str]) -> Result<Vec<String>, ClassifierError>;
}

pub struct SentimentIntentClassifier {
    sentiment: Box<dyn SentimentModel>,
    zero_shot: Box<dyn ZeroShotModel>,
}

impl std::fmt::Debug for SentimentIntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentIntentClassifier").finish_non_exhaustive()
    }
}

impl SentimentIntentClassifier {
    pub fn new(
        sentiment: impl SentimentModel + 'static,
        zero_shot: impl ZeroShotModel + 'static,
    ) -> Self {
        Self {
            sentiment: Box::new(sentiment),
            zero_shot: Box::new(zero_shot),
        }
    }

    /// Classify a snippet. Any model failure is returned as is, without retry.
    pub fn classify(&self, text: &str) -> Result<SentimentIntent, ClassifierError> {
        let score = self.sentiment.classify(text).map_err(|e| {
            tracing::warn!(error = %e, "sentiment classification failed");
            e
        })?;

        let ranked = self.zero_shot.rank(text, &INTENT_LABELS).map_err(|e| {
            tracing::warn!(error = %e, "intent classification failed");
            e
        })?;
        let intent = ranked.into_iter().next().ok_or_else(|| {
            tracing::warn!("intent classification returned no labels");
            ClassifierError::EmptyRanking
        })?;

        let result = SentimentIntent {
            sentiment: score.to_sentiment(),
            intent,
        };
        tracing::debug!(sentiment = ?result.sentiment, intent = %result.intent, "classified utterance");
        Ok(result)
    }
}
