//! Clinical information extraction for physician-patient transcripts.
//!
//! ## Per-Line Resolvers
//!
//! - [`PatternMatcher`] - Detects symptom, treatment, diagnosis and prognosis
//!   phrases from a declarative [`PatternTable`]
//! - [`NounChunkResolver`] - Marks noun phrases used as keyword candidates
//!
//! ## Transcript-Level Builders
//!
//! - [`EntityExtractor`] - Pattern matches plus [`RegexExtractor`] accident
//!   details
//! - [`KeywordRanker`] - Most frequent noun phrases and clinical phrases
//! - [`ReportBuilder`] - Flat [`StructuredReport`]
//! - [`SoapNoteBuilder`] - Subjective / Objective / Assessment / Plan note
//! - [`SentimentIntentClassifier`] - Patient sentiment and intent through
//!   external models ([`InferenceClient`] or any [`SentimentModel`] and
//!   [`ZeroShotModel`])
//!
//! [`Notetaker`] bundles all of them behind one configured context.
//!
//! ## Example
//!
//! ```
//! use notetaker_clinical::Notetaker;
//!
//! let notetaker = Notetaker::new();
//! let text = "Patient: I had neck pain and took painkillers.\nDoctor: Full range of movement.";
//!
//! let entities = notetaker.extract_entities(text);
//! assert_eq!(entities.symptoms(), ["Neck Pain"]);
//! assert_eq!(entities.treatment(), ["Painkillers", "Painkillers"]);
//!
//! let soap = notetaker.generate_soap(text);
//! assert_eq!(soap.subjective.chief_complaint.as_deref(), Some("Neck Pain"));
//! ```

mod config;
mod errors;
mod extraction;
mod inference;
mod keywords;
mod notetaker;
mod noun_chunk;
mod pattern_matcher;
mod patterns;
mod regex_extractor;
mod report;
mod sentiment;
mod soap;
mod text;

pub use config::{
    InferenceConfig, KeywordConfig, NotetakerConfig, PatternConfig, ReportConfig, API_TOKEN_ENV,
};
pub use errors::{ClassifierError, NotetakerError, NotetakerResult};
pub use extraction::{EntityExtractor, ExtractionResult};
pub use inference::InferenceClient;
pub use keywords::{KeywordRanker, DEFAULT_TOP_N};
pub use notetaker::{Notetaker, TranscriptAnalysis};
pub use noun_chunk::{NounChunk, NounChunkResolver};
pub use pattern_matcher::{CategoryMatches, ClinicalMatch, PatternMatcher};
pub use patterns::{PatternCategory, PatternSpec, PatternTable};
pub use regex_extractor::{AccidentDetails, RegexExtractor};
pub use report::{ReportBuilder, StructuredReport, DEFAULT_PATIENT_NAME};
pub use sentiment::{
    Sentiment, SentimentIntent, SentimentIntentClassifier, SentimentLabel, SentimentModel,
    SentimentScore, ZeroShotModel, CONFIDENCE_THRESHOLD, INTENT_LABELS,
};
pub use soap::{Assessment, Objective, Plan, SoapNote, SoapNoteBuilder, Subjective};

#[cfg(test)]
mod tests {
    mod consultation;
    mod notetaker;
}
