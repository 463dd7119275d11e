use crate::config::NotetakerConfig;
use crate::errors::{NotetakerError, NotetakerResult};
use crate::extraction::{EntityExtractor, ExtractionResult};
use crate::inference::InferenceClient;
use crate::keywords::KeywordRanker;
use crate::pattern_matcher::PatternMatcher;
use crate::patterns::PatternTable;
use crate::report::{ReportBuilder, StructuredReport};
use crate::sentiment::{SentimentIntent, SentimentIntentClassifier};
use crate::soap::{SoapNote, SoapNoteBuilder};

/// Every output for one transcript.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TranscriptAnalysis {
    pub report: StructuredReport,
    pub entities: ExtractionResult,
    pub keywords: Vec<String>,
    pub soap: SoapNote,
}

/// Owns the compiled vocabulary and the optional classifier backends.
///
/// Build once, then call the extraction methods with any number of
/// transcripts. Nothing is cached between calls.
#[derive(Debug)]
pub struct Notetaker {
    config: NotetakerConfig,
    extractor: EntityExtractor,
    report_builder: ReportBuilder,
    soap_builder: SoapNoteBuilder,
    classifier: Option<SentimentIntentClassifier>,
}

impl Default for Notetaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Notetaker {
    /// Built-in vocabulary, default settings, no classifier.
    pub fn new() -> Self {
        Self::with_matcher(NotetakerConfig::default(), PatternMatcher::new())
    }

    /// Build from configuration, loading the custom pattern table if one is
    /// configured. The classifier is not attached; see
    /// [`Notetaker::with_inference_client`].
    pub fn from_config(config: NotetakerConfig) -> NotetakerResult<Self> {
        let table = match &config.patterns.table {
            Some(path) => PatternTable::load(path)?,
            None => PatternTable::builtin(),
        };
        let matcher = PatternMatcher::from_table(&table);
        Ok(Self::with_matcher(config, matcher))
    }

    fn with_matcher(config: NotetakerConfig, matcher: PatternMatcher) -> Self {
        tracing::debug!(patterns = matcher.len(), "compiled pattern matcher");
        Self {
            report_builder: ReportBuilder::new(config.report.default_patient_name.clone()),
            extractor: EntityExtractor::new(matcher),
            soap_builder: SoapNoteBuilder::new(),
            classifier: None,
            config,
        }
    }

    pub fn with_classifier(mut self, classifier: SentimentIntentClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Attach the hosted inference backend described by the `[inference]`
    /// configuration section.
    pub fn with_inference_client(self) -> NotetakerResult<Self> {
        let client = InferenceClient::from_config(&self.config.inference)?;
        tracing::info!(
            base_url = %self.config.inference.base_url,
            sentiment_model = %self.config.inference.sentiment_model,
            zero_shot_model = %self.config.inference.zero_shot_model,
            "using hosted inference"
        );
        Ok(self.with_classifier(SentimentIntentClassifier::new(client.clone(), client)))
    }

    pub fn config(&self) -> &NotetakerConfig {
        &self.config
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn extract_entities(&self, text: &str) -> ExtractionResult {
        self.extractor.extract(text)
    }

    /// Keywords using the configured `top_n`.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.extract_keywords_top(text, self.config.keywords.top_n)
    }

    pub fn extract_keywords_top(&self, text: &str, top_n: usize) -> Vec<String> {
        KeywordRanker::new(self.extractor.matcher()).rank(text, top_n)
    }

    pub fn build_structured_report(
        &self,
        text: &str,
        patient_name: Option<&str>,
    ) -> StructuredReport {
        let entities = self.extract_entities(text);
        self.report_builder.build(text, &entities, patient_name)
    }

    pub fn sentiment_and_intent(&self, text: &str) -> NotetakerResult<SentimentIntent> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(NotetakerError::MissingClassifier)?;
        Ok(classifier.classify(text)?)
    }

    pub fn generate_soap(&self, text: &str) -> SoapNote {
        let entities = self.extract_entities(text);
        self.soap_builder.build(text, &entities)
    }

    /// Run every rule-based component once over `text`.
    pub fn analyze(&self, text: &str, patient_name: Option<&str>) -> TranscriptAnalysis {
        let entities = self.extract_entities(text);
        let analysis = TranscriptAnalysis {
            report: self.report_builder.build(text, &entities, patient_name),
            keywords: self.extract_keywords(text),
            soap: self.soap_builder.build(text, &entities),
            entities,
        };
        tracing::debug!(
            symptoms = analysis.entities.symptoms().len(),
            keywords = analysis.keywords.len(),
            "analyzed transcript"
        );
        analysis
    }
}
