//! Entity extraction: pattern matches plus regex-detected accident details.

use serde::Serialize;

use crate::pattern_matcher::{CategoryMatches, PatternMatcher};
use crate::regex_extractor::{AccidentDetails, RegexExtractor};

/// Everything [`EntityExtractor`] finds in a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub matches: CategoryMatches,
    #[serde(flatten)]
    pub accident: AccidentDetails,
}

impl ExtractionResult {
    pub fn symptoms(&self) -> &[String] {
        &self.matches.symptoms
    }

    pub fn treatment(&self) -> &[String] {
        &self.matches.treatment
    }

    pub fn diagnosis(&self) -> &[String] {
        &self.matches.diagnosis
    }

    pub fn prognosis(&self) -> &[String] {
        &self.matches.prognosis
    }

    /// First diagnosis match, if any.
    pub fn primary_diagnosis(&self) -> Option<&str> {
        self.matches.diagnosis.first().map(String::as_str)
    }
}

/// Runs [`PatternMatcher`] and [`RegexExtractor`] over the same text.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor {
    matcher: PatternMatcher,
    regexes: RegexExtractor,
}

impl EntityExtractor {
    pub fn new(matcher: PatternMatcher) -> Self {
        Self {
            matcher,
            regexes: RegexExtractor::new(),
        }
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut matches = self.matcher.categorize(text);
        let accident = self.regexes.extract(text);

        // appended even when the pattern already produced "Painkillers"
        if accident.mentions_painkillers {
            matches.treatment.push("Painkillers".to_string());
        }

        ExtractionResult { matches, accident }
    }
}
