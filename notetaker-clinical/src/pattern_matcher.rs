//! Clinical phrase detection.
//!
//! [`PatternMatcher`] compiles a [`PatternTable`] into a dictionary keyed by
//! the first token of every pattern, then walks each line once:
//!
//! ```text
//! Patient  :     neck     pain     and     x-rays
//!                ╰───────────╯ClinicalMatch { category: Symptom, surface: "neck pain" }
//!                                          ╰────╯ClinicalMatch { category: Treatment, surface: "x-rays" }
//! ```
//!
//! Matching is case-insensitive and overlapping matches are all kept.

use std::collections::HashMap;

use notetaker_nlp::{x, LLCursorAssignment, LLSelection, Resolver};
use notetaker_transcript::TranscriptDocument;
use serde::Serialize;

use crate::patterns::{PatternCategory, PatternTable};
use crate::text::title_case;

/// A span of the line that matched a clinical pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalMatch {
    pub category: PatternCategory,
    /// Words of the span joined by single spaces, original casing
    pub surface: String,
}

/// Title-cased, de-duplicated matches per category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryMatches {
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<String>,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Vec<String>,
    #[serde(rename = "Prognosis")]
    pub prognosis: Vec<String>,
}

impl CategoryMatches {
    pub fn get(&self, category: PatternCategory) -> &[String] {
        match category {
            PatternCategory::Symptom => &self.symptoms,
            PatternCategory::Treatment => &self.treatment,
            PatternCategory::Diagnosis => &self.diagnosis,
            PatternCategory::Prognosis => &self.prognosis,
        }
    }

    fn get_mut(&mut self, category: PatternCategory) -> &mut Vec<String> {
        match category {
            PatternCategory::Symptom => &mut self.symptoms,
            PatternCategory::Treatment => &mut self.treatment,
            PatternCategory::Diagnosis => &mut self.diagnosis,
            PatternCategory::Prognosis => &mut self.prognosis,
        }
    }

    fn push_unique(&mut self, category: PatternCategory, phrase: String) {
        let entries = self.get_mut(category);
        if !entries.contains(&phrase) {
            entries.push(phrase);
        }
    }

    pub fn is_empty(&self) -> bool {
        PatternCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

/// Resolver assigning [`ClinicalMatch`] to every pattern occurrence.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    /// first token → list of (remaining tokens, category)
    dictionary: HashMap<String, Vec<(Vec<String>, PatternCategory)>>,
}

/// Lowercase with Unicode hyphens folded to `-`.
fn match_key(token: &str) -> String {
    token.to_lowercase().replace(['\u{2010}', '\u{2011}'], "-")
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher {
    /// A matcher over the built-in clinical vocabulary.
    pub fn new() -> Self {
        Self::from_table(&PatternTable::builtin())
    }

    pub fn from_table(table: &PatternTable) -> Self {
        let mut dictionary: HashMap<String, Vec<(Vec<String>, PatternCategory)>> = HashMap::new();
        for spec in table.specs() {
            if let Some((first, remaining)) = spec.tokens.split_first() {
                dictionary
                    .entry(first.clone())
                    .or_default()
                    .push((remaining.to_vec(), spec.category));
            }
        }
        Self { dictionary }
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.dictionary.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    fn try_match_phrase<'l>(
        &self,
        start: &LLSelection<'l>,
        remaining: &[String],
    ) -> Option<LLSelection<'l>> {
        let mut current = *start;
        for expected in remaining {
            let (ws_sel, _) = current.match_first_forwards(&x::whitespace())?;
            let (word_sel, text) = ws_sel.match_first_forwards(&x::token_text())?;
            if match_key(text) != *expected {
                return None;
            }
            current = word_sel;
        }
        Some(current)
    }

    /// Every match in the document, in document order.
    pub fn find_all(&self, text: &str) -> Vec<ClinicalMatch> {
        TranscriptDocument::from_text(text)
            .run_resolver(self)
            .attrs_by::<ClinicalMatch>()
            .into_iter()
            .map(|(_, found)| found.clone())
            .collect()
    }

    /// Group the matches of `text` by category, title-cased and de-duplicated.
    pub fn categorize(&self, text: &str) -> CategoryMatches {
        let mut grouped = CategoryMatches::default();
        for found in self.find_all(text) {
            grouped.push_unique(found.category, title_case(&found.surface));
        }
        tracing::debug!(
            symptoms = grouped.symptoms.len(),
            treatment = grouped.treatment.len(),
            diagnosis = grouped.diagnosis.len(),
            prognosis = grouped.prognosis.len(),
            "categorized clinical phrases"
        );
        grouped
    }
}

impl Resolver for PatternMatcher {
    type Attr = ClinicalMatch;

    fn go(&self, selection: LLSelection) -> Vec<LLCursorAssignment<Self::Attr>> {
        let mut results = Vec::new();

        for (sel, text) in selection.find_by(&x::token_text()) {
            let Some(candidates) = self.dictionary.get(&match_key(text)) else {
                continue;
            };
            for (remaining, category) in candidates {
                if let Some(extended) = self.try_match_phrase(&sel, remaining) {
                    let surface = extended.normalized_text();
                    results.push(extended.finish_with_attr(ClinicalMatch {
                        category: *category,
                        surface,
                    }));
                }
            }
        }

        results
    }
}
