//! Declarative clinical vocabulary.
//!
//! A pattern table is a list of `(category, token sequence)` pairs. The
//! built-in table covers the whiplash consultation vocabulary; a custom table
//! can be loaded from a RON file:
//!
//! ```ron
//! [
//!     (category: Symptom, tokens: ["neck", "pain"]),
//!     (category: Treatment, tokens: ["ice pack"]),
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{NotetakerError, NotetakerResult};

/// The four entity categories a pattern can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternCategory {
    Symptom,
    Treatment,
    Diagnosis,
    Prognosis,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 4] = [
        PatternCategory::Symptom,
        PatternCategory::Treatment,
        PatternCategory::Diagnosis,
        PatternCategory::Prognosis,
    ];
}

/// One pattern: consecutive lowercase tokens that must all match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub category: PatternCategory,
    pub tokens: Vec<String>,
}

const BUILTIN_PATTERNS: &[(PatternCategory, &[&str])] = &[
    (PatternCategory::Symptom, &["neck", "pain"]),
    (PatternCategory::Symptom, &["back", "pain"]),
    (PatternCategory::Symptom, &["head", "impact"]),
    (PatternCategory::Symptom, &["head", "injury"]),
    (PatternCategory::Symptom, &["stiffness"]),
    (PatternCategory::Symptom, &["sleep"]),
    (PatternCategory::Symptom, &["anxious"]),
    (PatternCategory::Treatment, &["physiotherapy"]),
    (PatternCategory::Treatment, &["physiotherapist"]),
    (PatternCategory::Treatment, &["painkillers"]),
    (PatternCategory::Treatment, &["x-rays"]),
    (PatternCategory::Treatment, &["x-ray"]),
    (PatternCategory::Treatment, &["advice"]),
    (PatternCategory::Diagnosis, &["whiplash"]),
    (PatternCategory::Diagnosis, &["whiplash", "injury"]),
    (PatternCategory::Prognosis, &["full", "recovery"]),
    (PatternCategory::Prognosis, &["no", "long-term"]),
];

/// An ordered list of patterns, normalised to lowercase single tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTable {
    specs: Vec<PatternSpec>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternTable {
    /// The built-in clinical vocabulary.
    pub fn builtin() -> Self {
        Self::from_specs(
            BUILTIN_PATTERNS
                .iter()
                .map(|(category, tokens)| PatternSpec {
                    category: *category,
                    tokens: tokens.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
        )
    }

    /// Build a table from specs.
    ///
    /// Every token entry is split on whitespace and lowercased, so
    /// `["Neck Pain"]` and `["neck", "pain"]` are the same pattern. Specs with
    /// no tokens are dropped.
    pub fn from_specs(specs: Vec<PatternSpec>) -> Self {
        let specs = specs
            .into_iter()
            .map(|spec| PatternSpec {
                category: spec.category,
                tokens: spec
                    .tokens
                    .iter()
                    .flat_map(|t| t.split_whitespace())
                    .map(str::to_lowercase)
                    .collect(),
            })
            .filter(|spec| !spec.tokens.is_empty())
            .collect();

        Self { specs }
    }

    /// Parse a RON list of [`PatternSpec`]s. `origin` names the source in
    /// errors.
    pub fn from_ron_str(source: &str, origin: &str) -> NotetakerResult<Self> {
        let specs: Vec<PatternSpec> =
            ron::from_str(source).map_err(|e| NotetakerError::PatternTable {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::from_specs(specs))
    }

    /// Load a RON pattern table from disk.
    pub fn load(path: &Path) -> NotetakerResult<Self> {
        let source = fs::read_to_string(path).map_err(|e| NotetakerError::PatternTable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let table = Self::from_ron_str(&source, &path.display().to_string())?;
        tracing::info!(path = %path.display(), patterns = table.len(), "loaded pattern table");
        Ok(table)
    }

    pub fn specs(&self) -> &[PatternSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
