//! Notetaker configuration via TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! [keywords]
//! top_n = 10
//!
//! [report]
//! default_patient_name = "Unknown"
//!
//! [patterns]
//! table = "patterns.ron"
//!
//! [inference]
//! base_url = "https://api-inference.huggingface.co"
//! sentiment_model = "distilbert-base-uncased-finetuned-sst-2-english"
//! zero_shot_model = "facebook/bart-large-mnli"
//! timeout_secs = 30
//! multi_label = false
//! api_token = "hf_..."
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{NotetakerError, NotetakerResult};
use crate::keywords::DEFAULT_TOP_N;
use crate::report::DEFAULT_PATIENT_NAME;

/// Environment variable consulted when no API token is configured.
pub const API_TOKEN_ENV: &str = "HF_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotetakerConfig {
    pub keywords: KeywordConfig,
    pub report: ReportConfig,
    pub patterns: PatternConfig,
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Number of keywords returned by default.
    pub top_n: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Patient name used when the caller supplies none.
    pub default_patient_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_patient_name: DEFAULT_PATIENT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// RON pattern table replacing the built-in vocabulary. Relative paths
    /// are resolved against the configuration file's directory.
    pub table: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub base_url: String,
    pub sentiment_model: String,
    pub zero_shot_model: String,
    pub timeout_secs: u64,
    /// Score candidate intents independently instead of as one distribution.
    pub multi_label: bool,
    pub api_token: Option<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            sentiment_model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            zero_shot_model: "facebook/bart-large-mnli".to_string(),
            timeout_secs: 30,
            multi_label: false,
            api_token: None,
        }
    }
}

impl InferenceConfig {
    /// The configured token, else `HF_TOKEN` from the environment.
    pub fn resolved_api_token(&self) -> Option<String> {
        self.api_token
            .clone()
            .or_else(|| std::env::var(API_TOKEN_ENV).ok())
            .filter(|token| !token.trim().is_empty())
    }
}

impl NotetakerConfig {
    pub fn from_toml_str(source: &str, origin: &str) -> NotetakerResult<Self> {
        toml::from_str(source).map_err(|e| NotetakerError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> NotetakerResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| NotetakerError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config = Self::from_toml_str(&content, &path.display().to_string())?;
        if let (Some(table), Some(dir)) = (config.patterns.table.as_mut(), path.parent()) {
            if table.is_relative() {
                *table = dir.join(&*table);
            }
        }

        tracing::info!(
            path = %path.display(),
            top_n = config.keywords.top_n,
            pattern_table = ?config.patterns.table,
            "loaded configuration"
        );
        Ok(config)
    }
}
