//! Flat structured medical report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extraction::ExtractionResult;
use crate::text::{capitalize, contains_ignore_case};

static CURRENT_STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(occasional\s+backache|occasional\s+back\s+pain|now\s+only\s+have\s+occasional\s+back\s+pain)",
    )
    .unwrap()
});

static PROGNOSIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)full\s+recovery\s+(?:expected\s+)?within\s+(\w+)\s+months|no\s+signs\s+of\s+long-term\s+damage",
    )
    .unwrap()
});

const IMPROVING_PROGNOSIS: &str = "Improving; no signs of long-term damage suggested by physician";

pub const DEFAULT_PATIENT_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredReport {
    #[serde(rename = "Patient_Name")]
    pub patient_name: String,
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Option<String>,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Current_Status")]
    pub current_status: Option<String>,
    #[serde(rename = "Prognosis")]
    pub prognosis: Option<String>,
    #[serde(rename = "Accident_Date")]
    pub accident_date: Option<String>,
    #[serde(rename = "Accident_Time")]
    pub accident_time: Option<String>,
    #[serde(rename = "Physio_Sessions")]
    pub physio_sessions: Option<String>,
}

/// Composes entity extraction results and two sentence heuristics into a
/// [`StructuredReport`].
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    default_patient_name: String,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PATIENT_NAME)
    }
}

impl ReportBuilder {
    pub fn new(default_patient_name: impl Into<String>) -> Self {
        Self {
            default_patient_name: default_patient_name.into(),
        }
    }

    pub fn build(
        &self,
        text: &str,
        entities: &ExtractionResult,
        patient_name: Option<&str>,
    ) -> StructuredReport {
        let report = StructuredReport {
            patient_name: patient_name
                .unwrap_or(self.default_patient_name.as_str())
                .to_string(),
            symptoms: entities.symptoms().to_vec(),
            diagnosis: entities.primary_diagnosis().map(str::to_string),
            treatment: entities.treatment().to_vec(),
            current_status: current_status(text),
            prognosis: prognosis(text),
            accident_date: entities.accident.date.clone(),
            accident_time: entities.accident.time.clone(),
            physio_sessions: entities.accident.physio_sessions.clone(),
        };
        tracing::debug!(
            current_status = ?report.current_status,
            prognosis = ?report.prognosis,
            "built structured report"
        );
        report
    }
}

fn current_status(text: &str) -> Option<String> {
    CURRENT_STATUS_RE
        .find(text)
        .map(|m| capitalize(m.as_str()))
}

fn prognosis(text: &str) -> Option<String> {
    match PROGNOSIS_RE.captures(text) {
        Some(caps) => Some(match caps.get(1) {
            Some(months) => format!(
                "Full recovery expected within {} months",
                months.as_str().to_lowercase()
            ),
            None => capitalize(&caps[0]),
        }),
        None if contains_ignore_case(text, "improv") => Some(IMPROVING_PROGNOSIS.to_string()),
        None => None,
    }
}
