//! Fixed-pattern extraction of accident details.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::text::contains_ignore_case;

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(September\s+1st|September\s+1|Sept\.?\s*1|\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b)")
        .unwrap()
});

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\b\d{1,2}:\d{2}\b|around\s+\d{1,2}:?\d{0,2})").unwrap());

const SESSION_COUNT: &str = r"(?:\d+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)";

/// `<count> sessions` followed by a physiotherapy mention in the same sentence.
static PHYSIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b{SESSION_COUNT}\s+sessions\b[^.!?\n]*?\b(?:physiotherapy|physio)"
    ))
    .unwrap()
});

static SESSIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b{SESSION_COUNT}\s+sessions\b")).unwrap());

/// Scalar facts found by [`RegexExtractor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccidentDetails {
    #[serde(rename = "Accident_Date")]
    pub date: Option<String>,
    #[serde(rename = "Accident_Time")]
    pub time: Option<String>,
    #[serde(rename = "Physio_Sessions")]
    pub physio_sessions: Option<String>,
    #[serde(skip)]
    pub mentions_painkillers: bool,
}

/// Scans raw text for the accident date and time, the physiotherapy session
/// count and painkiller mentions. Each rule is independent; a rule that does
/// not match leaves its field empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    pub fn new() -> Self {
        RegexExtractor
    }

    pub fn extract(&self, text: &str) -> AccidentDetails {
        let details = AccidentDetails {
            date: self.accident_date(text),
            time: self.accident_time(text),
            physio_sessions: self.physio_sessions(text),
            mentions_painkillers: self.mentions_painkillers(text),
        };
        tracing::debug!(
            date = ?details.date,
            time = ?details.time,
            physio_sessions = ?details.physio_sessions,
            painkillers = details.mentions_painkillers,
            "extracted accident details"
        );
        details
    }

    pub fn accident_date(&self, text: &str) -> Option<String> {
        DATE_RE.find(text).map(|m| m.as_str().to_string())
    }

    pub fn accident_time(&self, text: &str) -> Option<String> {
        TIME_RE.find(text).map(|m| m.as_str().to_string())
    }

    pub fn physio_sessions(&self, text: &str) -> Option<String> {
        PHYSIO_RE
            .find(text)
            .or_else(|| SESSIONS_RE.find(text))
            .map(|m| m.as_str().to_string())
    }

    pub fn mentions_painkillers(&self, text: &str) -> bool {
        contains_ignore_case(text, "painkill")
    }
}
