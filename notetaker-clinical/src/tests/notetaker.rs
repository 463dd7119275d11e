use std::fs;

use crate::sentiment::mock::{FailingModel, FixedSentiment, KeywordZeroShot};
use crate::{
    ClassifierError, Notetaker, NotetakerConfig, NotetakerError, Sentiment,
    SentimentIntentClassifier, SentimentLabel,
};

const SNIPPET: &str = "I'm a bit worried about my back pain, but I hope it gets better soon.";

#[test]
fn sentiment_requires_a_classifier() {
    let notetaker = Notetaker::new();
    assert!(!notetaker.has_classifier());
    assert!(matches!(
        notetaker.sentiment_and_intent(SNIPPET),
        Err(NotetakerError::MissingClassifier)
    ));
}

#[test]
fn sentiment_through_mock_models() {
    let notetaker = Notetaker::new().with_classifier(SentimentIntentClassifier::new(
        FixedSentiment(SentimentLabel::Negative, 0.8),
        KeywordZeroShot("reassurance"),
    ));
    let result = notetaker.sentiment_and_intent(SNIPPET).unwrap();
    assert_eq!(result.sentiment, Sentiment::Anxious);
    assert_eq!(result.intent, "Seeking reassurance");
}

#[test]
fn classifier_errors_pass_through() {
    let notetaker = Notetaker::new().with_classifier(SentimentIntentClassifier::new(
        FailingModel,
        KeywordZeroShot("concern"),
    ));
    assert!(matches!(
        notetaker.sentiment_and_intent(SNIPPET),
        Err(NotetakerError::Classifier(ClassifierError::Unavailable(_)))
    ));
}

#[test]
fn config_controls_defaults() {
    let config = NotetakerConfig::from_toml_str(
        "[keywords]\ntop_n = 2\n\n[report]\ndefault_patient_name = \"Anonymous\"\n",
        "inline",
    )
    .unwrap();
    let notetaker = Notetaker::from_config(config).unwrap();

    let text = "Patient: My neck pain. The neck pain is worse. A car hit me.";
    assert_eq!(notetaker.extract_keywords(text).len(), 2);
    assert_eq!(notetaker.extract_keywords_top(text, 10).len(), 5);
    assert_eq!(
        notetaker.build_structured_report(text, None).patient_name,
        "Anonymous"
    );
}

#[test]
fn custom_pattern_table_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("patterns.ron"),
        r#"[
            (category: Symptom, tokens: ["dizziness"]),
            (category: Diagnosis, tokens: ["concussion"]),
        ]"#,
    )
    .unwrap();
    let config_path = dir.path().join("notetaker.toml");
    fs::write(&config_path, "[patterns]\ntable = \"patterns.ron\"\n").unwrap();

    let config = NotetakerConfig::load(&config_path).unwrap();
    let notetaker = Notetaker::from_config(config).unwrap();
    let entities = notetaker.extract_entities("Patient: Dizziness since the concussion, and neck pain.");

    assert_eq!(entities.symptoms(), ["Dizziness"]);
    assert_eq!(entities.primary_diagnosis(), Some("Concussion"));
}

#[test]
fn missing_pattern_table_fails_construction() {
    let config = NotetakerConfig::from_toml_str(
        "[patterns]\ntable = \"/nonexistent/patterns.ron\"\n",
        "inline",
    )
    .unwrap();
    assert!(matches!(
        Notetaker::from_config(config),
        Err(NotetakerError::PatternTable { .. })
    ));
}

#[test]
fn analyze_runs_every_rule_based_component() {
    let text = "Patient: I hurt my back. Back pain, then painkillers.\nDoctor: No tenderness.";
    let analysis = Notetaker::new().analyze(text, Some("Sam"));

    assert_eq!(analysis.report.patient_name, "Sam");
    assert_eq!(analysis.entities.symptoms(), ["Back Pain"]);
    assert_eq!(analysis.report.treatment, ["Painkillers", "Painkillers"]);
    assert_eq!(analysis.soap.objective.physical_exam, "Doctor: No tenderness.");
    assert!(analysis.keywords.iter().any(|k| k == "back pain"));

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["report"]["Patient_Name"], "Sam");
    assert_eq!(json["soap"]["Plan"]["Treatment"][0], "Analgesics as needed");
}

#[test]
fn empty_transcript_degrades_to_defaults() {
    let notetaker = Notetaker::new();
    let analysis = notetaker.analyze("", None);

    assert!(analysis.entities.matches.is_empty());
    assert!(analysis.keywords.is_empty());
    assert_eq!(analysis.report.patient_name, "Unknown");
    assert_eq!(analysis.soap.subjective.chief_complaint, None);
}
