use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use notetaker_clinical::{
    ExtractionResult, Notetaker, NotetakerConfig, SentimentIntent, SoapNote, StructuredReport,
};

const SAMPLE_TRANSCRIPT: &str =
    include_str!("../../notetaker-clinical/fixtures/whiplash_consultation.txt");
const SAMPLE_UTTERANCE: &str =
    "I'm a bit worried about my back pain, but I hope it gets better soon.";

/// Print the structured report, entities, keywords, sentiment and SOAP note
/// for a physician-patient transcript.
#[derive(Parser, Debug)]
#[command(name = "notetaker-demo")]
#[command(version = "0.1.0")]
#[command(about = "Clinical notes from a physician-patient transcript")]
struct CliArgs {
    /// Transcript file; the bundled whiplash consultation when omitted
    #[arg(value_name = "TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "NAME", default_value = "Janet Jones")]
    patient_name: String,

    /// Number of keywords, overriding the configuration
    #[arg(long, value_name = "N")]
    top_n: Option<usize>,

    /// Snippet passed to the sentiment and intent classifier
    #[arg(long, value_name = "TEXT", default_value = SAMPLE_UTTERANCE)]
    utterance: String,

    /// Do not call the hosted classification models
    #[arg(long)]
    skip_classifier: bool,
}

#[derive(Serialize)]
struct DemoOutput<'a> {
    structured_report: &'a StructuredReport,
    entities: &'a ExtractionResult,
    keywords: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment_and_intent: Option<SentimentIntent>,
    soap_note: &'a SoapNote,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => NotetakerConfig::load(path)?,
        None => NotetakerConfig::default(),
    };
    if let Some(top_n) = args.top_n {
        config.keywords.top_n = top_n;
    }

    let transcript = match &args.transcript {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?,
        None => SAMPLE_TRANSCRIPT.to_string(),
    };

    let mut notetaker = Notetaker::from_config(config)?;
    if !args.skip_classifier {
        notetaker = notetaker.with_inference_client()?;
    }

    let analysis = notetaker.analyze(&transcript, Some(&args.patient_name));
    let sentiment_and_intent = if args.skip_classifier {
        None
    } else {
        Some(
            notetaker
                .sentiment_and_intent(&args.utterance)
                .context("Sentiment and intent classification failed")?,
        )
    };

    let output = DemoOutput {
        structured_report: &analysis.report,
        entities: &analysis.entities,
        keywords: &analysis.keywords,
        sentiment_and_intent,
        soap_note: &analysis.soap,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn defaults_use_bundled_transcript() {
        let args = CliArgs::parse_from(["notetaker-demo", "--skip-classifier"]);
        assert!(args.transcript.is_none());
        assert!(args.skip_classifier);
        assert_eq!(args.patient_name, "Janet Jones");
        assert_eq!(args.utterance, SAMPLE_UTTERANCE);
    }

    #[test]
    fn flags_override_settings() {
        let args = CliArgs::parse_from([
            "notetaker-demo",
            "visit.txt",
            "--top-n",
            "3",
            "--patient-name",
            "Sam",
        ]);
        assert_eq!(args.transcript, Some(PathBuf::from("visit.txt")));
        assert_eq!(args.top_n, Some(3));
        assert_eq!(args.patient_name, "Sam");
    }
}
