//! Multi-line transcript documents.

use notetaker_nlp::{LLLine, Resolver};

use crate::Speaker;

/// One non-empty line of a transcript.
#[derive(Debug)]
pub struct TranscriptLine {
    line: LLLine,
    speaker: Speaker,
    /// Trimmed source line, speaker prefix included
    raw: String,
    /// Trimmed text after the speaker prefix
    utterance: String,
    /// 1-based line number in the original text
    source_line: usize,
}

impl TranscriptLine {
    fn new(source_line: usize, text: &str) -> Self {
        let raw = text.trim();
        let (speaker, utterance) = Speaker::detect(raw);
        Self {
            line: notetaker_nlp::create_line_from_string(text),
            speaker,
            raw: raw.to_string(),
            utterance: utterance.to_string(),
            source_line,
        }
    }

    pub fn ll_line(&self) -> &LLLine {
        &self.line
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    pub fn source_line(&self) -> usize {
        self.source_line
    }
}

/// A conversation split into tokenized lines with speaker turns.
pub struct TranscriptDocument {
    /// Non-empty lines only
    lines: Vec<TranscriptLine>,
}

impl std::fmt::Debug for TranscriptDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptDocument")
            .field("line_count", &self.lines.len())
            .finish()
    }
}

impl TranscriptDocument {
    /// Create a document from raw text.
    ///
    /// The text is split by newlines, and each line is tokenized using
    /// `notetaker_nlp::create_line_from_string`. Blank lines are filtered
    /// out, but original line numbers are kept on every
    /// [`TranscriptLine`].
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter(|(_, line_text)| !line_text.trim().is_empty())
            .map(|(source_idx, line_text)| TranscriptLine::new(source_idx + 1, line_text))
            .collect();

        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn get_line(&self, index: usize) -> Option<&TranscriptLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Lines spoken by `speaker`, in order.
    pub fn turns_by(&self, speaker: Speaker) -> impl Iterator<Item = &TranscriptLine> {
        self.lines.iter().filter(move |line| line.speaker == speaker)
    }

    /// Run a resolver on every line of the document.
    pub fn run_resolver<R: Resolver>(self, resolver: &R) -> Self {
        let lines = self
            .lines
            .into_iter()
            .map(|transcript_line| TranscriptLine {
                line: transcript_line.line.run(resolver),
                ..transcript_line
            })
            .collect();
        Self { lines }
    }

    /// Attributes of type `T` from every line, in document order.
    pub fn attrs_by<T: 'static>(&self) -> Vec<(&TranscriptLine, &T)> {
        self.lines
            .iter()
            .flat_map(|line| {
                line.line
                    .attrs_by::<T>()
                    .into_iter()
                    .map(move |(_, value)| (line, value))
            })
            .collect()
    }

}
