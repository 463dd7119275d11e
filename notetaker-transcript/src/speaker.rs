use serde::Serialize;

/// Who produced a transcript line, judged from its `name:` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Speaker {
    /// `Patient:`
    Patient,
    /// `Physician:` or `Doctor:`
    Physician,
    /// Stage directions, unlabelled lines and any other speaker
    Other,
}

const PREFIXES: &[(&str, Speaker)] = &[
    ("patient:", Speaker::Patient),
    ("physician:", Speaker::Physician),
    ("doctor:", Speaker::Physician),
];

impl Speaker {
    /// Detect the speaker of an already trimmed line.
    ///
    /// Returns the speaker and the utterance with the prefix removed and
    /// trimmed. Lines without a known prefix are [`Speaker::Other`] and keep
    /// their full text.
    pub fn detect(line: &str) -> (Speaker, &str) {
        PREFIXES
            .iter()
            .find_map(|&(prefix, speaker)| {
                strip_prefix_ignore_case(line, prefix).map(|rest| (speaker, rest.trim()))
            })
            .unwrap_or((Speaker::Other, line))
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}
