//! Frequency-ranked keyword phrases.

use notetaker_transcript::TranscriptDocument;

use crate::noun_chunk::{NounChunk, NounChunkResolver};
use crate::pattern_matcher::{ClinicalMatch, PatternMatcher};

/// Default number of keywords returned.
pub const DEFAULT_TOP_N: usize = 10;

/// Ranks noun phrases and clinical pattern matches by frequency.
///
/// Candidates are collected from the lowercased text: every noun chunk longer
/// than two characters in document order, then every pattern match. Ties keep
/// first-seen order.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRanker<'m> {
    matcher: &'m PatternMatcher,
    chunker: NounChunkResolver,
}

impl<'m> KeywordRanker<'m> {
    pub fn new(matcher: &'m PatternMatcher) -> Self {
        Self {
            matcher,
            chunker: NounChunkResolver,
        }
    }

    pub fn rank(&self, text: &str, top_n: usize) -> Vec<String> {
        let doc = TranscriptDocument::from_text(&text.to_lowercase())
            .run_resolver(&self.chunker)
            .run_resolver(self.matcher);

        let chunks = doc
            .attrs_by::<NounChunk>()
            .into_iter()
            .map(|(_, chunk)| chunk.text().trim())
            .filter(|phrase| phrase.chars().count() > 2);
        let matches = doc
            .attrs_by::<ClinicalMatch>()
            .into_iter()
            .map(|(_, found)| found.surface.as_str());

        let mut counts: Vec<(&str, usize)> = Vec::new();
        for phrase in chunks.chain(matches) {
            match counts.iter_mut().find(|(seen, _)| *seen == phrase) {
                Some((_, count)) => *count += 1,
                None => counts.push((phrase, 1)),
            }
        }
        // stable: ties keep first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let keywords: Vec<String> = counts
            .into_iter()
            .take(top_n)
            .map(|(phrase, _)| phrase.to_string())
            .collect();
        tracing::debug!(count = keywords.len(), top_n, "ranked keywords");
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_phrase_ranks_first() {
        let matcher = PatternMatcher::new();
        let keywords = KeywordRanker::new(&matcher).rank(
            "Neck pain again. Still neck pain at night. The doctor said neck pain was common.",
            3,
        );
        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords[0], "neck pain");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let matcher = PatternMatcher::new();
        let keywords = KeywordRanker::new(&matcher).rank("the car. the road.", 10);
        assert_eq!(keywords, vec!["the car", "the road"]);
    }

    #[test]
    fn short_chunks_are_skipped() {
        let matcher = PatternMatcher::new();
        let keywords = KeywordRanker::new(&matcher).rank("I slept. Sleep is better.", 10);
        assert_eq!(keywords, vec!["sleep", "slept"]);
    }

    #[test]
    fn whitespace_variants_count_as_one_phrase() {
        let matcher = PatternMatcher::new();
        let keywords = KeywordRanker::new(&matcher).rank("Patient: neck\tpain and NECK  PAIN", 10);
        assert_eq!(keywords, vec!["neck pain", "patient"]);
    }

    #[test]
    fn zero_top_n_is_empty() {
        let matcher = PatternMatcher::new();
        assert!(KeywordRanker::new(&matcher).rank("neck pain", 0).is_empty());
        assert!(KeywordRanker::new(&matcher).rank("", DEFAULT_TOP_N).is_empty());
    }
}
