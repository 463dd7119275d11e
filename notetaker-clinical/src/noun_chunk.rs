//! Rule-based noun phrase chunking.
//!
//! A chunk is either a personal pronoun on its own, or an optional determiner
//! followed by a maximal run of content words. Function words, auxiliaries,
//! common verbs and adverbs end a chunk; so does punctuation. A bare run of
//! content words right after a copula is a predicate (`were bad`) and is not
//! a chunk.
//!
//! ```text
//! my     neck     and     back     pain     were     bad
//! ╰─────────╯NounChunk("my neck")
//!                         ╰───────────╯NounChunk("back pain")
//! ```

use notetaker_nlp::{x, LLCursorAssignment, LLSelection, Resolver, TextTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounChunk(pub String);

impl NounChunk {
    pub fn text(&self) -> &str {
        &self.0
    }
}

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "something",
    "nothing", "everything", "anything", "someone", "anyone", "everyone", "somebody",
    "anybody", "everybody", "mine", "yours", "ours", "theirs",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "my", "your", "his", "her", "its", "our", "their", "this", "that",
    "these", "those", "some", "any", "no", "every", "each", "another", "all", "both",
];

const COPULAS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "i'm", "you're", "he's",
    "she's", "it's", "we're", "they're", "that's", "isn't", "aren't", "wasn't", "weren't",
];

const STOP_WORDS: &[&str] = &[
    // auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "not", "n't",
    // contractions
    "i'm", "i've", "i'd", "i'll", "you're", "you've", "you'd", "you'll", "he's", "she's",
    "it's", "we're", "we've", "they're", "they've", "that's", "there's", "what's", "let's",
    "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "haven't",
    "hasn't", "hadn't", "won't", "wouldn't", "can't", "couldn't", "shouldn't",
    // prepositions
    "of", "in", "on", "at", "to", "for", "from", "with", "by", "about", "into", "onto",
    "over", "under", "after", "before", "during", "through", "since", "until", "behind",
    "between", "around", "against", "without", "within", "like", "as", "than", "off", "up",
    "down", "out", "across", "along", "near",
    // conjunctions and wh-words
    "and", "or", "but", "so", "because", "if", "when", "while", "which", "who", "whom",
    "whose", "what", "where", "why", "how", "though", "although", "whether", "there",
    // adverbs
    "really", "very", "too", "also", "just", "only", "now", "then", "still", "already",
    "always", "never", "ever", "quite", "pretty", "regularly", "again", "anymore", "well",
    "actually", "much", "more", "most", "here", "far", "yet", "even", "right", "sure",
    "especially", "generally", "completely", "certainly", "definitely", "soon", "once",
    "nowhere", "fairly", "rather",
    // interjections
    "yes", "yeah", "ok", "okay", "oh", "um", "uh", "thanks", "thank", "please", "hello", "hi",
    // common verbs
    "go", "goes", "went", "gone", "going", "get", "gets", "got", "getting", "take", "took",
    "taken", "taking", "make", "made", "see", "saw", "seen", "feel", "feels", "felt",
    "feeling", "think", "thought", "say", "said", "tell", "told", "know", "knew", "come",
    "came", "look", "looks", "looked", "looking", "help", "helped", "need", "needed",
    "helps", "start", "started", "stop", "stopped", "hit", "pushed", "drive", "driving", "wear",
    "wearing", "expect", "expected", "foresee", "walk", "happened", "happen", "mean",
    "experience", "experienced", "check", "checked", "recommend", "recommended", "seem",
    "seems", "seemed", "keep", "kept", "notice", "noticed", "hurt", "hurts", "want",
    "wanted", "let", "give", "gave", "given", "try", "tried", "find", "found", "use",
    "used", "sounds", "affect", "affected", "affecting", "worry", "worried", "heal",
    "healed", "healing", "continue", "improving", "improved", "changes", "visit",
];

fn normalise(word: &str) -> String {
    word.to_lowercase().replace('\u{2019}', "'")
}

fn is_one_of(word: &str, list: &[&str]) -> bool {
    list.contains(&word)
}

struct OpenChunk {
    start: usize,
    last_content: Option<usize>,
    predicate: bool,
}

/// Emit the open chunk if it holds at least one content word and is not a
/// predicate.
fn close_chunk(
    selection: &LLSelection,
    open: &mut Option<OpenChunk>,
    results: &mut Vec<LLCursorAssignment<NounChunk>>,
) {
    if let Some(OpenChunk {
        start,
        last_content: Some(end),
        predicate: false,
    }) = open.take()
    {
        if let Some(chunk) = selection.subselection((start, end)) {
            results.push(chunk.finish_with_attr(NounChunk(chunk.normalized_text())));
        }
    }
}

/// Marks noun phrases on a line with [`NounChunk`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NounChunkResolver;

impl Resolver for NounChunkResolver {
    type Attr = NounChunk;

    fn go(&self, selection: LLSelection) -> Vec<LLCursorAssignment<Self::Attr>> {
        let mut results = Vec::new();
        let mut open: Option<OpenChunk> = None;
        let mut after_copula = false;

        for (sel, token) in selection.find_by(&x::token()) {
            let idx = sel.range().0;
            match token.tag {
                TextTag::SPACE => continue,
                TextTag::PUNC | TextTag::SYMB => {
                    close_chunk(&selection, &mut open, &mut results);
                    after_copula = false;
                    continue;
                }
                TextTag::WORD | TextTag::NATN => {}
            }

            let word = normalise(&token.text);
            if is_one_of(&word, PRONOUNS) {
                close_chunk(&selection, &mut open, &mut results);
                results.push(sel.finish_with_attr(NounChunk(token.text.clone())));
            } else if is_one_of(&word, DETERMINERS) {
                close_chunk(&selection, &mut open, &mut results);
                open = Some(OpenChunk {
                    start: idx,
                    last_content: None,
                    predicate: false,
                });
            } else if is_one_of(&word, COPULAS) || is_one_of(&word, STOP_WORDS) {
                close_chunk(&selection, &mut open, &mut results);
            } else {
                match open.as_mut() {
                    Some(chunk) => chunk.last_content = Some(idx),
                    None => {
                        open = Some(OpenChunk {
                            start: idx,
                            last_content: Some(idx),
                            predicate: after_copula,
                        })
                    }
                }
            }
            after_copula = is_one_of(&word, COPULAS);
        }
        close_chunk(&selection, &mut open, &mut results);

        results
    }
}
