//! Transcript-level abstractions for notetaker-nlp.
//!
//! The core `notetaker-nlp` library operates on single lines (`LLLine`).
//! This crate provides [`TranscriptDocument`], which wraps every non-empty
//! line of a conversation, remembers who is speaking on each line and runs
//! resolvers over all of them.
//!
//! ## Example
//!
//! ```
//! use notetaker_transcript::{Speaker, TranscriptDocument};
//!
//! let doc = TranscriptDocument::from_text("Physician: How are you?\n\nPatient: Better.");
//! assert_eq!(doc.line_count(), 2);
//! assert_eq!(doc.turns_by(Speaker::Patient).next().unwrap().utterance(), "Better.");
//! ```

mod document;
mod speaker;

pub use document::{TranscriptDocument, TranscriptLine};
pub use speaker::Speaker;
