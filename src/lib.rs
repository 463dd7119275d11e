//! Token-line core for rule-based transcript analysis.
//!
//! A line of text is tokenized into an [`LLLine`]. [`Resolver`]s scan the
//! line through an [`LLSelection`], using the matchers in [`x`], and attach
//! typed attributes to token ranges. Callers read them back with
//! [`LLLine::attrs_by`].
//!
//! ```
//! use notetaker_nlp::{create_line_from_string, x, LLCursorAssignment, LLSelection, Resolver};
//!
//! #[derive(Debug)]
//! struct Shouting;
//!
//! struct ShoutingResolver;
//!
//! impl Resolver for ShoutingResolver {
//!     type Attr = Shouting;
//!
//!     fn go(&self, sel: LLSelection) -> Vec<LLCursorAssignment<Self::Attr>> {
//!         sel.find_by(&x::token_text())
//!             .into_iter()
//!             .filter(|(_, text)| text.len() > 1 && text.chars().all(|c| c.is_uppercase()))
//!             .map(|(sel, _)| sel.finish_with_attr(Shouting))
//!             .collect()
//!     }
//! }
//!
//! let line = create_line_from_string("It was REALLY bad").run(&ShoutingResolver);
//! assert_eq!(line.attrs_by::<Shouting>().len(), 1);
//! ```

mod create_tokens;
mod ll_line;

pub use create_tokens::create_line_from_string;
pub use ll_line::{
    x, LLCursorAssignment, LLLine, LLLineDisplay, LLSelection, LLToken, LRange,
    Resolver, TextTag,
};
