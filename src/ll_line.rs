mod display;
pub mod x;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::{self, Debug};

pub use display::LLLineDisplay;
use x::XMatch;

/// Inclusive token index range: `(start_idx, end_idx)`.
pub type LRange = (usize, usize);

/// Coarse token class assigned by the tokenizer.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTag {
    /// Natural number (ASCII digits only)
    NATN,
    /// Punctuation
    PUNC,
    /// Any other symbol
    SYMB,
    /// Whitespace run
    SPACE,
    /// Word, including hyphenated compounds and contractions
    WORD,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LLToken {
    pub token_idx: usize,
    /// Byte offset of the first character in the source line
    pub pos_starts_at: usize,
    /// Byte offset one past the last character in the source line
    pub pos_ends_at: usize,
    pub text: String,
    pub tag: TextTag,
}

struct StoredAttr {
    range: LRange,
    value: Box<dyn Any + Send + Sync>,
    debug_value: String,
}

/// Attributes keyed by their concrete type, each bucket ordered by
/// `(start asc, end desc)`.
#[derive(Default)]
struct LLLineAttrs {
    by_type: HashMap<TypeId, Vec<StoredAttr>>,
}

impl LLLineAttrs {
    fn insert_all<A: Debug + Send + Sync + 'static>(
        &mut self,
        assignments: Vec<LLCursorAssignment<A>>,
    ) {
        if assignments.is_empty() {
            return;
        }

        let bucket = self.by_type.entry(TypeId::of::<A>()).or_default();
        for assignment in assignments {
            bucket.push(StoredAttr {
                range: (assignment.start_idx, assignment.end_idx),
                debug_value: format!("{:?}", assignment.value),
                value: Box::new(assignment.value),
            });
        }
        // stable: equal ranges keep resolver order
        bucket.sort_by(|a, b| a.range.0.cmp(&b.range.0).then(b.range.1.cmp(&a.range.1)));
    }

    fn get<T: 'static>(&self) -> impl Iterator<Item = &StoredAttr> {
        self.by_type
            .get(&TypeId::of::<T>())
            .into_iter()
            .flat_map(|bucket| bucket.iter())
    }
}

/// A tokenized line with attributes attached to token ranges.
pub struct LLLine {
    ll_tokens: Vec<LLToken>,
    attrs: LLLineAttrs,
}

impl Debug for LLLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLLine")
            .field("ll_tokens", &self.ll_tokens.len())
            .field("attr_types", &self.attrs.by_type.len())
            .finish()
    }
}

impl LLLine {
    pub fn new(ll_tokens: Vec<LLToken>) -> Self {
        LLLine {
            ll_tokens,
            attrs: LLLineAttrs::default(),
        }
    }

    pub fn ll_tokens(&self) -> &[LLToken] {
        &self.ll_tokens
    }

    pub fn is_empty(&self) -> bool {
        self.ll_tokens.is_empty()
    }

    /// Run a resolver over the whole line and store what it assigns.
    pub fn run<R: Resolver>(mut self, resolver: &R) -> Self {
        if self.ll_tokens.is_empty() {
            return self;
        }

        let assignments = resolver.go(LLSelection {
            line: &self,
            start_idx: 0,
            end_idx: self.ll_tokens.len() - 1,
        });
        self.attrs.insert_all(assignments);
        self
    }

    /// All attributes of type `T` with their ranges, in line order.
    pub fn attrs_by<T: 'static>(&self) -> Vec<(LRange, &T)> {
        self.attrs
            .get::<T>()
            .filter_map(|stored| {
                stored
                    .value
                    .downcast_ref::<T>()
                    .map(|value| (stored.range, value))
            })
            .collect()
    }

    pub(crate) fn debug_attrs<T: 'static>(&self) -> Vec<(LRange, String)> {
        self.attrs
            .get::<T>()
            .map(|stored| (stored.range, stored.debug_value.clone()))
            .collect()
    }

    /// Source text covered by an inclusive token range.
    pub fn text_of(&self, range: LRange) -> String {
        self.ll_tokens
            .get(range.0..=range.1)
            .map(|tokens| tokens.iter().map(|t| t.text.as_str()).collect())
            .unwrap_or_default()
    }

    /// Full source text of the line.
    pub fn text(&self) -> String {
        self.ll_tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Rules that scan a line and assign attributes to token ranges.
pub trait Resolver {
    type Attr: Debug + Send + Sync + 'static;

    fn go(&self, sel: LLSelection) -> Vec<LLCursorAssignment<Self::Attr>>;
}

/// A contiguous token range of a line that resolvers navigate.
#[derive(Clone, Copy)]
pub struct LLSelection<'l> {
    line: &'l LLLine,
    start_idx: usize,
    end_idx: usize,
}

impl<'l> LLSelection<'l> {
    pub fn range(&self) -> LRange {
        (self.start_idx, self.end_idx)
    }

    pub fn text(&self) -> String {
        self.line.text_of(self.range())
    }

    /// Non-whitespace tokens joined by single spaces, so `neck\tpain` and
    /// `neck  pain` both read `neck pain`.
    pub fn normalized_text(&self) -> String {
        self.find_by(&x::token_text())
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A narrower selection inside this one, or `None` if `range` does not
    /// fit.
    pub fn subselection(&self, range: LRange) -> Option<LLSelection<'l>> {
        let (start_idx, end_idx) = range;
        if start_idx < self.start_idx || end_idx > self.end_idx || start_idx > end_idx {
            return None;
        }

        Some(LLSelection {
            line: self.line,
            start_idx,
            end_idx,
        })
    }

    /// Every match of `matcher` that fits inside this selection.
    pub fn find_by<M: XMatch<'l>>(&self, matcher: &M) -> Vec<(LLSelection<'l>, M::Out)> {
        let mut found = Vec::new();
        for idx in self.start_idx..=self.end_idx {
            for (end_idx, value) in matcher.go(self.line, idx) {
                if end_idx <= self.end_idx {
                    found.push((
                        LLSelection {
                            line: self.line,
                            start_idx: idx,
                            end_idx,
                        },
                        value,
                    ));
                }
            }
        }
        found
    }

    /// Extend the selection by the first match directly after its end.
    pub fn match_first_forwards<M: XMatch<'l>>(
        &self,
        matcher: &M,
    ) -> Option<(LLSelection<'l>, M::Out)> {
        let next_idx = self.end_idx + 1;
        if next_idx >= self.line.ll_tokens.len() {
            return None;
        }

        matcher
            .go(self.line, next_idx)
            .into_iter()
            .next()
            .map(|(end_idx, value)| {
                (
                    LLSelection {
                        line: self.line,
                        start_idx: self.start_idx,
                        end_idx,
                    },
                    value,
                )
            })
    }

    pub fn finish_with_attr<A>(&self, value: A) -> LLCursorAssignment<A> {
        LLCursorAssignment {
            start_idx: self.start_idx,
            end_idx: self.end_idx,
            value,
        }
    }
}

/// An attribute ready to be stored on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LLCursorAssignment<A> {
    start_idx: usize,
    end_idx: usize,
    value: A,
}
