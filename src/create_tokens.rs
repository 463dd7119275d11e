use unicode_segmentation::UnicodeSegmentation;

use crate::{LLLine, LLToken, TextTag};

/// Tokenize a single line of text.
///
/// Tokens follow Unicode word boundaries, so whitespace runs and punctuation
/// become tokens of their own and the concatenated token text is exactly the
/// input. Hyphenated compounds written without spaces (`x-rays`,
/// `long-term`) are kept together as one word token.
pub fn create_line_from_string(text: &str) -> LLLine {
    let pieces: Vec<(usize, &str)> = text.split_word_bound_indices().collect();

    // byte ranges into `text`
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(pieces.len());
    let mut i = 0;
    while i < pieces.len() {
        let (start, piece) = pieces[i];
        let next = pieces.get(i + 1).map(|&(_, next)| next);

        let joins_compound = is_hyphen(piece)
            && spans
                .last()
                .map_or(false, |&(s, e)| e == start && ends_wordlike(&text[s..e]))
            && next.map_or(false, starts_wordlike);

        if joins_compound {
            if let (Some(last), Some(next)) = (spans.last_mut(), next) {
                last.1 = start + piece.len() + next.len();
                i += 2;
                continue;
            }
        }

        spans.push((start, start + piece.len()));
        i += 1;
    }

    let ll_tokens = spans
        .into_iter()
        .enumerate()
        .map(|(token_idx, (start, end))| {
            let token_text = &text[start..end];
            LLToken {
                token_idx,
                pos_starts_at: start,
                pos_ends_at: end,
                text: token_text.to_string(),
                tag: tag_for(token_text),
            }
        })
        .collect();

    LLLine::new(ll_tokens)
}

fn is_hyphen(piece: &str) -> bool {
    matches!(piece, "-" | "\u{2010}" | "\u{2011}")
}

fn starts_wordlike(piece: &str) -> bool {
    piece.chars().next().map_or(false, char::is_alphanumeric)
}

fn ends_wordlike(piece: &str) -> bool {
    piece.chars().last().map_or(false, char::is_alphanumeric)
}

fn tag_for(text: &str) -> TextTag {
    if text.chars().all(char::is_whitespace) {
        TextTag::SPACE
    } else if text.chars().all(|c| c.is_ascii_digit()) {
        TextTag::NATN
    } else if starts_wordlike(text) {
        TextTag::WORD
    } else if text.chars().all(|c| c.is_ascii_punctuation() || is_unicode_punctuation(c)) {
        TextTag::PUNC
    } else {
        TextTag::SYMB
    }
}

fn is_unicode_punctuation(c: char) -> bool {
    matches!(
        c,
        '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' | '\u{00A1}' | '\u{00BF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &LLLine) -> Vec<&str> {
        line.ll_tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_words_spaces_and_punctuation() {
        let line = create_line_from_string("Neck pain, today.");
        assert_eq!(texts(&line), vec!["Neck", " ", "pain", ",", " ", "today", "."]);
        assert_eq!(line.ll_tokens()[0].tag, TextTag::WORD);
        assert_eq!(line.ll_tokens()[1].tag, TextTag::SPACE);
        assert_eq!(line.ll_tokens()[3].tag, TextTag::PUNC);
    }

    #[test]
    fn keeps_hyphenated_compounds_together() {
        let line = create_line_from_string("no long-term damage on the x-rays");
        assert!(texts(&line).contains(&"long-term"));
        assert!(texts(&line).contains(&"x-rays"));
    }

    #[test]
    fn unicode_hyphens_join_compounds() {
        let line = create_line_from_string("no x\u{2011}rays, no long\u{2010}term damage");
        assert!(texts(&line).contains(&"x\u{2011}rays"));
        assert!(texts(&line).contains(&"long\u{2010}term"));
        assert!(!texts(&line).contains(&"rays"));
    }

    #[test]
    fn dangling_hyphen_stays_punctuation() {
        let line = create_line_from_string("pain - stiffness");
        assert_eq!(texts(&line), vec!["pain", " ", "-", " ", "stiffness"]);
        assert_eq!(line.ll_tokens()[2].tag, TextTag::PUNC);
    }

    #[test]
    fn numbers_are_tagged() {
        let line = create_line_from_string("ten or 10");
        assert_eq!(line.ll_tokens()[4].tag, TextTag::NATN);
    }

    #[test]
    fn byte_positions_cover_the_input() {
        let input = "I’m doing better";
        let line = create_line_from_string(input);
        let rebuilt: String = line
            .ll_tokens()
            .iter()
            .map(|t| &input[t.pos_starts_at..t.pos_ends_at])
            .collect();
        assert_eq!(rebuilt, input);
        assert_eq!(texts(&line)[0], "I’m");
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(create_line_from_string("").is_empty());
    }
}
