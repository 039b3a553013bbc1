//! Derives the character-offset partition of a sentence. Offsets are byte
//! positions into the sentence's raw text; every consumer compares or slices
//! within one text, so byte and character arithmetic classify identically.

use crate::corpus::Sentence;
use std::fmt::{self, Display};

/// Half-open interval `[begin, end)` of the sentence text covered by one
/// token. Spans of a sentence are contiguous and non-overlapping and cover
/// the whole text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

impl Sentence {
    /// The span of every token, by prefix sum of surface lengths.
    pub fn spans(&self) -> Vec<Span> {
        let mut offset = 0;
        self.tokens()
            .iter()
            .map(|token| {
                let begin = offset;
                offset += token.surface().len();
                Span { begin, end: offset }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Token;

    fn sentence(surfaces: &[&str]) -> Sentence {
        Sentence::new(
            surfaces
                .iter()
                .map(|s| Token::from_fields(s, "", 0))
                .collect(),
        )
    }

    #[test]
    fn test_spans_partition_the_text() {
        let sent = sentence(&["ab", "c", "def"]);
        let spans = sent.spans();
        assert_eq!(
            spans,
            [
                Span { begin: 0, end: 2 },
                Span { begin: 2, end: 3 },
                Span { begin: 3, end: 6 }
            ]
        );
        assert_eq!(spans.iter().map(Span::len).sum::<usize>(), sent.text().len());
    }

    #[test]
    fn test_spans_use_byte_lengths() {
        let sent = sentence(&["外国", "人"]);
        let spans = sent.spans();
        assert_eq!(spans, [Span { begin: 0, end: 6 }, Span { begin: 6, end: 9 }]);
    }

    #[test]
    fn test_empty_sentence_has_no_spans() {
        assert!(sentence(&[]).spans().is_empty());
    }
}
