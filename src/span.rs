//! Locating the abbreviation token that precedes the cursor.
//!
//! The token is the run of non-whitespace characters that ends at the cursor.
//! All offsets are in chars, matching how [`ropey`] addresses text.

use std::ops::Range;

use ropey::Rope;

/// Read-only text addressable by char offset.
pub trait TextSource {
    /// Total length in chars.
    fn len_chars(&self) -> usize;

    /// Characters strictly before `char_idx`, nearest first.
    fn chars_before(&self, char_idx: usize) -> impl Iterator<Item = char> + '_;

    /// Copy out a char range. The range must lie within the text.
    fn slice_chars(&self, range: Range<usize>) -> String;
}

impl TextSource for str {
    fn len_chars(&self) -> usize {
        self.chars().count()
    }

    fn chars_before(&self, char_idx: usize) -> impl Iterator<Item = char> + '_ {
        self[..char_to_byte(self, char_idx)].chars().rev()
    }

    fn slice_chars(&self, range: Range<usize>) -> String {
        let start = char_to_byte(self, range.start);
        let end = char_to_byte(self, range.end);
        self[start..end].to_string()
    }
}

impl TextSource for String {
    fn len_chars(&self) -> usize {
        self.as_str().len_chars()
    }

    fn chars_before(&self, char_idx: usize) -> impl Iterator<Item = char> + '_ {
        self.as_str().chars_before(char_idx)
    }

    fn slice_chars(&self, range: Range<usize>) -> String {
        self.as_str().slice_chars(range)
    }
}

impl TextSource for Rope {
    fn len_chars(&self) -> usize {
        Self::len_chars(self)
    }

    fn chars_before(&self, char_idx: usize) -> impl Iterator<Item = char> + '_ {
        self.chars_at(char_idx).reversed()
    }

    fn slice_chars(&self, range: Range<usize>) -> String {
        self.slice(range).to_string()
    }
}

/// Byte index of a char offset, clamped to the end of `s`.
fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(byte, _)| byte)
}

/// Half-open char range of the abbreviation within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A resolved span together with the text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: TokenSpan,
    pub text: String,
}

/// Compute the span of non-whitespace text ending at `cursor`.
///
/// The cursor is clamped to the document length. The returned span may be
/// empty, when the cursor sits at the start of the document or right after
/// whitespace.
pub fn token_span<T: TextSource + ?Sized>(text: &T, cursor: usize) -> TokenSpan {
    let end = cursor.min(text.len_chars());
    let run = text
        .chars_before(end)
        .take_while(|ch| !ch.is_whitespace())
        .count();
    TokenSpan::new(end - run, end)
}

/// Resolve the abbreviation token immediately before `cursor`.
///
/// Returns `None` when the span is empty; callers should offer no completion.
pub fn resolve_token<T: TextSource + ?Sized>(text: &T, cursor: usize) -> Option<Token> {
    let span = token_span(text, cursor);
    if span.is_empty() {
        return None;
    }
    Some(Token {
        span,
        text: text.slice_chars(span.range()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_at_start_is_empty() {
        assert!(token_span("div", 0).is_empty());
        assert_eq!(resolve_token("div", 0), None);
    }

    #[test]
    fn test_token_runs_to_document_start() {
        let token = resolve_token("div#main", 8).unwrap();
        assert_eq!(token.span, TokenSpan::new(0, 8));
        assert_eq!(token.text, "div#main");
    }

    #[test]
    fn test_token_stops_at_whitespace() {
        let doc = "hello ul.list/li";
        let token = resolve_token(doc, doc.len()).unwrap();
        assert_eq!(token.span, TokenSpan::new(6, 16));
        assert_eq!(token.text, "ul.list/li");
    }

    #[test]
    fn test_token_stops_at_newline_and_tab() {
        assert_eq!(resolve_token("x\np", 3).unwrap().text, "p");
        assert_eq!(resolve_token("x\tp", 3).unwrap().text, "p");
    }

    #[test]
    fn test_scan_does_not_pass_cursor() {
        let token = resolve_token("div#main rest", 3).unwrap();
        assert_eq!(token.span, TokenSpan::new(0, 3));
        assert_eq!(token.text, "div");
    }

    #[test]
    fn test_cursor_after_whitespace_is_empty() {
        assert_eq!(resolve_token("div ", 4), None);
        assert_eq!(resolve_token("   ", 3), None);
    }

    #[test]
    fn test_cursor_past_end_is_clamped() {
        let token = resolve_token("a/b", 99).unwrap();
        assert_eq!(token.span, TokenSpan::new(0, 3));
    }

    #[test]
    fn test_offsets_are_in_chars() {
        let doc = "é p.ü";
        let token = resolve_token(doc, 5).unwrap();
        assert_eq!(token.span, TokenSpan::new(2, 5));
        assert_eq!(token.text, "p.ü");
    }

    #[test]
    fn test_rope_and_str_agree() {
        let doc = "one two/three\nfour#x five";
        let rope = Rope::from_str(doc);
        for cursor in 0..=doc.len() {
            assert_eq!(
                resolve_token(&rope, cursor),
                resolve_token(doc, cursor),
                "cursor {cursor}"
            );
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn span_is_within_document(doc in "[a-z#./ \n]{0,40}", cursor in 0..60usize) {
                let span = token_span(doc.as_str(), cursor);
                prop_assert!(span.start <= span.end);
                prop_assert!(span.end <= doc.len_chars());
            }

            #[test]
            fn resolved_text_has_no_whitespace(doc in "[a-z#./ \t\n]{0,40}", cursor in 0..60usize) {
                if let Some(token) = resolve_token(doc.as_str(), cursor) {
                    prop_assert!(!token.text.is_empty());
                    prop_assert!(!token.text.chars().any(char::is_whitespace));
                }
            }

            #[test]
            fn span_start_follows_whitespace_or_document_start(
                doc in "[a-z#./ \n]{0,40}",
                cursor in 0..60usize,
            ) {
                let span = token_span(doc.as_str(), cursor);
                if span.start > 0 {
                    let before = doc.chars().nth(span.start - 1).unwrap();
                    prop_assert!(before.is_whitespace());
                }
            }
        }
    }
}
