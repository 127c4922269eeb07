//! Inline `==highlight==` annotation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Non-empty, single-line text between a pair of `==` delimiters.
static HIGHLIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==([^\n]+?)==").unwrap());

/// Delimiter wrapping highlighted text.
pub const HIGHLIGHT_DELIMITER: &str = "==";

/// Byte range of highlighted text inside a prose string.
///
/// The range covers the inner text only; the delimiters sit just outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightSpan {
    /// Byte offset of the first highlighted character
    pub start: usize,
    /// Byte offset just past the last highlighted character
    pub end: usize,
}

impl HighlightSpan {
    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A piece of annotated prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Fragment<'a> {
    /// Text drawn with the regular style
    Plain(&'a str),
    /// Text drawn with the highlight style, delimiters removed
    Highlighted(&'a str),
}

impl<'a> Fragment<'a> {
    /// The fragment's text.
    pub fn text(&self) -> &'a str {
        match self {
            Fragment::Plain(s) | Fragment::Highlighted(s) => s,
        }
    }

    /// Whether this fragment is highlighted.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, Fragment::Highlighted(_))
    }

    /// Convert to an owned fragment.
    pub fn to_owned_fragment(&self) -> OwnedFragment {
        match self {
            Fragment::Plain(s) => OwnedFragment::Plain(s.to_string()),
            Fragment::Highlighted(s) => OwnedFragment::Highlighted(s.to_string()),
        }
    }
}

/// Owned counterpart of [`Fragment`], used in resolved post views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum OwnedFragment {
    /// Text drawn with the regular style
    Plain(String),
    /// Text drawn with the highlight style
    Highlighted(String),
}

impl OwnedFragment {
    /// The fragment's text.
    pub fn text(&self) -> &str {
        match self {
            OwnedFragment::Plain(s) | OwnedFragment::Highlighted(s) => s,
        }
    }

    /// Whether this fragment is highlighted.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, OwnedFragment::Highlighted(_))
    }
}

/// Lazy iterator over the fragments of a prose string.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    text: &'a str,
    position: usize,
    pending: Option<HighlightSpan>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Fragment<'a>> {
        if let Some(span) = self.pending.take() {
            self.position = span.end + HIGHLIGHT_DELIMITER.len();
            return Some(Fragment::Highlighted(&self.text[span.start..span.end]));
        }

        if self.position >= self.text.len() {
            return None;
        }

        match next_span(self.text, self.position) {
            Some(span) => {
                let open = span.start - HIGHLIGHT_DELIMITER.len();
                if open > self.position {
                    let plain = &self.text[self.position..open];
                    self.pending = Some(span);
                    Some(Fragment::Plain(plain))
                } else {
                    self.position = span.end + HIGHLIGHT_DELIMITER.len();
                    Some(Fragment::Highlighted(&self.text[span.start..span.end]))
                }
            }
            None => {
                let plain = &self.text[self.position..];
                self.position = self.text.len();
                Some(Fragment::Plain(plain))
            }
        }
    }
}

impl std::iter::FusedIterator for Fragments<'_> {}

/// Split prose into alternating plain and highlighted fragments.
///
/// # Example
///
/// ```
/// use textpost::parser::{annotate, Fragment};
///
/// let fragments: Vec<_> = annotate("Hello ==world==").collect();
/// assert_eq!(fragments, vec![Fragment::Plain("Hello "), Fragment::Highlighted("world")]);
/// ```
pub fn annotate(text: &str) -> Fragments<'_> {
    Fragments {
        text,
        position: 0,
        pending: None,
    }
}

/// Byte ranges of all highlighted text in `text`.
pub fn highlight_spans(text: &str) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    let mut position = 0;
    while let Some(span) = next_span(text, position) {
        position = span.end + HIGHLIGHT_DELIMITER.len();
        spans.push(span);
    }
    spans
}

/// `text` with highlight delimiters removed.
pub fn strip_highlights(text: &str) -> String {
    annotate(text).map(|f| f.text()).collect()
}

fn next_span(text: &str, from: usize) -> Option<HighlightSpan> {
    let caps = HIGHLIGHT_RE.captures_at(text, from)?;
    let inner = caps.get(1)?;
    Some(HighlightSpan {
        start: inner.start(),
        end: inner.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Fragment<'_>> {
        annotate(text).collect()
    }

    #[test]
    fn test_plain_only() {
        assert_eq!(collect("no marks"), vec![Fragment::Plain("no marks")]);
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_trailing_highlight() {
        assert_eq!(
            collect("Hello ==world=="),
            vec![Fragment::Plain("Hello "), Fragment::Highlighted("world")]
        );
    }

    #[test]
    fn test_alternating_fragments() {
        assert_eq!(
            collect("==a== and ==b== done"),
            vec![
                Fragment::Highlighted("a"),
                Fragment::Plain(" and "),
                Fragment::Highlighted("b"),
                Fragment::Plain(" done"),
            ]
        );
    }

    #[test]
    fn test_adjacent_highlights() {
        assert_eq!(
            collect("==a====b=="),
            vec![Fragment::Highlighted("a"), Fragment::Highlighted("b")]
        );
    }

    #[test]
    fn test_lone_delimiter_is_literal() {
        assert_eq!(collect("x == y"), vec![Fragment::Plain("x == y")]);
        assert_eq!(
            collect("==a== then =="),
            vec![Fragment::Highlighted("a"), Fragment::Plain(" then ==")]
        );
    }

    #[test]
    fn test_non_greedy() {
        assert_eq!(
            collect("==one== ==two=="),
            vec![
                Fragment::Highlighted("one"),
                Fragment::Plain(" "),
                Fragment::Highlighted("two"),
            ]
        );
    }

    #[test]
    fn test_highlight_does_not_cross_lines() {
        assert_eq!(
            collect("==start\nend=="),
            vec![Fragment::Plain("==start\nend==")]
        );
    }

    #[test]
    fn test_empty_pair_is_literal() {
        assert_eq!(collect("===="), vec![Fragment::Plain("====")]);
    }

    #[test]
    fn test_content_preserved() {
        let text = "🎨 ==강조== text ==x== == tail";
        let joined: String = annotate(text)
            .map(|f| match f {
                Fragment::Plain(s) => s.to_string(),
                Fragment::Highlighted(s) => format!("=={}==", s),
            })
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_spans() {
        let text = "Hello ==world== and ==you==";
        let spans = highlight_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].start..spans[0].end], "world");
        assert_eq!(&text[spans[1].start..spans[1].end], "you");
        assert_eq!(spans[0].len(), 5);
    }

    #[test]
    fn test_strip_highlights() {
        assert_eq!(strip_highlights("a ==b== c =="), "a b c ==");
    }
}
