//! Splitting a document buffer into post blocks.

/// Line that separates two posts.
pub const POST_SEPARATOR: &str = "===";

/// Lazy iterator over the post blocks of a document.
///
/// Blocks are borrowed slices of the source buffer, in order. Blocks that
/// are empty or whitespace-only are skipped. Cloning the iterator restarts
/// from the clone point, and [`split_posts`] can be called again on the same
/// buffer at any time.
#[derive(Debug, Clone)]
pub struct PostSplitter<'a> {
    source: &'a str,
    cursor: Option<usize>,
}

impl<'a> PostSplitter<'a> {
    /// Create a splitter over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Some(0),
        }
    }

    /// The buffer being split.
    pub fn source(&self) -> &'a str {
        self.source
    }
}

impl<'a> Iterator for PostSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let start = self.cursor?;
            let rest = &self.source[start..];

            let segment = match find_separator(rest) {
                Some((end, resume)) => {
                    self.cursor = Some(start + resume);
                    &rest[..end]
                }
                None => {
                    self.cursor = None;
                    rest
                }
            };

            if !segment.trim().is_empty() {
                return Some(segment);
            }
        }
    }
}

impl std::iter::FusedIterator for PostSplitter<'_> {}

/// Split `source` into post blocks on separator lines.
///
/// # Example
///
/// ```
/// use textpost::parser::split_posts;
///
/// let blocks: Vec<_> = split_posts("First\n===\nSecond").collect();
/// assert_eq!(blocks, vec!["First", "Second"]);
/// ```
pub fn split_posts(source: &str) -> PostSplitter<'_> {
    PostSplitter::new(source)
}

/// Whether `line` is a post separator.
pub fn is_separator_line(line: &str) -> bool {
    line == POST_SEPARATOR
}

/// Find the first separator line in `text`.
///
/// Returns the end of the preceding segment (excluding the newline before
/// the separator) and the offset where the next segment starts (after the
/// newline following it).
fn find_separator(text: &str) -> Option<(usize, usize)> {
    let mut line_start = 0;

    while line_start <= text.len() {
        let line_end = text[line_start..]
            .find('\n')
            .map_or(text.len(), |i| line_start + i);

        if is_separator_line(&text[line_start..line_end]) {
            let segment_end = line_start.saturating_sub(1);
            let resume = (line_end + 1).min(text.len());
            return Some((segment_end, resume));
        }

        if line_end == text.len() {
            break;
        }
        line_start = line_end + 1;
    }

    None
}
