//! Post parsing pipeline.
//!
//! Raw document text flows through four stages, each a pure function:
//!
//! 1. [`split_posts`] cuts the buffer into blocks on `===` lines.
//! 2. [`parse_post`] detects the optional `---` metadata header.
//! 3. [`segment`] pulls `![alt](source)` markers out of the body.
//! 4. [`annotate`] splits the remaining prose on `==highlight==` markers.
//!
//! None of the stages can fail: malformed input degrades to literal text.

mod header;
mod highlight;
mod options;
mod segment;
mod splitter;

pub use header::{
    parse_post, parse_post_with_options, split_header, RawHeader, HEADER_DELIMITER,
};
pub use highlight::{
    annotate, highlight_spans, strip_highlights, Fragment, Fragments, HighlightSpan,
    OwnedFragment, HIGHLIGHT_DELIMITER,
};
pub use options::{ErrorMode, ParseOptions};
pub use segment::{image_references, segment, Segmented};
pub use splitter::{is_separator_line, split_posts, PostSplitter, POST_SEPARATOR};

use crate::model::Post;

/// Parse every post in `text` with default options.
///
/// # Example
///
/// ```
/// use textpost::parser::parse_posts;
///
/// let posts = parse_posts("---\ntheme: dark\n---\nHello\n===\nSecond post");
/// assert_eq!(posts.len(), 2);
/// assert_eq!(posts[0].metadata.theme, "dark");
/// assert_eq!(posts[1].body, "Second post");
/// ```
pub fn parse_posts(text: &str) -> Vec<Post> {
    parse_posts_with_options(text, &ParseOptions::default())
}

/// Parse every post in `text`.
pub fn parse_posts_with_options(text: &str, options: &ParseOptions) -> Vec<Post> {
    split_posts(text)
        .enumerate()
        .map(|(index, block)| parse_post_with_options(index, block, options))
        .collect()
}
