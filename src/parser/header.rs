//! Metadata header detection for a single post block.

use crate::model::{Post, PostMetadata};

use super::{ErrorMode, ParseOptions};

/// Line that opens and closes a metadata header.
pub const HEADER_DELIMITER: &str = "---";

/// Result of splitting a block into header pairs and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader<'a> {
    /// `key: value` pairs in source order, trimmed
    pub pairs: Vec<(&'a str, &'a str)>,
    /// Text after the closing delimiter line
    pub body: &'a str,
}

/// Parse one post block with default options.
///
/// # Example
///
/// ```
/// use textpost::parser::parse_post;
///
/// let post = parse_post(0, "---\ntheme: dark\n---\nHello");
/// assert_eq!(post.metadata.theme, "dark");
/// assert_eq!(post.metadata.image_position, "top");
/// assert_eq!(post.body, "Hello");
/// ```
pub fn parse_post(index: usize, block: &str) -> Post {
    parse_post_with_options(index, block, &ParseOptions::default())
}

/// Parse one post block, merging its header over the default metadata.
pub fn parse_post_with_options(index: usize, block: &str, options: &ParseOptions) -> Post {
    match split_header(block, options.error_mode) {
        Some(header) => {
            let metadata = PostMetadata::from_pairs(
                header
                    .pairs
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string())),
            );
            Post::new(index, metadata, header.body).with_header(true)
        }
        None => Post::new(index, PostMetadata::default(), block),
    }
}

/// Detect a leading metadata header in `block`.
///
/// Returns `None` when the block does not start with a delimiter line,
/// has no closing delimiter line, or (in strict mode) contains a header
/// line that is not a `key: value` pair. The first closing delimiter line
/// ends the header.
pub fn split_header(block: &str, mode: ErrorMode) -> Option<RawHeader<'_>> {
    let after_open = block
        .strip_prefix(HEADER_DELIMITER)?
        .strip_prefix('\n')?;

    let mut pairs = Vec::new();
    let mut offset = 0;

    loop {
        let rest = &after_open[offset..];
        let (line, consumed) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None if rest.is_empty() => return None,
            None => (rest, rest.len()),
        };

        if line == HEADER_DELIMITER {
            let body_start = (offset + consumed).min(after_open.len());
            return Some(RawHeader {
                pairs,
                body: &after_open[body_start..],
            });
        }

        if !line.trim().is_empty() {
            match split_pair(line) {
                Some(pair) => pairs.push(pair),
                None if mode == ErrorMode::Lenient => {
                    log::debug!("Skipping malformed header line: {:?}", line);
                }
                None => {
                    log::debug!("Header rejected, line is not a key/value pair: {:?}", line);
                    return None;
                }
            }
        }

        if consumed == rest.len() && !rest.ends_with('\n') {
            return None;
        }
        offset += consumed;
    }
}

/// Split a header line at its first colon.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
