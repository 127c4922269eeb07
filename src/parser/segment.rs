//! Extraction of embedded image markers from post bodies.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::ImageReference;

/// `![alt](source)` with alt text free of `]` and a non-empty source free of `)`.
static IMAGE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// A post body split into its images and the remaining prose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segmented {
    /// Images in order of appearance
    pub images: Vec<ImageReference>,

    /// Body with every image marker removed
    pub stripped_body: String,
}

impl Segmented {
    /// Whether the body contained any images.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Extract all image markers from `body`.
///
/// Each marker is spliced out exactly; surrounding whitespace is left in
/// place. Markers are removed leftmost first, one at a time, so a marker
/// that only forms once an earlier one has been removed is extracted in
/// position order, and running this again on `stripped_body` never finds
/// more images.
///
/// # Example
///
/// ```
/// use textpost::parser::segment;
///
/// let result = segment("![a](blob:1)\nText here\n![b](blob:2)");
/// assert_eq!(result.images.len(), 2);
/// assert_eq!(result.stripped_body, "\nText here\n");
/// ```
pub fn segment(body: &str) -> Segmented {
    let mut images = Vec::new();
    let mut current = body.to_string();

    loop {
        let Some((range, image)) = IMAGE_MARKER_RE.captures(&current).and_then(|caps| {
            let (whole, alt, source) = (caps.get(0)?, caps.get(1)?, caps.get(2)?);
            Some((
                whole.range(),
                ImageReference::new(alt.as_str(), source.as_str()),
            ))
        }) else {
            break;
        };

        images.push(image);
        // A splice can complete a marker that starts earlier, so rescan from the start.
        current.replace_range(range, "");
    }

    Segmented {
        images,
        stripped_body: current,
    }
}

/// Image references in `body`, in the order [`segment`] extracts them.
pub fn image_references(body: &str) -> Vec<ImageReference> {
    segment(body).images
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_order() {
        let result = segment("![a](blob:1)\nText here\n![b](blob:2)");
        assert_eq!(
            result.images,
            vec![
                ImageReference::new("a", "blob:1"),
                ImageReference::new("b", "blob:2"),
            ]
        );
        assert_eq!(result.stripped_body, "\nText here\n");
    }

    #[test]
    fn test_no_images() {
        let result = segment("plain *markdown* text");
        assert!(!result.has_images());
        assert_eq!(result.stripped_body, "plain *markdown* text");
    }

    #[test]
    fn test_empty_alt_text() {
        let result = segment("before ![](photo.png) after");
        assert_eq!(result.images, vec![ImageReference::new("", "photo.png")]);
        assert_eq!(result.stripped_body, "before  after");
    }

    #[test]
    fn test_missing_closing_paren_left_untouched() {
        let body = "look ![a](blob:1 and more";
        let result = segment(body);
        assert!(result.images.is_empty());
        assert_eq!(result.stripped_body, body);
    }

    #[test]
    fn test_empty_source_not_a_marker() {
        let body = "![a]() text";
        let result = segment(body);
        assert!(result.images.is_empty());
        assert_eq!(result.stripped_body, body);
    }

    #[test]
    fn test_source_stops_at_first_paren() {
        let result = segment("![a](x(1)).");
        assert_eq!(result.images, vec![ImageReference::new("a", "x(1")]);
        assert_eq!(result.stripped_body, ").");
    }

    #[test]
    fn test_links_are_not_images() {
        let body = "[link](https://example.com)";
        assert_eq!(segment(body).stripped_body, body);
    }

    #[test]
    fn test_data_uri_source() {
        let result = segment("![img](data:image/png;base64,iVBORw0KGgo=)");
        assert_eq!(result.images[0].source, "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(result.stripped_body, "");
    }

    #[test]
    fn test_idempotent() {
        let first = segment("intro ![a](1) middle ![b](2) end");
        let second = segment(&first.stripped_body);
        assert!(second.images.is_empty());
        assert_eq!(second.stripped_body, first.stripped_body);
    }

    #[test]
    fn test_marker_formed_by_splice_is_extracted() {
        let result = segment("!![a](x)[b](y)");
        assert_eq!(
            result.images,
            vec![ImageReference::new("a", "x"), ImageReference::new("b", "y")]
        );
        assert_eq!(result.stripped_body, "");
        assert!(segment(&result.stripped_body).images.is_empty());
    }

    #[test]
    fn test_spliced_marker_keeps_position_order() {
        let result = segment("!![a](1)[b](2) ![c](3)");
        let alts: Vec<_> = result.images.iter().map(|i| i.alt_text.as_str()).collect();
        assert_eq!(alts, vec!["a", "b", "c"]);
        assert_eq!(result.stripped_body, " ");
    }

    #[test]
    fn test_splice_completes_marker_opened_earlier() {
        let result = segment("![x]![a](1)(y)");
        assert_eq!(
            result.images,
            vec![ImageReference::new("a", "1"), ImageReference::new("x", "y")]
        );
        assert_eq!(result.stripped_body, "");
        assert!(segment(&result.stripped_body).images.is_empty());
    }
}
