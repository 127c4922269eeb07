//! Document-level types.

use super::{ImageReference, Post};
use crate::parser::{self, ParseOptions, PostSplitter};
use crate::render::{resolve_views, PostView};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;

/// Content shown when no document has been saved yet.
pub const WELCOME_TEXT: &str = "# Welcome to InstaPost

Create beautiful **Instagram posts** with markdown support!

## Features

- 🎨 **Rich text formatting**
- 💻 Code snippets
- 📝 Lists and more!

```js
// Example code
function hello() {
  console.log('Hello, world!');
}
```

> Create something amazing!";

/// The editable text buffer all posts are derived from.
///
/// The buffer has a single writer. Every committed edit bumps the revision;
/// posts are re-derived on demand from the latest text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    revision: u64,
}

impl Document {
    /// Create a document from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
        }
    }

    /// Create the welcome document.
    pub fn welcome() -> Self {
        Self::new(WELCOME_TEXT)
    }

    /// Create a document from imported text, normalizing it first.
    pub fn from_import(raw: &str) -> Self {
        Self::new(normalize_text(raw))
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of committed edits.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole buffer.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    /// Replace `selection` with `replacement`; returns the clamped range replaced.
    pub fn replace_range(&mut self, selection: Range<usize>, replacement: &str) -> Range<usize> {
        let range = self.clamp(selection);
        self.text.replace_range(range.clone(), replacement);
        self.revision += 1;
        range
    }

    /// Wrap the selection with `prefix` and `suffix`.
    ///
    /// An empty selection is filled with `placeholder`. Returns the cursor
    /// position after the wrapped text, before the suffix.
    pub fn wrap_selection(
        &mut self,
        selection: Range<usize>,
        prefix: &str,
        suffix: &str,
        placeholder: &str,
    ) -> usize {
        let range = self.clamp(selection);
        let selected = &self.text[range.clone()];
        let inner = if selected.is_empty() {
            placeholder.to_string()
        } else {
            selected.to_string()
        };

        let replacement = format!("{}{}{}", prefix, inner, suffix);
        let start = range.start;
        self.replace_range(range, &replacement);
        start + prefix.len() + inner.len()
    }

    /// Apply a toolbar format to the selection; returns the new cursor.
    pub fn apply_format(&mut self, selection: Range<usize>, format: Format) -> usize {
        let (prefix, suffix, placeholder) = format.markers();
        self.wrap_selection(selection, prefix, suffix, placeholder)
    }

    /// Replace the selection with an image marker on its own line.
    ///
    /// Returns the cursor position after the inserted marker.
    pub fn insert_image(&mut self, selection: Range<usize>, source: &str) -> usize {
        let marker = format!("\n{}\n", ImageReference::new("image", source).to_markdown());
        let range = self.replace_range(selection, &marker);
        range.start + marker.len()
    }

    /// Lazily split the buffer into post blocks.
    pub fn blocks(&self) -> PostSplitter<'_> {
        parser::split_posts(&self.text)
    }

    /// Number of posts in the buffer.
    pub fn post_count(&self) -> usize {
        self.blocks().count()
    }

    /// Parse all posts with default options.
    pub fn posts(&self) -> Vec<Post> {
        parser::parse_posts(&self.text)
    }

    /// Parse all posts.
    pub fn posts_with_options(&self, options: &ParseOptions) -> Vec<Post> {
        parser::parse_posts_with_options(&self.text, options)
    }

    /// Parse the post at `index` with default options.
    pub fn post(&self, index: usize) -> Option<Post> {
        self.post_with_options(index, &ParseOptions::default())
    }

    /// Parse the post at `index`.
    pub fn post_with_options(&self, index: usize, options: &ParseOptions) -> Option<Post> {
        self.blocks()
            .nth(index)
            .map(|block| parser::parse_post_with_options(index, block, options))
    }

    /// Resolve every post into a render-ready view.
    pub fn views(&self, options: &ParseOptions) -> Vec<PostView> {
        resolve_views(&self.posts_with_options(options), options)
    }

    /// Sources of every image referenced by any post.
    pub fn image_sources(&self) -> Vec<String> {
        self.posts()
            .iter()
            .flat_map(|post| parser::image_references(&post.body))
            .map(|image| image.source)
            .collect()
    }

    fn clamp(&self, selection: Range<usize>) -> Range<usize> {
        let end = floor_char_boundary(&self.text, selection.end.min(self.text.len()));
        let start = floor_char_boundary(&self.text, selection.start.min(end));
        start..end
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::welcome()
    }
}

/// Toolbar formatting presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `**bold**`
    Bold,
    /// `*italic*`
    Italic,
    /// `==highlight==`
    Highlight,
    /// Numbered list
    List,
    /// Fenced code block
    Code,
}

impl Format {
    /// Prefix, suffix and placeholder text for this format.
    pub fn markers(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Format::Bold => ("**", "**", "bold text"),
            Format::Italic => ("*", "*", "italic text"),
            Format::Highlight => ("==", "==", "highlight"),
            Format::List => ("1. ", "\n2. Second item", "First item"),
            Format::Code => ("```\n", "\n```", "code"),
        }
    }
}

/// Normalize imported text: strip a BOM, convert CRLF/CR to LF, apply NFC.
pub fn normalize_text(raw: &str) -> String {
    let without_bom = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let unified = without_bom.replace("\r\n", "\n").replace('\r', "\n");
    unified.nfc().collect()
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
