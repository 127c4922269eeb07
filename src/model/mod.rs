//! Content model for documents and posts.
//!
//! A [`Document`] is the single editable buffer. [`Post`]s are derived from
//! it on every parse and never edited directly. Images added during editing
//! are owned by an [`ImageStore`] scoped to the document's session.

mod document;
mod image;
mod post;
mod theme;

pub use document::{normalize_text, Document, Format, WELCOME_TEXT};
pub use image::{
    ImageReference, ImageResource, ImageSource, ImageStore, BLOB_PREFIX, FALLBACK_ALT_TEXT,
};
pub use post::{
    Post, PostMetadata, DEFAULT_IMAGE_POSITION, DEFAULT_THEME, DEFAULT_VERTICAL_ALIGN,
    IMAGE_POSITION_KEY, THEME_KEY, VERTICAL_ALIGN_KEY,
};
pub use theme::{Color, Palette, Theme};
