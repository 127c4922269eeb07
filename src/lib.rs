//! # textpost
//!
//! Core of a markdown editor for composing social media post carousels.
//!
//! A single text buffer is split into posts on `===` lines. Each post may
//! start with a `---` metadata header (theme, image position, vertical
//! alignment), carries inline `![alt](source)` images and `==highlight==`
//! markers, and resolves into a render-ready view with a concrete layout.
//!
//! ## Quick Start
//!
//! ```
//! use textpost::{parse_document, ImagePosition};
//!
//! let views = parse_document("---\nimagePosition: left\n---\n![cat](cat.png)\nHello ==world==");
//! assert_eq!(views.len(), 1);
//! assert_eq!(views[0].layout.image_position, ImagePosition::Left);
//! assert_eq!(views[0].images[0].alt_text, "cat");
//! assert_eq!(views[0].highlights.len(), 1);
//! ```
//!
//! ## Features
//!
//! - **Total parsing**: malformed input degrades to literal text, never errors
//! - **Typed metadata**: known keys with defaults plus an extension map
//! - **Layout resolution**: flow direction, image share and alignment per post
//! - **Export planning**: an explicit state machine for capturing posts
//! - **Parallel processing**: Uses Rayon for documents with many posts
//! - **Import**: BOM stripping, newline and Unicode NFC normalization

pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    export_posts, CaptureRequest, ExportOptions, ExportPlan, ExportScope, ExportSession,
    ExportState, ExportedImage, Rasterizer, RenderSurface,
};
pub use layout::{
    resolve_layout, FlowDirection, Frame, ImagePosition, ImageShare, LayoutDescriptor, Region,
    TextAlignment, VerticalAlign,
};
pub use model::{
    Color, Document, Format, ImageReference, ImageResource, ImageSource, ImageStore, Palette,
    Post, PostMetadata, Theme,
};
pub use parser::{ErrorMode, Fragment, HighlightSpan, OwnedFragment, ParseOptions, Segmented};
pub use render::{FrameElement, JsonFormat, PostView, RenderOptions};
pub use storage::{import_markdown, DocumentStore, FileStore, MemoryStore};

use std::path::Path;

/// Parse document text into render-ready post views.
///
/// # Example
///
/// ```
/// use textpost::parse_document;
///
/// let views = parse_document("First\n===\nSecond");
/// assert_eq!(views.len(), 2);
/// assert_eq!(views[1].text, "Second");
/// ```
pub fn parse_document(text: &str) -> Vec<PostView> {
    parse_document_with_options(text, &ParseOptions::default())
}

/// Parse document text into post views with custom options.
///
/// # Example
///
/// ```
/// use textpost::{parse_document_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().sequential();
/// let views = parse_document_with_options("---\ntheme: dark\nnot a pair\n---\nHi", &options);
/// assert_eq!(views[0].metadata.theme, "dark");
/// ```
pub fn parse_document_with_options(text: &str, options: &ParseOptions) -> Vec<PostView> {
    let posts = parser::parse_posts_with_options(text, options);
    render::resolve_views(&posts, options)
}

/// Import a markdown file and parse it into post views.
///
/// # Example
///
/// ```no_run
/// use textpost::parse_file;
///
/// let views = parse_file("posts.md")?;
/// println!("Posts: {}", views.len());
/// # Ok::<(), textpost::Error>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<PostView>> {
    let document = import_markdown(path)?;
    Ok(document.views(&ParseOptions::default()))
}

/// Convert document text to JSON.
///
/// # Example
///
/// ```
/// use textpost::{to_json, JsonFormat};
///
/// let json = to_json("Hello ==world==", JsonFormat::Compact)?;
/// assert!(json.contains("\"highlighted\""));
/// # Ok::<(), textpost::Error>(())
/// ```
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&parse_document(text), format)
}

/// Convert document text to plain text.
///
/// # Example
///
/// ```
/// use textpost::{to_text, RenderOptions};
///
/// let text = to_text("Hello ==world==\n===\nBye", &RenderOptions::default())?;
/// assert_eq!(text, "Hello world\n\nBye");
/// # Ok::<(), textpost::Error>(())
/// ```
pub fn to_text(text: &str, options: &RenderOptions) -> Result<String> {
    render::to_text(&parse_document(text), options)
}

/// Builder for parsing and converting post documents.
///
/// # Example
///
/// ```
/// use textpost::Textpost;
///
/// let text = Textpost::new()
///     .lenient()
///     .with_images(true)
///     .parse("![cover](c.png)\nCaption")
///     .to_text()?;
/// assert_eq!(text, "[image: cover]\nCaption");
/// # Ok::<(), textpost::Error>(())
/// ```
pub struct Textpost {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Textpost {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient header parsing.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel view resolution.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Include image placeholders in text output.
    pub fn with_images(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_images(include);
        self
    }

    /// Keep `==` delimiters in text output.
    pub fn keep_highlights(mut self) -> Self {
        self.render_options = self.render_options.with_strip_highlights(false);
        self
    }

    /// Set the text placed between posts in text output.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_separator(separator);
        self
    }

    /// Parse document text.
    pub fn parse(self, text: &str) -> TextpostResult {
        self.parse_document(Document::new(text))
    }

    /// Import and parse a markdown file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<TextpostResult> {
        let document = import_markdown(path)?;
        Ok(self.parse_document(document))
    }

    /// Parse an existing document.
    pub fn parse_document(self, document: Document) -> TextpostResult {
        let views = document.views(&self.parse_options);
        TextpostResult {
            document,
            views,
            render_options: self.render_options,
        }
    }
}

impl Default for Textpost {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a post document.
pub struct TextpostResult {
    /// The parsed document
    pub document: Document,
    /// Resolved views, one per post
    pub views: Vec<PostView>,
    /// Render options to use
    render_options: RenderOptions,
}

impl TextpostResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.views, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.views, format)
    }

    /// Plan an image export of these posts.
    pub fn export_plan(&self, scope: ExportScope, options: &ExportOptions) -> Result<ExportPlan> {
        ExportPlan::new(&self.views, scope, options)
    }

    /// Number of posts.
    pub fn post_count(&self) -> usize {
        self.views.len()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
