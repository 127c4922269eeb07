//! Rendering options and configuration.

/// Options for plain-text rendering of posts.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Remove `==` delimiters around highlighted text
    pub strip_highlights: bool,

    /// Emit a `[image: alt]` line for each image, in layout order
    pub include_images: bool,

    /// Text placed between consecutive posts
    pub post_separator: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or strip highlight delimiters.
    pub fn with_strip_highlights(mut self, strip: bool) -> Self {
        self.strip_highlights = strip;
        self
    }

    /// Include or omit image placeholders.
    pub fn with_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Set the text placed between posts.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.post_separator = separator.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strip_highlights: true,
            include_images: false,
            post_separator: "\n\n".to_string(),
        }
    }
}
