//! Post-level types.

use super::Theme;
use crate::layout::{resolve_layout, LayoutDescriptor};
use crate::parser::{segment, Segmented, HEADER_DELIMITER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header key selecting the colour theme.
pub const THEME_KEY: &str = "theme";
/// Header key selecting where images are placed.
pub const IMAGE_POSITION_KEY: &str = "imagePosition";
/// Header key selecting vertical alignment of the text block.
pub const VERTICAL_ALIGN_KEY: &str = "verticalAlign";

/// Theme used when a post does not name one.
pub const DEFAULT_THEME: &str = "default";
/// Image position used when a post does not name one.
pub const DEFAULT_IMAGE_POSITION: &str = "top";
/// Vertical alignment used when a post does not name one.
pub const DEFAULT_VERTICAL_ALIGN: &str = "top";

/// One renderable post parsed from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Zero-based position in the document
    pub index: usize,

    /// Metadata merged over defaults
    pub metadata: PostMetadata,

    /// Body text, image markers still embedded
    pub body: String,

    /// Whether a metadata header was detected
    pub has_header: bool,
}

impl Post {
    /// Create a post without a header.
    pub fn new(index: usize, metadata: PostMetadata, body: impl Into<String>) -> Self {
        Self {
            index,
            metadata,
            body: body.into(),
            has_header: false,
        }
    }

    /// Mark whether the post had a metadata header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Split the body into images and prose.
    pub fn segment(&self) -> Segmented {
        segment(&self.body)
    }

    /// Resolve the frame layout from this post's metadata.
    pub fn layout(&self) -> LayoutDescriptor {
        self.metadata.layout()
    }

    /// Resolved colour theme.
    pub fn theme(&self) -> Theme {
        self.metadata.resolved_theme()
    }

    /// Whether the body is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Post metadata: the recognized keys plus any extra keys from the header.
///
/// Recognized fields hold the value exactly as written (trimmed); they are
/// always populated, falling back to the defaults. Interpretation of the
/// values (theme lookup, layout) happens later and is total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    /// Theme name (`theme`)
    pub theme: String,

    /// Image placement (`imagePosition`)
    pub image_position: String,

    /// Vertical alignment of the text block (`verticalAlign`)
    pub vertical_align: String,

    /// Unrecognized header keys, in key order
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl PostMetadata {
    /// Build metadata from header pairs merged over the defaults.
    ///
    /// Later pairs override earlier ones. An empty value for a recognized
    /// key leaves the default in place.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut metadata = Self::default();
        for (key, value) in pairs {
            metadata.set(key, value);
        }
        metadata
    }

    /// Set one key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let slot = match key.as_str() {
            THEME_KEY => &mut self.theme,
            IMAGE_POSITION_KEY => &mut self.image_position,
            VERTICAL_ALIGN_KEY => &mut self.vertical_align,
            _ => {
                self.extra.insert(key, value);
                return;
            }
        };
        if !value.is_empty() {
            *slot = value;
        }
    }

    /// Look up any key by its header name.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            THEME_KEY => Some(&self.theme),
            IMAGE_POSITION_KEY => Some(&self.image_position),
            VERTICAL_ALIGN_KEY => Some(&self.vertical_align),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// All keys as a flat map, recognized keys included.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.extra.clone();
        map.insert(THEME_KEY.to_string(), self.theme.clone());
        map.insert(IMAGE_POSITION_KEY.to_string(), self.image_position.clone());
        map.insert(VERTICAL_ALIGN_KEY.to_string(), self.vertical_align.clone());
        map
    }

    /// Theme resolved against the built-in palettes.
    pub fn resolved_theme(&self) -> Theme {
        Theme::from_name(&self.theme)
    }

    /// Layout resolved from image position and vertical alignment.
    pub fn layout(&self) -> LayoutDescriptor {
        resolve_layout(&self.image_position, &self.vertical_align)
    }

    /// Render as a delimited header block, recognized keys first.
    pub fn to_header(&self) -> String {
        let mut lines = vec![HEADER_DELIMITER.to_string()];
        lines.push(format!("{}: {}", THEME_KEY, self.theme));
        lines.push(format!("{}: {}", IMAGE_POSITION_KEY, self.image_position));
        lines.push(format!("{}: {}", VERTICAL_ALIGN_KEY, self.vertical_align));
        for (key, value) in &self.extra {
            lines.push(format!("{}: {}", key, value));
        }
        lines.push(HEADER_DELIMITER.to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}

impl Default for PostMetadata {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            image_position: DEFAULT_IMAGE_POSITION.to_string(),
            vertical_align: DEFAULT_VERTICAL_ALIGN.to_string(),
            extra: BTreeMap::new(),
        }
    }
}
