//! Export options and capture planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::Frame;
use crate::model::Color;
use crate::render::PostView;

/// Default prefix of exported file names.
pub const DEFAULT_FILE_PREFIX: &str = "instagram-post";

/// Options for exporting posts as images.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// File name prefix
    pub file_prefix: String,

    /// Logical frame captured for each post
    pub frame: Frame,

    /// Device pixels per logical pixel
    pub pixel_ratio: f32,

    /// Timestamp embedded in file names (current time when unset)
    pub timestamp: Option<String>,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Set the pixel ratio.
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio.max(0.1);
        self
    }

    /// Set the logical frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Pin the timestamp used in file names.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            frame: Frame::default(),
            pixel_ratio: 2.0,
            timestamp: None,
        }
    }
}

/// Which posts to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// Every post in document order
    #[default]
    All,
    /// Only the post at this index
    Current(usize),
}

/// What the rasterizer is asked to capture for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    /// Zero-based post index
    pub index: usize,

    /// File name for the captured image
    pub file_name: String,

    /// Logical width
    pub width: u32,

    /// Logical height
    pub height: u32,

    /// Device pixels per logical pixel
    pub pixel_ratio: f32,

    /// Background colour, from the post's theme
    pub background: Color,
}

impl CaptureRequest {
    /// Output width in device pixels.
    pub fn pixel_width(&self) -> u32 {
        (self.width as f32 * self.pixel_ratio).round() as u32
    }

    /// Output height in device pixels.
    pub fn pixel_height(&self) -> u32 {
        (self.height as f32 * self.pixel_ratio).round() as u32
    }
}

/// Ordered capture requests for one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlan {
    /// Requests in export order
    pub requests: Vec<CaptureRequest>,
}

impl ExportPlan {
    /// Plan captures for `views`.
    ///
    /// File names carry a 1-based post number only when the document has
    /// more than one post.
    pub fn new(views: &[PostView], scope: ExportScope, options: &ExportOptions) -> Result<Self> {
        let indices = match scope {
            ExportScope::All => 0..views.len(),
            ExportScope::Current(index) if index < views.len() => index..index + 1,
            ExportScope::Current(index) => {
                return Err(Error::PostOutOfRange(index, views.len()));
            }
        };

        let timestamp = options
            .timestamp
            .clone()
            .unwrap_or_else(|| export_timestamp(Utc::now()));
        let numbered = views.len() > 1;

        let requests = views[indices]
            .iter()
            .map(|view| CaptureRequest {
                index: view.index,
                file_name: image_file_name(&options.file_prefix, &timestamp, view.index, numbered),
                width: options.frame.width.round() as u32,
                height: options.frame.height.round() as u32,
                pixel_ratio: options.pixel_ratio,
                background: view.background(),
            })
            .collect();

        Ok(Self { requests })
    }

    /// Number of planned captures.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether nothing will be captured.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Timestamp used in exported file names (`2024-05-01T09-30-00`).
pub fn export_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// File name of an exported post image.
pub fn image_file_name(prefix: &str, timestamp: &str, index: usize, numbered: bool) -> String {
    if numbered {
        format!("{}-{}-{}.png", prefix, timestamp, index + 1)
    } else {
        format!("{}-{}.png", prefix, timestamp)
    }
}

/// File name of an exported markdown document.
pub fn markdown_file_name(prefix: &str, timestamp: &str) -> String {
    format!("{}-{}.md", prefix, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_posts;
    use crate::render::resolve_views;
    use crate::ParseOptions;
    use chrono::TimeZone;

    fn views(text: &str) -> Vec<PostView> {
        resolve_views(&parse_posts(text), &ParseOptions::default())
    }

    #[test]
    fn test_export_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 7).unwrap();
        assert_eq!(export_timestamp(now), "2024-05-01T09-30-07");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            image_file_name("instagram-post", "T", 0, false),
            "instagram-post-T.png"
        );
        assert_eq!(
            image_file_name("instagram-post", "T", 2, true),
            "instagram-post-T-3.png"
        );
        assert_eq!(markdown_file_name("p", "T"), "p-T.md");
    }

    #[test]
    fn test_plan_all() {
        let views = views("one\n===\n---\ntheme: sunset\n---\ntwo");
        let options = ExportOptions::new().with_timestamp("TS");
        let plan = ExportPlan::new(&views, ExportScope::All, &options).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.requests[0].file_name, "instagram-post-TS-1.png");
        assert_eq!(plan.requests[1].file_name, "instagram-post-TS-2.png");
        assert_eq!(plan.requests[1].background.to_hex(), "#2d1b1b");
        assert_eq!(plan.requests[0].pixel_width(), 1000);
        assert_eq!(plan.requests[0].pixel_height(), 1000);
    }

    #[test]
    fn test_plan_current_single_post_document() {
        let views = views("only");
        let options = ExportOptions::new().with_timestamp("TS");
        let plan = ExportPlan::new(&views, ExportScope::Current(0), &options).unwrap();
        assert_eq!(plan.requests[0].file_name, "instagram-post-TS.png");
    }

    #[test]
    fn test_plan_current_out_of_range() {
        let views = views("only");
        let result = ExportPlan::new(&views, ExportScope::Current(3), &ExportOptions::new());
        assert!(matches!(result, Err(Error::PostOutOfRange(3, 1))));
    }

    #[test]
    fn test_plan_empty_document() {
        let plan = ExportPlan::new(&[], ExportScope::All, &ExportOptions::new()).unwrap();
        assert!(plan.is_empty());
    }
}
