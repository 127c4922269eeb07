//! Frame layout resolution.
//!
//! Maps a post's `imagePosition` and `verticalAlign` metadata to a
//! renderer-agnostic [`LayoutDescriptor`]. Resolution is a pure, total
//! function: unrecognized values fall back to `top` for both inputs.

use serde::{Deserialize, Serialize};

/// Where the image region sits relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    /// Above the text
    #[default]
    Top,
    /// Below the text
    Bottom,
    /// Left of the text
    Left,
    /// Right of the text
    Right,
}

impl ImagePosition {
    /// All positions.
    pub const ALL: [ImagePosition; 4] = [
        ImagePosition::Top,
        ImagePosition::Bottom,
        ImagePosition::Left,
        ImagePosition::Right,
    ];

    /// Parse a metadata value (trimmed, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|position| position.name().eq_ignore_ascii_case(value))
    }

    /// Parse a metadata value, falling back to [`ImagePosition::Top`].
    pub fn from_metadata(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            log::debug!("Unknown image position {:?}, using top", value);
            Self::default()
        })
    }

    /// Value as written in metadata headers.
    pub fn name(&self) -> &'static str {
        match self {
            ImagePosition::Top => "top",
            ImagePosition::Bottom => "bottom",
            ImagePosition::Left => "left",
            ImagePosition::Right => "right",
        }
    }

    /// Whether images sit beside the text.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ImagePosition::Left | ImagePosition::Right)
    }

    /// Whether the image region comes before the text region.
    pub fn is_leading(&self) -> bool {
        matches!(self, ImagePosition::Top | ImagePosition::Left)
    }
}

/// Vertical alignment of the text block when it does not fill its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Pack text at the top
    #[default]
    Top,
    /// Center text
    Middle,
    /// Pack text at the bottom
    Bottom,
}

impl VerticalAlign {
    /// All alignments.
    pub const ALL: [VerticalAlign; 3] = [
        VerticalAlign::Top,
        VerticalAlign::Middle,
        VerticalAlign::Bottom,
    ];

    /// Parse a metadata value (trimmed, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|align| align.name().eq_ignore_ascii_case(value))
    }

    /// Parse a metadata value, falling back to [`VerticalAlign::Top`].
    pub fn from_metadata(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            log::debug!("Unknown vertical alignment {:?}, using top", value);
            Self::default()
        })
    }

    /// Value as written in metadata headers.
    pub fn name(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }

    /// Main-axis alignment of the text block.
    pub fn text_alignment(&self) -> TextAlignment {
        match self {
            VerticalAlign::Top => TextAlignment::Start,
            VerticalAlign::Middle => TextAlignment::Center,
            VerticalAlign::Bottom => TextAlignment::End,
        }
    }
}

/// Direction the image and text regions flow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Side by side
    Row,
    /// Stacked
    Column,
}

/// Alignment of the text block inside its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Flush with the region start
    Start,
    /// Centered
    Center,
    /// Flush with the region end
    End,
}

/// A region of the frame, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// The stacked images
    Image,
    /// The prose
    Text,
}

/// Share of the frame's cross axis taken by the image region, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageShare {
    /// Preferred width
    pub target_percent: u8,
    /// Upper bound on width
    pub max_percent: u8,
}

impl ImageShare {
    /// Bounded share used when images sit beside the text.
    pub const SIDE: ImageShare = ImageShare {
        target_percent: 40,
        max_percent: 45,
    };

    /// Full width, used when images are stacked with the text.
    pub const FULL: ImageShare = ImageShare {
        target_percent: 100,
        max_percent: 100,
    };

    /// Whether the image region spans the whole width.
    pub fn is_full_width(&self) -> bool {
        self.target_percent == 100
    }
}

/// The square frame a post is drawn in, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame width
    pub width: f32,
    /// Frame height
    pub height: f32,
    /// Inner padding on every side
    pub padding: f32,
}

impl Frame {
    /// Square frame with the given side and padding.
    pub fn square(side: f32, padding: f32) -> Self {
        Self {
            width: side,
            height: side,
            padding,
        }
    }

    /// Width available to content.
    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    /// Height available to content.
    pub fn content_height(&self) -> f32 {
        (self.height - 2.0 * self.padding).max(0.0)
    }
}

impl Default for Frame {
    /// 500×500 with 2rem padding.
    fn default() -> Self {
        Self::square(500.0, 2.0 * REM_PX)
    }
}

/// Logical pixels per rem.
pub const REM_PX: f32 = 16.0;

/// Resolved arrangement of a post's frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    /// Image placement the layout was resolved from
    pub image_position: ImagePosition,

    /// Row for left/right images, column otherwise
    pub flow_direction: FlowDirection,

    /// Width share of the image region
    pub image_share: ImageShare,

    /// Requested vertical alignment
    pub vertical_alignment: VerticalAlign,

    /// Alignment of the text block inside its region
    pub text_alignment: TextAlignment,

    /// Gap between regions, in rem
    pub gap_rem: f32,

    /// Whether the image region scrolls vertically
    pub image_scrolls: bool,
}

impl LayoutDescriptor {
    /// Resolve from typed inputs.
    pub fn new(image_position: ImagePosition, vertical_alignment: VerticalAlign) -> Self {
        let horizontal = image_position.is_horizontal();
        Self {
            image_position,
            flow_direction: if horizontal {
                FlowDirection::Row
            } else {
                FlowDirection::Column
            },
            image_share: if horizontal {
                ImageShare::SIDE
            } else {
                ImageShare::FULL
            },
            vertical_alignment,
            text_alignment: vertical_alignment.text_alignment(),
            gap_rem: if horizontal { 1.5 } else { 0.5 },
            image_scrolls: horizontal,
        }
    }

    /// Whether the image region is emitted before the text region.
    pub fn image_first(&self) -> bool {
        self.image_position.is_leading()
    }

    /// Regions in the order the renderer must emit them.
    pub fn regions(&self) -> [Region; 2] {
        if self.image_first() {
            [Region::Image, Region::Text]
        } else {
            [Region::Text, Region::Image]
        }
    }

    /// Target width of the image region inside `frame`.
    pub fn image_region_width(&self, frame: &Frame) -> f32 {
        frame.content_width() * f32::from(self.image_share.target_percent) / 100.0
    }

    /// Maximum width of the image region inside `frame`.
    pub fn image_region_max_width(&self, frame: &Frame) -> f32 {
        frame.content_width() * f32::from(self.image_share.max_percent) / 100.0
    }
}

impl Default for LayoutDescriptor {
    fn default() -> Self {
        Self::new(ImagePosition::default(), VerticalAlign::default())
    }
}

/// Resolve a layout from raw metadata values.
///
/// # Example
///
/// ```
/// use textpost::layout::{resolve_layout, FlowDirection, Region};
///
/// let layout = resolve_layout("left", "middle");
/// assert_eq!(layout.flow_direction, FlowDirection::Row);
/// assert_eq!(layout.regions(), [Region::Image, Region::Text]);
/// assert_eq!(resolve_layout("diagonal", "top"), resolve_layout("top", "top"));
/// ```
pub fn resolve_layout(image_position: &str, vertical_align: &str) -> LayoutDescriptor {
    LayoutDescriptor::new(
        ImagePosition::from_metadata(image_position),
        VerticalAlign::from_metadata(vertical_align),
    )
}
