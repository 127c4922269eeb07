//! Named colour themes for post frames.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a colour from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid colour '{}'", s)))
    }
}

/// Colours used to draw one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Frame background, also the export background
    pub background: Color,
    /// Body text
    pub text: Color,
    /// Accent for highlights
    pub accent: Color,
}

impl Palette {
    /// Background of highlighted text.
    pub fn highlight_background(&self) -> Color {
        self.accent
    }

    /// Foreground of highlighted text.
    pub fn highlight_text(&self) -> Color {
        self.background
    }
}

/// Built-in post theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Navy with teal accent
    #[default]
    Default,
    /// Near-black with cyan accent
    Dark,
    /// Light grey with blue accent
    Light,
    /// Deep green with mint accent
    Forest,
    /// Dark brown with orange accent
    Sunset,
}

impl Theme {
    /// All built-in themes.
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Dark,
        Theme::Light,
        Theme::Forest,
        Theme::Sunset,
    ];

    /// Look up a theme by name, falling back to [`Theme::Default`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    /// Look up a theme by name (trimmed, case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name))
    }

    /// Theme name as written in metadata headers.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Forest => "forest",
            Theme::Sunset => "sunset",
        }
    }

    /// Colours for this theme.
    pub fn palette(&self) -> Palette {
        let (background, text, accent) = match self {
            Theme::Default => (
                Color::rgb(0x0a, 0x19, 0x2f),
                Color::rgb(0xcc, 0xd6, 0xf6),
                Color::rgb(0x64, 0xff, 0xda),
            ),
            Theme::Dark => (
                Color::rgb(0x0d, 0x0d, 0x0d),
                Color::rgb(0xe0, 0xe0, 0xe0),
                Color::rgb(0x00, 0xd9, 0xff),
            ),
            Theme::Light => (
                Color::rgb(0xf5, 0xf5, 0xf5),
                Color::rgb(0x1a, 0x1a, 0x1a),
                Color::rgb(0x00, 0x66, 0xcc),
            ),
            Theme::Forest => (
                Color::rgb(0x1a, 0x3a, 0x2a),
                Color::rgb(0xe8, 0xf4, 0xf0),
                Color::rgb(0x4a, 0xde, 0x80),
            ),
            Theme::Sunset => (
                Color::rgb(0x2d, 0x1b, 0x1b),
                Color::rgb(0xf5, 0xe6, 0xd3),
                Color::rgb(0xff, 0x9d, 0x5c),
            ),
        };
        Palette {
            background,
            text,
            accent,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#0a192f"), Some(Color::rgb(10, 25, 47)));
        assert_eq!(Color::from_hex("fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::rgb(100, 255, 218).to_hex(), "#64ffda");
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(Theme::from_name("dark"), Theme::Dark);
        assert_eq!(Theme::from_name(" Forest "), Theme::Forest);
        assert_eq!(Theme::from_name("neon"), Theme::Default);
        assert_eq!(Theme::parse("neon"), None);
    }

    #[test]
    fn test_palettes() {
        assert_eq!(Theme::Default.palette().background.to_hex(), "#0a192f");
        assert_eq!(Theme::Dark.palette().accent.to_hex(), "#00d9ff");
        assert_eq!(Theme::Light.palette().text.to_hex(), "#1a1a1a");
        assert_eq!(Theme::Sunset.palette().accent.to_hex(), "#ff9d5c");
    }

    #[test]
    fn test_highlight_colors_swap() {
        let palette = Theme::Forest.palette();
        assert_eq!(palette.highlight_background(), palette.accent);
        assert_eq!(palette.highlight_text(), palette.background);
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::rgb(0xf5, 0xe6, 0xd3)).unwrap();
        assert_eq!(json, "\"#f5e6d3\"");
        let color: Color = serde_json::from_str("\"#4ade80\"").unwrap();
        assert_eq!(color, Color::rgb(0x4a, 0xde, 0x80));
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
