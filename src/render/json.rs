//! JSON rendering for resolved posts.

use crate::error::{Error, Result};

use super::PostView;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert resolved posts to JSON.
pub fn to_json(views: &[PostView], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(views),
        JsonFormat::Compact => serde_json::to_string(views),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_post;

    #[test]
    fn test_to_json_pretty() {
        let view = PostView::from_post(&parse_post(0, "---\ntheme: dark\n---\nHello ==you=="));

        let json = to_json(&[view], JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"theme\": \"dark\""));
        assert!(json.contains("\"background\": \"#0d0d0d\""));
        assert!(json.contains("\"highlighted\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let view = PostView::from_post(&parse_post(0, "![a](b.png)"));

        let json = to_json(&[view], JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["images"][0]["altText"], "a");
        assert_eq!(value[0]["layout"]["flowDirection"], "column");
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let view = PostView::from_post(&parse_post(0, "---\nimagePosition: left\n---\nText"));

        let json = to_json(&[view], JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["metadata"]["imagePosition"], "left");
        assert_eq!(value[0]["metadata"]["verticalAlign"], "top");
        assert_eq!(value[0]["layout"]["imageShare"]["targetPercent"], 40);
        assert_eq!(value[0]["layout"]["verticalAlignment"], "top");
        assert!(value[0]["layout"]["imageScrolls"].is_boolean());
        assert!(!json.contains('_'));
    }
}
