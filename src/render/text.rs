//! Plain text rendering for resolved posts.

use crate::error::Result;

use super::{FrameElement, PostView, RenderOptions};

/// Convert resolved posts to plain text.
pub fn to_text(views: &[PostView], options: &RenderOptions) -> Result<String> {
    let output = views
        .iter()
        .map(|view| render_view(view, options))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(&options.post_separator);

    Ok(output)
}

fn render_view(view: &PostView, options: &RenderOptions) -> String {
    let mut parts = Vec::new();

    for element in view.elements() {
        match element {
            FrameElement::Images(images) => {
                if options.include_images {
                    parts.extend(
                        images
                            .iter()
                            .map(|image| format!("[image: {}]", image.display_alt())),
                    );
                }
            }
            FrameElement::Text(_) => {
                let text = if options.strip_highlights {
                    crate::parser::strip_highlights(&view.text)
                } else {
                    view.text.clone()
                };
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text.to_string());
                }
            }
        }
    }

    parts.join("\n")
}
