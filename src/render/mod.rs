//! Rendering module: resolved post views and output formats.

mod json;
mod options;
mod text;
mod view;

pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use text::to_text;
pub use view::{resolve_views, FrameElement, PostView, PARALLEL_THRESHOLD, PLACEHOLDER_TEXT};
