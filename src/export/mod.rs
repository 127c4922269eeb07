//! Export of posts as images.
//!
//! Exporting several posts means showing each one on the render surface,
//! waiting until it has been drawn, and capturing it. [`ExportSession`]
//! makes that sequence an explicit state machine:
//!
//! ```text
//! Idle → RenderingPost(i) → Captured(i) → RenderingPost(i + 1) → … → Done
//! ```
//!
//! Progress is driven by the render surface's completion signal rather than
//! by timers. Rasterization itself is delegated to a [`Rasterizer`].
//!
//! # Example
//!
//! ```
//! use textpost::export::{export_posts, CaptureRequest, ExportOptions, ExportScope, Rasterizer, RenderSurface};
//! use textpost::render::PostView;
//! use textpost::{Document, ParseOptions};
//!
//! struct Surface;
//! impl RenderSurface for Surface {
//!     fn present(&mut self, _view: &PostView) -> textpost::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct Blank;
//! impl Rasterizer for Blank {
//!     fn rasterize(&mut self, request: &CaptureRequest) -> textpost::Result<Vec<u8>> {
//!         Ok(vec![0; (request.pixel_width() * request.pixel_height()) as usize])
//!     }
//! }
//!
//! let doc = Document::new("one\n===\ntwo");
//! let views = doc.views(&ParseOptions::default());
//! let options = ExportOptions::new().with_timestamp("2024-01-01T00-00-00");
//! let images = export_posts(&views, ExportScope::All, &options, &mut Surface, &mut Blank)?;
//! assert_eq!(images[1].file_name, "instagram-post-2024-01-01T00-00-00-2.png");
//! # Ok::<(), textpost::Error>(())
//! ```

mod options;

pub use options::{
    export_timestamp, image_file_name, markdown_file_name, CaptureRequest, ExportOptions,
    ExportPlan, ExportScope, DEFAULT_FILE_PREFIX,
};

use crate::error::{Error, Result};
use crate::model::Color;
use crate::render::PostView;
use std::path::{Path, PathBuf};

/// Shows posts and reports when they have been drawn.
pub trait RenderSurface {
    /// Show `view`. Returning `Ok` is the render-complete signal.
    fn present(&mut self, view: &PostView) -> Result<()>;
}

/// Turns a drawn frame into encoded image bytes.
pub trait Rasterizer {
    /// Capture the currently presented post.
    fn rasterize(&mut self, request: &CaptureRequest) -> Result<Vec<u8>>;
}

/// State of an export session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    /// Not started
    Idle,
    /// Waiting for the surface to finish drawing post `i`
    RenderingPost(usize),
    /// Post `i` has been captured
    Captured(usize),
    /// Every planned post has been captured, or the session was aborted
    Done,
}

impl std::fmt::Display for ExportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportState::Idle => write!(f, "idle"),
            ExportState::RenderingPost(i) => write!(f, "rendering post {}", i + 1),
            ExportState::Captured(i) => write!(f, "captured post {}", i + 1),
            ExportState::Done => write!(f, "done"),
        }
    }
}

/// A captured post image.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// Zero-based post index
    pub index: usize,
    /// File name from the plan
    pub file_name: String,
    /// Background the post was captured with
    pub background: Color,
    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl ExportedImage {
    /// Write the image into `dir` under its planned file name.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.data)?;
        Ok(path)
    }
}

/// Explicit state machine for exporting a sequence of posts.
#[derive(Debug, Clone)]
pub struct ExportSession {
    plan: ExportPlan,
    state: ExportState,
    position: usize,
    render_completed: bool,
    images: Vec<ExportedImage>,
}

impl ExportSession {
    /// Create an idle session for `plan`.
    pub fn new(plan: ExportPlan) -> Self {
        Self {
            plan,
            state: ExportState::Idle,
            position: 0,
            render_completed: false,
            images: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Whether the session has finished.
    pub fn is_done(&self) -> bool {
        self.state == ExportState::Done
    }

    /// The plan being executed.
    pub fn plan(&self) -> &ExportPlan {
        &self.plan
    }

    /// Images captured so far.
    pub fn images(&self) -> &[ExportedImage] {
        &self.images
    }

    /// Consume the session, returning the captured images.
    pub fn into_images(self) -> Vec<ExportedImage> {
        self.images
    }

    /// Begin exporting; returns the first post to present, if any.
    pub fn start(&mut self) -> Result<Option<usize>> {
        if self.state != ExportState::Idle {
            return Err(self.invalid("start"));
        }
        Ok(self.enter(0))
    }

    /// Signal that post `index` has been drawn; returns its capture request.
    pub fn render_complete(&mut self, index: usize) -> Result<CaptureRequest> {
        if self.state != ExportState::RenderingPost(index) {
            return Err(self.invalid(&format!("render complete for post {}", index + 1)));
        }
        self.render_completed = true;
        Ok(self.plan.requests[self.position].clone())
    }

    /// Record the captured bytes for post `index`.
    pub fn captured(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        if self.state != ExportState::RenderingPost(index) || !self.render_completed {
            return Err(self.invalid(&format!("capture of post {}", index + 1)));
        }
        let request = &self.plan.requests[self.position];
        self.images.push(ExportedImage {
            index,
            file_name: request.file_name.clone(),
            background: request.background,
            data,
        });
        self.state = ExportState::Captured(index);
        Ok(())
    }

    /// Move past a captured post; returns the next post to present, if any.
    pub fn advance(&mut self) -> Result<Option<usize>> {
        if !matches!(self.state, ExportState::Captured(_)) {
            return Err(self.invalid("advance"));
        }
        Ok(self.enter(self.position + 1))
    }

    /// Stop the session; already captured images are kept.
    pub fn abort(&mut self) {
        if !self.is_done() {
            log::warn!(
                "Export aborted while {} ({} of {} captured)",
                self.state,
                self.images.len(),
                self.plan.len()
            );
        }
        self.state = ExportState::Done;
    }

    fn enter(&mut self, position: usize) -> Option<usize> {
        self.position = position;
        self.render_completed = false;
        match self.plan.requests.get(position) {
            Some(request) => {
                self.state = ExportState::RenderingPost(request.index);
                Some(request.index)
            }
            None => {
                self.state = ExportState::Done;
                None
            }
        }
    }

    fn invalid(&self, event: &str) -> Error {
        Error::InvalidTransition {
            state: self.state.to_string(),
            event: event.to_string(),
        }
    }
}

/// Export posts by driving a session against a surface and a rasterizer.
///
/// On failure the session stops; the caller's document is never touched.
pub fn export_posts(
    views: &[PostView],
    scope: ExportScope,
    options: &ExportOptions,
    surface: &mut dyn RenderSurface,
    rasterizer: &mut dyn Rasterizer,
) -> Result<Vec<ExportedImage>> {
    let mut session = ExportSession::new(ExportPlan::new(views, scope, options)?);
    let mut next = session.start()?;

    while let Some(index) = next {
        let view = views
            .iter()
            .find(|view| view.index == index)
            .ok_or(Error::PostOutOfRange(index, views.len()))?;

        surface.present(view)?;
        let request = session.render_complete(index)?;

        let data = rasterizer.rasterize(&request).map_err(|e| {
            log::warn!("Failed to rasterize post {}: {}", index + 1, e);
            match e {
                Error::RasterizationFailed { .. } => e,
                other => Error::RasterizationFailed {
                    index,
                    reason: other.to_string(),
                },
            }
        })?;

        session.captured(index, data)?;
        next = session.advance()?;
    }

    log::debug!("Exported {} post images", session.images().len());
    Ok(session.into_images())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_posts;
    use crate::render::resolve_views;
    use crate::ParseOptions;

    fn plan(text: &str) -> ExportPlan {
        let views = resolve_views(&parse_posts(text), &ParseOptions::default());
        ExportPlan::new(&views, ExportScope::All, &ExportOptions::new().with_timestamp("T")).unwrap()
    }

    #[test]
    fn test_session_walks_all_states() {
        let mut session = ExportSession::new(plan("a\n===\nb"));
        assert_eq!(session.state(), ExportState::Idle);

        assert_eq!(session.start().unwrap(), Some(0));
        assert_eq!(session.state(), ExportState::RenderingPost(0));

        let request = session.render_complete(0).unwrap();
        assert_eq!(request.index, 0);
        session.captured(0, vec![1]).unwrap();
        assert_eq!(session.state(), ExportState::Captured(0));

        assert_eq!(session.advance().unwrap(), Some(1));
        session.render_complete(1).unwrap();
        session.captured(1, vec![2]).unwrap();
        assert_eq!(session.advance().unwrap(), None);
        assert!(session.is_done());

        let images = session.into_images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].file_name, "instagram-post-T-2.png");
    }

    #[test]
    fn test_empty_plan_finishes_immediately() {
        let mut session = ExportSession::new(plan(""));
        assert_eq!(session.start().unwrap(), None);
        assert!(session.is_done());
    }

    #[test]
    fn test_capture_before_render_complete_rejected() {
        let mut session = ExportSession::new(plan("a"));
        session.start().unwrap();
        let err = session.captured(0, vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(session.state(), ExportState::RenderingPost(0));
    }

    #[test]
    fn test_wrong_index_rejected() {
        let mut session = ExportSession::new(plan("a\n===\nb"));
        session.start().unwrap();
        assert!(session.render_complete(1).is_err());
        assert_eq!(session.state(), ExportState::RenderingPost(0));
    }

    #[test]
    fn test_out_of_order_events_rejected() {
        let mut session = ExportSession::new(plan("a"));
        assert!(session.advance().is_err());
        assert!(session.render_complete(0).is_err());
        session.start().unwrap();
        assert!(session.start().is_err());
        assert!(session.advance().is_err());
    }

    #[test]
    fn test_abort_keeps_images() {
        let mut session = ExportSession::new(plan("a\n===\nb"));
        session.start().unwrap();
        session.render_complete(0).unwrap();
        session.captured(0, vec![9]).unwrap();
        session.abort();
        assert!(session.is_done());
        assert_eq!(session.images().len(), 1);
    }
}
