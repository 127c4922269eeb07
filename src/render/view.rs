//! Render-ready views of parsed posts.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::{LayoutDescriptor, Region};
use crate::model::{Color, ImageReference, Palette, Post, PostMetadata, Theme};
use crate::parser::{annotate, highlight_spans, HighlightSpan, OwnedFragment, ParseOptions};

/// Below this many posts, views are resolved on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 16;

/// Text shown in the frame when the document has no posts.
pub const PLACEHOLDER_TEXT: &str = "Start typing to see the preview...";

/// Everything the render surface needs to draw one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// Zero-based position in the document
    pub index: usize,

    /// Metadata as parsed
    pub metadata: PostMetadata,

    /// Resolved theme
    pub theme: Theme,

    /// Colours of the resolved theme
    pub palette: Palette,

    /// Resolved frame arrangement
    pub layout: LayoutDescriptor,

    /// Images in order of appearance
    pub images: Vec<ImageReference>,

    /// Prose with image markers removed
    pub text: String,

    /// Prose split into plain and highlighted fragments
    pub fragments: Vec<OwnedFragment>,

    /// Byte ranges of highlighted text within `text`
    pub highlights: Vec<HighlightSpan>,
}

impl PostView {
    /// Resolve a post: segment images, annotate highlights, resolve layout.
    pub fn from_post(post: &Post) -> Self {
        let segmented = post.segment();
        let theme = post.theme();
        let fragments = annotate(&segmented.stripped_body)
            .map(|fragment| fragment.to_owned_fragment())
            .collect();
        let highlights = highlight_spans(&segmented.stripped_body);

        Self {
            index: post.index,
            metadata: post.metadata.clone(),
            theme,
            palette: theme.palette(),
            layout: post.layout(),
            images: segmented.images,
            text: segmented.stripped_body,
            fragments,
            highlights,
        }
    }

    /// View shown while the document is empty.
    pub fn placeholder() -> Self {
        Self::from_post(&Post::new(0, PostMetadata::default(), PLACEHOLDER_TEXT))
    }

    /// Export background colour.
    pub fn background(&self) -> Color {
        self.palette.background
    }

    /// Whether the post has any images.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Frame contents in the order they must be drawn.
    ///
    /// The image region is omitted when the post has no images.
    pub fn elements(&self) -> Vec<FrameElement<'_>> {
        self.layout
            .regions()
            .into_iter()
            .filter_map(|region| match region {
                Region::Image if self.has_images() => Some(FrameElement::Images(&self.images)),
                Region::Image => None,
                Region::Text => Some(FrameElement::Text(&self.fragments)),
            })
            .collect()
    }
}

/// One region of a frame with its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameElement<'a> {
    /// Stacked images
    Images(&'a [ImageReference]),
    /// Annotated prose
    Text(&'a [OwnedFragment]),
}

/// Resolve views for `posts`, preserving order.
pub fn resolve_views(posts: &[Post], options: &ParseOptions) -> Vec<PostView> {
    if options.parallel && posts.len() >= PARALLEL_THRESHOLD {
        log::debug!("Resolving {} posts in parallel", posts.len());
        posts.par_iter().map(PostView::from_post).collect()
    } else {
        posts.iter().map(PostView::from_post).collect()
    }
}
