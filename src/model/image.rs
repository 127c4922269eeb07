//! Image references and the store of locally generated image handles.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Prefix of reference IDs issued by [`ImageStore::register`].
pub const BLOB_PREFIX: &str = "blob:textpost/";

/// Alt text used when an image marker has none.
pub const FALLBACK_ALT_TEXT: &str = "image";

/// An image marker extracted from a post body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    /// Alternative text between the brackets
    pub alt_text: String,

    /// Source locator between the parentheses
    pub source: String,
}

impl ImageReference {
    /// Create a new image reference.
    pub fn new(alt_text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            alt_text: alt_text.into(),
            source: source.into(),
        }
    }

    /// Alt text to show, falling back to a generic label.
    pub fn display_alt(&self) -> &str {
        if self.alt_text.is_empty() {
            FALLBACK_ALT_TEXT
        } else {
            &self.alt_text
        }
    }

    /// Classify the source locator.
    pub fn kind(&self) -> ImageSource {
        ImageSource::classify(&self.source)
    }

    /// Markdown marker for this reference.
    pub fn to_markdown(&self) -> String {
        format!("![{}]({})", self.alt_text, self.source)
    }
}

/// Kind of locator an image source uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Opaque handle owned by the editing session (`blob:`)
    Blob,
    /// Inline `data:` URI
    Data,
    /// `http://` or `https://` URL
    Remote,
    /// Anything else, treated as a path
    Local,
}

impl ImageSource {
    /// Classify a source string.
    pub fn classify(source: &str) -> Self {
        let lower = source.trim().to_ascii_lowercase();
        if lower.starts_with("blob:") {
            ImageSource::Blob
        } else if lower.starts_with("data:") {
            ImageSource::Data
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Remote
        } else {
            ImageSource::Local
        }
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::Blob => write!(f, "blob"),
            ImageSource::Data => write!(f, "data"),
            ImageSource::Remote => write!(f, "remote"),
            ImageSource::Local => write!(f, "local"),
        }
    }
}

/// Image bytes kept alive for a blob reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResource {
    /// Raw encoded image data
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Original filename if known
    pub filename: Option<String>,
}

impl ImageResource {
    /// Create a resource, detecting the MIME type from the data.
    pub fn new(data: Vec<u8>) -> Self {
        let mime_type = Self::detect_mime_type(&data)
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            data,
            mime_type,
            filename: None,
        }
    }

    /// Create a resource with an explicit MIME type.
    pub fn with_mime_type(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    /// Set filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Get the size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the data is a recognized image format.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Get the file extension based on MIME type.
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/webp" => "webp",
            "image/svg+xml" => "svg",
            _ => "bin",
        }
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some("image/webp");
        }
        if data.starts_with(b"BM") {
            return Some("image/bmp");
        }
        let head = &data[..data.len().min(256)];
        if String::from_utf8_lossy(head).trim_start().starts_with("<svg") {
            return Some("image/svg+xml");
        }
        None
    }
}

/// Handles for locally added images, keyed by reference ID.
///
/// The editing session owns the store for the lifetime of its document and
/// passes it to whatever resolves [`ImageReference`] sources to bytes.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    resources: HashMap<String, ImageResource>,
    next_id: u64,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `resource` alive and return the reference ID to embed.
    pub fn register(&mut self, resource: ImageResource) -> String {
        self.next_id += 1;
        let id = format!("{}{}", BLOB_PREFIX, self.next_id);
        log::debug!(
            "Registered image {} ({}, {} bytes)",
            id,
            resource.mime_type,
            resource.size()
        );
        self.resources.insert(id.clone(), resource);
        id
    }

    /// Insert a resource under an existing ID, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, resource: ImageResource) {
        self.resources.insert(id.into(), resource);
    }

    /// Get a resource by ID.
    pub fn get(&self, id: &str) -> Option<&ImageResource> {
        self.resources.get(id)
    }

    /// Resolve an image reference to its bytes, if the store owns it.
    pub fn resolve(&self, reference: &ImageReference) -> Option<&ImageResource> {
        self.resources.get(reference.source.trim())
    }

    /// Release a handle.
    pub fn remove(&mut self, id: &str) -> Option<ImageResource> {
        self.resources.remove(id)
    }

    /// Drop handles whose ID is not in `referenced`; returns how many were dropped.
    pub fn retain_referenced<'a, I>(&mut self, referenced: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keep: HashSet<&str> = referenced.into_iter().collect();
        let before = self.resources.len();
        self.resources.retain(|id, _| keep.contains(id.as_str()));
        let dropped = before - self.resources.len();
        if dropped > 0 {
            log::debug!("Released {} unreferenced image handles", dropped);
        }
        dropped
    }

    /// IDs of all handles.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of handles held.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
