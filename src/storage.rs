//! Document persistence, markdown import and markdown export.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::export::{markdown_file_name, DEFAULT_FILE_PREFIX};
use crate::model::{normalize_text, Document};

/// File extensions accepted by [`import_markdown`].
pub const IMPORT_EXTENSIONS: [&str; 3] = ["md", "markdown", "txt"];

/// Stores the text of a single document between sessions.
pub trait DocumentStore {
    /// Load the saved text, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the saved text.
    fn save(&self, text: &str) -> Result<()>;
}

/// Stores the document in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Keeps the document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    text: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .text
            .lock()
            .map_err(|_| Error::Other("memory store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, text: &str) -> Result<()> {
        let mut guard = self
            .text
            .lock()
            .map_err(|_| Error::Other("memory store lock poisoned".to_string()))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Load the saved document, falling back to the welcome document.
///
/// A store that cannot be read is logged and treated as empty.
pub fn load_or_welcome(store: &dyn DocumentStore) -> Document {
    match store.load() {
        Ok(Some(text)) => Document::new(text),
        Ok(None) => Document::welcome(),
        Err(e) => {
            log::warn!("Failed to load saved document: {}", e);
            Document::welcome()
        }
    }
}

/// Import a markdown or text file as a new document.
///
/// # Example
///
/// ```no_run
/// use textpost::storage::import_markdown;
///
/// let doc = import_markdown("posts.md")?;
/// println!("{} posts", doc.post_count());
/// # Ok::<(), textpost::Error>(())
/// ```
pub fn import_markdown<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    check_extension(path)?;

    let bytes = fs::read(path).map_err(|e| Error::import_failed(path, e.to_string()))?;
    decode(path, bytes)
}

/// Import a markdown or text file without blocking the runtime.
#[cfg(feature = "async")]
pub async fn import_markdown_async<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    check_extension(path)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::import_failed(path, e.to_string()))?;
    decode(path, bytes)
}

/// Write the document text into `dir` as `instagram-post-<timestamp>.md`.
pub fn export_markdown(document: &Document, dir: &Path, timestamp: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(markdown_file_name(DEFAULT_FILE_PREFIX, timestamp));
    fs::write(&path, document.text())?;
    log::debug!("Exported document to {}", path.display());
    Ok(path)
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if IMPORT_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(Error::import_failed(
            path,
            format!("unsupported file type '.{}'", ext),
        )),
        None => Err(Error::import_failed(path, "missing file extension")),
    }
}

fn decode(path: &Path, bytes: Vec<u8>) -> Result<Document> {
    let raw = String::from_utf8(bytes)
        .map_err(|e| Error::import_failed(path, format!("not valid UTF-8: {}", e)))?;
    Ok(Document::new(normalize_text(&raw)))
}
