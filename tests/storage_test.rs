//! Integration tests for persistence and markdown import/export.

use std::fs;

use textpost::storage::{
    export_markdown, import_markdown, load_or_welcome, DocumentStore, FileStore, MemoryStore,
};
use textpost::{Document, Error};

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("draft.md"));

    assert_eq!(store.load().unwrap(), None);

    store.save("one\n===\ntwo").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("one\n===\ntwo"));
}

#[test]
fn test_empty_store_loads_welcome() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("missing.md"));

    let doc = load_or_welcome(&store);
    assert_eq!(doc, Document::welcome());
}

#[test]
fn test_unreadable_store_loads_welcome() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file.
    let store = FileStore::new(dir.path());

    assert!(store.load().is_err());
    assert_eq!(load_or_welcome(&store), Document::welcome());
}

#[test]
fn test_memory_store_saves_document() {
    let store = MemoryStore::new();
    let mut doc = Document::welcome();
    doc.set_text("edited");

    store.save(doc.text()).unwrap();
    assert_eq!(load_or_welcome(&store).text(), "edited");
}

#[test]
fn test_import_markdown_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.md");
    // BOM, CRLF and a decomposed "é"
    fs::write(&path, "\u{feff}Caf\u{0065}\u{0301}\r\n===\r\nSecond\r").unwrap();

    let doc = import_markdown(&path).unwrap();
    assert_eq!(doc.text(), "Caf\u{00e9}\n===\nSecond\n");
    assert_eq!(doc.post_count(), 2);
}

#[test]
fn test_import_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.html");
    fs::write(&path, "<p>hi</p>").unwrap();

    let err = import_markdown(&path).unwrap_err();
    assert!(matches!(err, Error::ImportFailed { .. }));
    assert!(err.to_string().contains("posts.html"));
}

#[test]
fn test_import_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.txt");
    fs::write(&path, [0x66, 0x6f, 0xff, 0x6f]).unwrap();

    assert!(matches!(
        import_markdown(&path),
        Err(Error::ImportFailed { .. })
    ));
}

#[test]
fn test_import_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = import_markdown(dir.path().join("nope.md")).unwrap_err();
    assert!(matches!(err, Error::ImportFailed { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_export_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let doc = Document::new("---\ntheme: dark\n---\nHello");

    let path = export_markdown(&doc, dir.path(), "2024-05-01T09-30-00").unwrap();

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("instagram-post-2024-05-01T09-30-00.md")
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), doc.text());
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_import_markdown_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.markdown");
    fs::write(&path, "a\r\n===\r\nb").unwrap();

    let doc = textpost::storage::import_markdown_async(&path).await.unwrap();
    assert_eq!(doc.text(), "a\n===\nb");
}
