//! Tests for the registry (use the in-memory DB helper from db).

use crate::registry::db::open_memory;
use crate::registry::{EntryState, NewEntry};

fn sample_entry<'a>(name: &'a str, path: &'a str) -> NewEntry<'a> {
    NewEntry {
        display_name: name,
        mime_type: "text/plain",
        path,
        size_bytes: 11,
        sha256: Some("deadbeef"),
    }
}

#[tokio::test]
async fn staged_insert_then_publish() {
    let registry = open_memory().await.unwrap();
    let id = registry
        .insert_pending(&sample_entry("notes.txt", "/tmp/notes.txt"))
        .await
        .unwrap();

    let entry = registry.get_entry(id).await.unwrap().unwrap();
    assert_eq!(entry.state, EntryState::Pending);
    assert_eq!(entry.display_name, "notes.txt");
    assert_eq!(entry.mime_type, "text/plain");
    assert_eq!(entry.size_bytes, 11);
    assert_eq!(entry.sha256.as_deref(), Some("deadbeef"));

    registry.mark_published(id).await.unwrap();
    let entry = registry.get_entry(id).await.unwrap().unwrap();
    assert_eq!(entry.state, EntryState::Published);
}

#[tokio::test]
async fn discard_removes_row() {
    let registry = open_memory().await.unwrap();
    let id = registry
        .insert_pending(&sample_entry("a.txt", "/tmp/a.txt"))
        .await
        .unwrap();
    registry.discard(id).await.unwrap();
    assert!(registry.get_entry(id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_entries_newest_first() {
    let registry = open_memory().await.unwrap();
    assert!(registry.list_entries().await.unwrap().is_empty());

    let id1 = registry
        .insert_pending(&sample_entry("one.txt", "/tmp/one.txt"))
        .await
        .unwrap();
    let id2 = registry
        .insert_pending(&sample_entry("two.txt", "/tmp/two.txt"))
        .await
        .unwrap();

    let entries = registry.list_entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, id2);
    assert_eq!(entries[0].display_name, "two.txt");
    assert_eq!(entries[1].id, id1);
}

#[tokio::test]
async fn missing_entry_is_none() {
    let registry = open_memory().await.unwrap();
    assert!(registry.get_entry(999).await.unwrap().is_none());
}

#[tokio::test]
async fn purge_stale_pending_drops_fileless_rows() {
    let dir = tempfile::tempdir().unwrap();
    let registry = open_memory().await.unwrap();

    // Pending row whose staging file still exists: kept.
    let kept_path = dir.path().join("kept.txt");
    std::fs::write(crate::storage::pending_path(&kept_path), b"x").unwrap();
    let kept = registry
        .insert_pending(&sample_entry("kept.txt", kept_path.to_str().unwrap()))
        .await
        .unwrap();

    // Pending row with no file at all: purged.
    let gone_path = dir.path().join("gone.txt");
    let gone = registry
        .insert_pending(&sample_entry("gone.txt", gone_path.to_str().unwrap()))
        .await
        .unwrap();

    // Published rows are never touched.
    let pub_path = dir.path().join("pub.txt");
    let published = registry
        .insert_pending(&sample_entry("pub.txt", pub_path.to_str().unwrap()))
        .await
        .unwrap();
    registry.mark_published(published).await.unwrap();

    let purged = registry.purge_stale_pending().await.unwrap();
    assert_eq!(purged, 1);
    assert!(registry.get_entry(kept).await.unwrap().is_some());
    assert!(registry.get_entry(gone).await.unwrap().is_none());
    assert!(registry.get_entry(published).await.unwrap().is_some());
}

#[tokio::test]
async fn registry_open_at_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("state/registry.db");

    let registry = crate::registry::Registry::open_at(&db_path).await.unwrap();
    let id = registry
        .insert_pending(&sample_entry("persisted.txt", "/tmp/persisted.txt"))
        .await
        .unwrap();
    registry.mark_published(id).await.unwrap();
    drop(registry);

    let reopened = crate::registry::Registry::open_at(&db_path).await.unwrap();
    let entry = reopened.get_entry(id).await.unwrap().unwrap();
    assert_eq!(entry.display_name, "persisted.txt");
    assert_eq!(entry.state, EntryState::Published);
}
