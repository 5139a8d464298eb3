//! Entry read operations: get and list.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::super::db::Registry;
use super::super::types::{Entry, EntryId, EntryState};

fn entry_from_row(row: &SqliteRow) -> Entry {
    let state_str: String = row.get("state");
    Entry {
        id: row.get("id"),
        display_name: row.get("display_name"),
        mime_type: row.get("mime_type"),
        path: row.get("path"),
        size_bytes: row.get("size_bytes"),
        sha256: row.get("sha256"),
        state: EntryState::from_str(&state_str),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Registry {
    /// Fetch one entry by id.
    pub async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>> {
        let row = sqlx::query(
            r#"
            SELECT id, display_name, mime_type, path, size_bytes, sha256,
                   state, created_at, updated_at
            FROM entries
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(entry_from_row))
    }

    /// List all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, display_name, mime_type, path, size_bytes, sha256,
                   state, created_at, updated_at
            FROM entries
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }
}
