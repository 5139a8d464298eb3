//! Entry write operations: staged insert, publish, discard, purge.

use anyhow::Result;
use sqlx::Row;

use super::super::db::{unix_timestamp, Registry};
use super::super::types::{EntryId, EntryState, NewEntry};
use crate::storage::pending_path;
use std::path::Path;

impl Registry {
    /// Declare a new entry before its bytes are written (the staged
    /// insert). Returns the new entry id; the row stays `pending` until
    /// `mark_published`.
    pub async fn insert_pending(&self, new: &NewEntry<'_>) -> Result<EntryId> {
        let now = unix_timestamp();
        let id = sqlx::query(
            r#"
            INSERT INTO entries (
                display_name, mime_type, path, size_bytes, sha256,
                state, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(new.display_name)
        .bind(new.mime_type)
        .bind(new.path)
        .bind(new.size_bytes)
        .bind(new.sha256)
        .bind(EntryState::Pending.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    /// Flip a pending entry to published once its bytes are renamed into
    /// place.
    pub async fn mark_published(&self, id: EntryId) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            UPDATE entries
            SET state = ?1,
                updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(EntryState::Published.as_str())
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Drop an entry whose write failed. The staging file is the
    /// caller's to clean up.
    pub async fn discard(&self, id: EntryId) -> Result<()> {
        sqlx::query(r#"DELETE FROM entries WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove pending rows whose staging and final files are both gone
    /// (e.g. after a crash between insert and write). Returns the number
    /// of rows removed.
    pub async fn purge_stale_pending(&self) -> Result<u64> {
        let rows = sqlx::query(r#"SELECT id, path FROM entries WHERE state = 'pending'"#)
            .fetch_all(&self.pool)
            .await?;

        let mut purged = 0u64;
        for row in rows {
            let id: i64 = row.get("id");
            let path: String = row.get("path");
            let final_path = Path::new(&path);
            if !final_path.exists() && !pending_path(final_path).exists() {
                self.discard(id).await?;
                purged += 1;
            }
        }
        Ok(purged)
    }
}
