//! SQLite-backed registry implementation.
//!
//! Handles connection, migration, and timestamp helpers. Entry CRUD
//! lives in `entries`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Percent-encode a path for use in a sqlite:// URI so spaces and
/// special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed media registry.
///
/// The database file lives under the XDG state directory:
/// `~/.local/state/downbox/registry.db`.
#[derive(Clone)]
pub struct Registry {
    pub(crate) pool: Pool<Sqlite>,
}

impl Registry {
    /// Open (or create) the default registry database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let state_dir = crate::capability::registry_state_dir()?;
        let db_path = state_dir.join("registry.db");

        // Ensure parent directory exists.
        tokio::fs::create_dir_all(&state_dir).await?;

        Self::open_at(&db_path).await
    }

    /// Open (or create) the registry at a specific path. Creates parent
    /// dirs if needed. Intended for tests so the DB can be placed in a
    /// temp directory.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;
        let registry = Registry { pool };
        registry.migrate().await?;
        Ok(registry)
    }

    async fn migrate(&self) -> Result<()> {
        // Single-table schema: one row per saved file. `state` is
        // pending until the bytes are renamed into place.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                display_name TEXT NOT NULL,
                mime_type TEXT NOT NULL,
                path TEXT NOT NULL,
                size_bytes INTEGER NOT NULL,
                sha256 TEXT,
                state TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for DB timestamps). Pub for `entries`.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory registry for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<Registry> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let registry = Registry { pool };
    registry.migrate().await?;
    Ok(registry)
}
