//! Types stored in the media registry.

/// Registry entry identifier.
pub type EntryId = i64;

/// Lifecycle state of an entry, stored as a string in the database.
/// Pending entries have been declared but their bytes are not yet in
/// place; only published entries may be dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Published,
}

impl EntryState {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryState::Pending => "pending",
            EntryState::Published => "published",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "published" => EntryState::Published,
            _ => EntryState::Pending,
        }
    }
}

/// Full registry record for one saved file.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub display_name: String,
    pub mime_type: String,
    pub path: String,
    pub size_bytes: i64,
    pub sha256: Option<String>,
    pub state: EntryState,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields declared at insert time, before any bytes are written.
#[derive(Debug, Clone)]
pub struct NewEntry<'a> {
    pub display_name: &'a str,
    pub mime_type: &'a str,
    pub path: &'a str,
    pub size_bytes: i64,
    pub sha256: Option<&'a str>,
}
