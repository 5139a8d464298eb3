//! Content URIs for registry entries.

use url::Url;

use super::types::EntryId;

const SCHEME: &str = "content";
const AUTHORITY: &str = "downloads";

/// Formats the identifier returned for a registry-backed save.
pub fn entry_uri(id: EntryId) -> String {
    format!("{SCHEME}://{AUTHORITY}/{id}")
}

/// Parses an identifier back to an entry id. Returns None for anything
/// that is not a `content://downloads/<id>` URI (e.g. a plain path).
pub fn parse_entry_uri(s: &str) -> Option<EntryId> {
    let url = Url::parse(s).ok()?;
    if url.scheme() != SCHEME || url.host_str() != Some(AUTHORITY) {
        return None;
    }
    url.path().strip_prefix('/')?.parse().ok()
}
