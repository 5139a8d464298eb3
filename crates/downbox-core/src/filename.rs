//! File-name sanitization for the Downloads area.

/// Fallback when sanitization leaves nothing usable.
const FALLBACK_NAME: &str = "download.bin";

/// Maximum file-name length in bytes (Linux NAME_MAX).
const NAME_MAX: usize = 255;

/// Sanitizes a caller-supplied display name before it touches the
/// filesystem.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Collapses runs of replacement underscores
/// - Trims leading/trailing spaces, dots, and underscores
/// - Caps the result at 255 bytes on a char boundary
/// - Falls back to `download.bin` when nothing usable remains
///
/// Traversal sequences like `../` therefore cannot escape the target
/// directory: separators are replaced and leading dots trimmed.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_replaced = false;

    for c in name.chars() {
        if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            if !prev_replaced {
                out.push('_');
            }
            prev_replaced = true;
        } else {
            out.push(c);
            prev_replaced = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    let capped = if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        &trimmed[..take]
    } else {
        trimmed
    };

    if capped.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        capped.to_string()
    }
}
