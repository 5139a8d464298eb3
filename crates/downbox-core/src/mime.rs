//! MIME selection for stored entries.

/// MIME type recorded for `.pdf` payloads.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type recorded for everything else.
pub const MIME_TEXT: &str = "text/plain";

/// Picks the MIME type from the file name, case-insensitively. Exactly
/// two outcomes: a `.pdf` suffix maps to `application/pdf`, anything
/// else to `text/plain`.
pub fn mime_type_for(file_name: &str) -> &'static str {
    let n = file_name.len();
    if n >= 4 && file_name.is_char_boundary(n - 4) && file_name[n - 4..].eq_ignore_ascii_case(".pdf")
    {
        MIME_PDF
    } else {
        MIME_TEXT
    }
}
