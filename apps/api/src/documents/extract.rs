//! Raw text extraction — turns an uploaded document into the plain text the
//! profile builder consumes.

use tracing::warn;

/// Sentinel raw text stored when a document cannot be decoded. The profile
/// builder still runs over it and produces a mostly-empty profile, which is
/// preferable to failing the upload.
pub const PARSE_FAILURE_TEXT: &str = "Parsing failed";

pub const PDF_MIME: &str = "application/pdf";

/// Best-effort text extraction by MIME type. Never fails: undecodable input
/// degrades to [`PARSE_FAILURE_TEXT`]. Anything that is not a recognized
/// binary format is treated as UTF-8 text.
pub fn extract_raw_text(bytes: &[u8], mime_type: &str) -> String {
    if mime_type == PDF_MIME {
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("PDF text extraction failed: {e}");
                PARSE_FAILURE_TEXT.to_string()
            }
        }
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::builder::build_profile;

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_raw_text(b"Skills\nPython", "text/plain");
        assert_eq!(text, "Skills\nPython");
    }

    #[test]
    fn test_unknown_mime_treated_as_text() {
        let text = extract_raw_text(b"hello", "application/octet-stream");
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let text = extract_raw_text(&[0x68, 0x69, 0xff], "text/plain");
        assert!(text.starts_with("hi"));
    }

    #[test]
    fn test_undecodable_pdf_falls_back_to_sentinel() {
        let text = extract_raw_text(b"this is not a pdf", PDF_MIME);
        assert_eq!(text, PARSE_FAILURE_TEXT);
    }

    #[test]
    fn test_sentinel_builds_mostly_empty_profile() {
        let profile = build_profile(PARSE_FAILURE_TEXT);
        assert!(profile.personal_info.email.is_none());
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
    }
}
