//! Content-based file classification.
//!
//! Returns a MIME-like type string from the leading bytes of a file. The
//! signature table covers the formats the corpus tooling produces or
//! downloads; everything else falls back to a printable-text check.

/// Magic-number signatures checked in order, longest prefix first.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (b"\xfd7zXZ\x00", "application/x-xz"),
    (b"BZh", "application/x-bzip2"),
    (b"\x28\xb5\x2f\xfd", "application/zstd"),
];

/// Classifies `contents` into a MIME-like type string.
pub fn mime_type(contents: &[u8]) -> &'static str {
    if contents.is_empty() {
        return "application/x-empty";
    }

    for (signature, mime) in SIGNATURES {
        if contents.starts_with(signature) {
            return mime;
        }
    }

    if is_plain_text(contents) {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// A file counts as text when it decodes as UTF-8 and contains no control
/// characters besides whitespace. Only the first 8 KiB are inspected.
fn is_plain_text(contents: &[u8]) -> bool {
    let sample = &contents[..contents.len().min(8192)];
    match std::str::from_utf8(sample) {
        Ok(text) => !text
            .chars()
            .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t'),
        Err(_) => false,
    }
}
