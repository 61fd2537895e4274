//! Content-based MIME detection using magic numbers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{MimeDetector, ProbeError};

/// Bytes read from the head of a file for sniffing
pub const SNIFF_LEN: u64 = 8192;

/// Reported for zero-length files
pub const EMPTY_MIME: &str = "application/x-empty";

/// Reported for text content without a recognizable signature
pub const TEXT_MIME: &str = "text/plain";

/// Reported for text that parses as a JSON object or array
pub const JSON_MIME: &str = "application/json";

/// Reported for text laid out as comma-separated rows
pub const CSV_MIME: &str = "text/csv";

/// Reported for binary content without a recognizable signature
pub const BINARY_MIME: &str = "application/octet-stream";

/// [`MimeDetector`] backed by the `infer` signature database.
///
/// Files with no known signature are classified from their text: JSON,
/// then CSV, then `text/plain`. Non-text content is
/// `application/octet-stream`.
#[derive(Debug, Clone, Default)]
pub struct InferMimeDetector;

impl InferMimeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify the complete content of a file held in memory
    pub fn detect_bytes(&self, content: &[u8]) -> &'static str {
        classify(content, true)
    }
}

/// `complete` is false when `head` is only the first part of the file
fn classify(head: &[u8], complete: bool) -> &'static str {
    if head.is_empty() {
        return EMPTY_MIME;
    }

    if let Some(kind) = infer::get(head) {
        return kind.mime_type();
    }

    if !looks_like_text(head) {
        return BINARY_MIME;
    }

    if looks_like_json(head, complete) {
        JSON_MIME
    } else if looks_like_csv(head, complete) {
        CSV_MIME
    } else {
        TEXT_MIME
    }
}

impl MimeDetector for InferMimeDetector {
    fn name(&self) -> &str {
        "infer"
    }

    fn detect(&self, path: &Path) -> Result<String, ProbeError> {
        let mut head = Vec::with_capacity(SNIFF_LEN as usize + 1);
        File::open(path)?.take(SNIFF_LEN + 1).read_to_end(&mut head)?;

        let complete = head.len() as u64 <= SNIFF_LEN;
        head.truncate(SNIFF_LEN as usize);
        Ok(classify(&head, complete).to_string())
    }
}

/// UTF-8 check that tolerates a multi-byte sequence cut off by the sniff window
fn looks_like_text(head: &[u8]) -> bool {
    let valid = match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    valid && !head.contains(&0)
}

/// An object or array at top level. A truncated head only has to open one.
fn looks_like_json(head: &[u8], complete: bool) -> bool {
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let text = &head[start..];
    if !matches!(text.first(), Some(b'{' | b'[')) {
        return false;
    }

    !complete || serde_json::from_slice::<serde::de::IgnoredAny>(text).is_ok()
}

/// At least two rows, each with the same non-zero number of unquoted commas
fn looks_like_csv(head: &[u8], complete: bool) -> bool {
    let valid = match std::str::from_utf8(head) {
        Ok(_) => head.len(),
        Err(e) => e.valid_up_to(),
    };
    let Ok(text) = std::str::from_utf8(&head[..valid]) else {
        return false;
    };

    let mut rows: Vec<&str> = text.lines().collect();
    if !complete && !text.ends_with('\n') {
        rows.pop();
    }
    rows.retain(|row| !row.trim().is_empty());

    if rows.len() < 2 {
        return false;
    }

    let columns = delimiter_count(rows[0]);
    columns > 0 && rows.iter().all(|row| delimiter_count(row) == columns)
}

fn delimiter_count(row: &str) -> usize {
    let mut quoted = false;
    let mut count = 0;
    for c in row.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => count += 1,
            _ => {}
        }
    }
    count
}
