// ============================================================
// CSV SOURCE
// ============================================================
// Read a CSV file from disk and decode it to text

use std::fs;
use std::path::Path;

use encoding_rs::UTF_8;
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::shared::file_size::format_file_size;

/// A CSV file read fully into memory.
#[derive(Debug, Clone)]
pub struct CsvSource {
    /// File name without directories
    pub name: String,

    /// Size on disk in bytes
    pub size_bytes: u64,

    /// Decoded text content
    pub content: String,
}

impl CsvSource {
    /// One-line description used in logs and CLI output.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size_bytes))
    }
}

/// Read and decode a CSV file.
pub fn read_csv_file(path: &Path) -> Result<CsvSource> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let has_csv_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !has_csv_extension {
        warn!(file = %name, "input does not have a .csv extension");
    }

    let source = CsvSource {
        name,
        size_bytes: bytes.len() as u64,
        content: decode_csv_bytes(&bytes),
    };
    debug!(file = %source.describe(), "read CSV input");

    Ok(source)
}

/// Decode raw bytes as text.
///
/// BOM-sniffed with a UTF-8 default; the BOM is stripped so the
/// first header name compares cleanly. Invalid sequences become U+FFFD.
pub fn decode_csv_bytes(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        warn!(
            encoding = encoding.name(),
            "CSV input contained invalid byte sequences"
        );
    }
    text.into_owned()
}
