// ============================================================
// SAMPLE CSV
// ============================================================
// The example merge file handed out to new users

use std::path::Path;

use csv::WriterBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::moves::REQUIRED_HEADERS;

const SAMPLE_ROWS: [[&str; 3]; 6] = [
    ["197801171173", "197801171173-DUPLICATE-1", "197801171173"],
    ["FL-PE-BASE-105", "FL-PE-BASE-105-DUPLICATE-1", "FL-PE-BASE-75"],
    ["FL-PE-COLM-105", "FL-PE-COLM-105-DUPLICATE-1", "FL-PE-COLM-75"],
    ["FL-PE-MERA-105", "FL-PE-MERA-105-DUPLICATE-1", "FL-PE-MERA-75"],
    ["FL-PE-REMY-105", "FL-PE-REMY-105-DUPLICATE-1", "FL-PE-REMY-75"],
    ["FL-PE-UMBR-105", "FL-PE-UMBR-105-DUPLICATE-1", "FL-PE-UMBR-75"],
];

/// Render the sample merge CSV.
pub fn sample_csv() -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(REQUIRED_HEADERS)
        .map_err(|e| AppError::Internal(format!("Failed to write sample header: {}", e)))?;
    for row in SAMPLE_ROWS {
        writer
            .write_record(row)
            .map_err(|e| AppError::Internal(format!("Failed to write sample row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush sample CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("Sample CSV is not UTF-8: {}", e)))
}

/// Write the sample merge CSV to `path`.
pub fn write_sample_csv(path: &Path) -> Result<()> {
    let content = sample_csv()?;
    std::fs::write(path, content).map_err(|e| {
        AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })
}
