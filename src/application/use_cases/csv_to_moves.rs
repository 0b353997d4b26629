// ============================================================
// CSV TO MOVES USE CASE
// ============================================================
// Validate a merge CSV and turn it into an items-move batch

use crate::domain::error::{Result, TransformError};
use crate::domain::moves::{MoveBatch, MoveRecord, REQUIRED_HEADERS};
use crate::infrastructure::csv::{tokenize, CsvSource};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Column positions of the required headers within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredColumns {
    sku: usize,
    sku_to_replace: usize,
    retain_sku: usize,
}

impl RequiredColumns {
    /// Locate each required header by first occurrence.
    fn locate(headers: &[String]) -> std::result::Result<Self, TransformError> {
        let positions =
            REQUIRED_HEADERS.map(|name| headers.iter().position(|header| header == name));

        match positions {
            [Some(sku), Some(sku_to_replace), Some(retain_sku)] => Ok(Self {
                sku,
                sku_to_replace,
                retain_sku,
            }),
            _ => Err(TransformError::MissingHeaders(
                REQUIRED_HEADERS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            )),
        }
    }
}

/// Turn merge CSV text into a move batch.
///
/// The first line is the header and must name `sku`, `skuToReplace` and
/// `retainSku` (any order, extra columns ignored). Every data row must have
/// as many fields as the header and non-blank values in the three required
/// columns. The first bad row aborts the whole call.
pub fn transform_csv_to_moves(
    csv_text: &str,
    force: bool,
) -> std::result::Result<MoveBatch, TransformError> {
    // Pasted or posted text may still carry a byte order mark.
    let lines: Vec<&str> = csv_text
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .split('\n')
        .collect();
    if lines.len() < 2 {
        return Err(TransformError::InsufficientRows);
    }

    let headers = tokenize(lines[0]);
    let columns = RequiredColumns::locate(&headers)?;

    let mut moves = Vec::with_capacity(lines.len() - 1);
    for (index, line) in lines.iter().enumerate().skip(1) {
        let row = index + 1;
        let values = tokenize(line);

        if values.len() != headers.len() {
            return Err(TransformError::ColumnCountMismatch {
                row,
                actual: values.len(),
                expected: headers.len(),
            });
        }

        let field = |position: usize| values.get(position).map(|v| v.trim()).unwrap_or("");
        let sku = field(columns.sku);
        let sku_to_replace = field(columns.sku_to_replace);
        let retain_sku = field(columns.retain_sku);

        if sku.is_empty() || sku_to_replace.is_empty() || retain_sku.is_empty() {
            return Err(TransformError::EmptyRequiredValue { row });
        }

        moves.push(MoveRecord::new(sku, sku_to_replace, retain_sku));
    }

    Ok(MoveBatch::new(force, moves))
}

/// Adapter used by the CLI and the relay: logs the outcome and lifts
/// rejections into [`crate::domain::error::AppError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvToMovesUseCase;

impl CsvToMovesUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, csv_text: &str, force: bool) -> Result<MoveBatch> {
        match transform_csv_to_moves(csv_text, force) {
            Ok(batch) => {
                tracing::info!(moves = batch.len(), force, "CSV transformed");
                Ok(batch)
            }
            Err(err) => {
                tracing::warn!(error = %err, "CSV rejected");
                Err(err.into())
            }
        }
    }

    pub fn execute_source(&self, source: &CsvSource, force: bool) -> Result<MoveBatch> {
        tracing::info!(file = %source.describe(), "processing CSV file");
        self.execute(&source.content, force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::infrastructure::csv::sample_csv;
    use serde_json::json;

    const MIXED_CSV: &str = "\
sku,skuToReplace,retainSku
197801171173,197801171173-DUPLICATE-1,197801171173
FL-PE-BASE-105,FL-PE-BASE-105-DUPLICATE-1,FL-PE-BASE-75";

    #[test]
    fn test_mixed_retain_values_end_to_end() {
        let batch = transform_csv_to_moves(MIXED_CSV, false).unwrap();
        let value = serde_json::to_value(&batch).unwrap();

        assert_eq!(
            value,
            json!({
                "force": false,
                "moves": [
                    {
                        "sku": "197801171173",
                        "skuToReplace": "197801171173-DUPLICATE-1",
                        "retainSku": "sku"
                    },
                    {
                        "sku": "FL-PE-BASE-105",
                        "skuToReplace": "FL-PE-BASE-105-DUPLICATE-1",
                        "retainSku": "FL-PE-BASE-75"
                    }
                ]
            })
        );
    }

    #[test]
    fn test_all_rows_retain_self() {
        let csv = "\
sku,skuToReplace,retainSku
197801171173,197801171173-DUPLICATE-1,197801171173
197801171180,197801171180-DUPLICATE-1,197801171180";

        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.moves.iter().all(|m| m.retain_sku == "sku"));
        assert_eq!(batch.moves[1].sku, "197801171180");
    }

    #[test]
    fn test_rows_keep_order() {
        let csv = "sku,skuToReplace,retainSku\nC,C1,C\nA,A1,A\nB,B1,X";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        let skus: Vec<&str> = batch.moves.iter().map(|m| m.sku.as_str()).collect();
        assert_eq!(skus, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_force_flag_passes_through() {
        assert!(transform_csv_to_moves(MIXED_CSV, true).unwrap().force);
        assert!(!transform_csv_to_moves(MIXED_CSV, false).unwrap().force);
    }

    #[test]
    fn test_retain_match_is_case_sensitive() {
        let csv = "sku,skuToReplace,retainSku\nabc,abc-dup,ABC";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.moves[0].retain_sku, "ABC");
    }

    #[test]
    fn test_values_are_trimmed_before_comparison() {
        let csv = "sku,skuToReplace,retainSku\n  A1 , A1-DUP ,A1  ";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.moves[0], MoveRecord::new("A1", "A1-DUP", "A1"));
        assert_eq!(batch.moves[0].retain_sku, "sku");
    }

    #[test]
    fn test_headers_in_any_order_with_extra_columns() {
        let csv = "note,retainSku,sku,skuToReplace\nfirst,B-75,B-105,B-105-DUP";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.moves[0], MoveRecord::new("B-105", "B-105-DUP", "B-75"));
    }

    #[test]
    fn test_duplicate_header_uses_first_occurrence() {
        let csv = "sku,skuToReplace,retainSku,sku\nA,A-DUP,A,Z";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.moves[0].sku, "A");
        assert_eq!(batch.moves[0].retain_sku, "sku");
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let csv = "sku,skuToReplace,retainSku\n\"A,1\",\"A,1-DUP\",\"A,1\"";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.moves[0].sku, "A,1");
        assert_eq!(batch.moves[0].retain_sku, "sku");
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv = "sku,skuToReplace,retainSku\r\nA,A-DUP,A\r\nB,B-DUP,C\r\n";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.moves[1].retain_sku, "C");
    }

    #[test]
    fn test_surrounding_blank_lines_are_ignored() {
        let csv = "\n\nsku,skuToReplace,retainSku\nA,A-DUP,A\n\n";
        assert_eq!(transform_csv_to_moves(csv, false).unwrap().len(), 1);
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let csv = "\u{FEFF}sku,skuToReplace,retainSku\nA,B,A";
        let batch = transform_csv_to_moves(csv, false).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.moves[0].sku, "A");
        assert_eq!(batch.moves[0].retain_sku, "sku");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            transform_csv_to_moves("", false),
            Err(TransformError::InsufficientRows)
        );
        assert_eq!(
            transform_csv_to_moves("   \n  ", false),
            Err(TransformError::InsufficientRows)
        );
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            transform_csv_to_moves("sku,skuToReplace,retainSku", false),
            Err(TransformError::InsufficientRows)
        );
    }

    #[test]
    fn test_missing_retain_header() {
        let csv = "sku,skuToReplace\n197801171173,197801171173-DUPLICATE-1";
        let err = transform_csv_to_moves(csv, false).unwrap_err();
        assert_eq!(err, TransformError::MissingHeaders(vec!["retainSku".into()]));
        assert_eq!(err.to_string(), "Missing required headers: retainSku");
    }

    #[test]
    fn test_missing_headers_reported_in_canonical_order() {
        let csv = "retainSku,other\nA,B";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::MissingHeaders(vec![
                "sku".into(),
                "skuToReplace".into()
            ]))
        );
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let csv = "SKU,skuToReplace,retainSku\nA,B,C";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::MissingHeaders(vec!["sku".into()]))
        );
    }

    #[test]
    fn test_empty_required_value() {
        let csv = "sku,skuToReplace,retainSku\n197801171173,,197801171173";
        let err = transform_csv_to_moves(csv, false).unwrap_err();
        assert_eq!(err, TransformError::EmptyRequiredValue { row: 2 });
        assert_eq!(err.to_string(), "Row 2 has empty values in required columns");
    }

    #[test]
    fn test_blank_quoted_value_counts_as_empty() {
        let csv = "sku,skuToReplace,retainSku\nA,A-DUP,\"   \"";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::EmptyRequiredValue { row: 2 })
        );
    }

    #[test]
    fn test_empty_value_in_ignored_column_is_fine() {
        let csv = "sku,skuToReplace,retainSku,note\nA,A-DUP,A,";
        assert_eq!(transform_csv_to_moves(csv, false).unwrap().len(), 1);
    }

    #[test]
    fn test_column_count_mismatch() {
        let csv = "sku,skuToReplace,retainSku\n197801171173,197801171173-DUPLICATE-1";
        let err = transform_csv_to_moves(csv, false).unwrap_err();
        assert_eq!(
            err,
            TransformError::ColumnCountMismatch {
                row: 2,
                actual: 2,
                expected: 3
            }
        );
        assert_eq!(err.to_string(), "Row 2 has 2 columns but expected 3");
    }

    #[test]
    fn test_too_many_columns() {
        let csv = "sku,skuToReplace,retainSku\nA,A-DUP,A,extra";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::ColumnCountMismatch {
                row: 2,
                actual: 4,
                expected: 3
            })
        );
    }

    #[test]
    fn test_blank_line_between_rows_is_a_mismatch() {
        let csv = "sku,skuToReplace,retainSku\nA,A-DUP,A\n\nB,B-DUP,B";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::ColumnCountMismatch {
                row: 3,
                actual: 1,
                expected: 3
            })
        );
    }

    #[test]
    fn test_later_failure_discards_earlier_rows() {
        let csv = "sku,skuToReplace,retainSku\nA,A-DUP,A\nB,B-DUP,B\nC,,C";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::EmptyRequiredValue { row: 4 })
        );
    }

    #[test]
    fn test_unbalanced_quote_degrades_to_mismatch() {
        let csv = "sku,skuToReplace,retainSku\n\"A,A-DUP,A";
        assert_eq!(
            transform_csv_to_moves(csv, false),
            Err(TransformError::ColumnCountMismatch {
                row: 2,
                actual: 1,
                expected: 3
            })
        );
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let first = transform_csv_to_moves(MIXED_CSV, false).unwrap();
        let second = transform_csv_to_moves(MIXED_CSV, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_file_transforms() {
        let batch = transform_csv_to_moves(&sample_csv().unwrap(), false).unwrap();
        assert_eq!(batch.len(), 6);
        assert!(batch.moves[0].retains_self());
        assert_eq!(batch.moves[5].retain_sku, "FL-PE-UMBR-75");
    }

    #[test]
    fn test_use_case_lifts_errors() {
        match CsvToMovesUseCase::new().execute("sku", false) {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, "CSV must have at least a header row and one data row")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_use_case_reads_source() {
        let source = CsvSource {
            name: "merge.csv".to_string(),
            size_bytes: MIXED_CSV.len() as u64,
            content: MIXED_CSV.to_string(),
        };
        let batch = CsvToMovesUseCase::new().execute_source(&source, true).unwrap();
        assert!(batch.force);
        assert_eq!(batch.len(), 2);
    }
}
