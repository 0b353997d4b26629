use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ParseError(String),
    ConfigError(String),
    SecurityError(String),
    UpstreamError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl AppError {
    /// The bare message, without the category prefix `Display` adds.
    pub fn message(&self) -> &str {
        match self {
            AppError::Internal(msg)
            | AppError::ValidationError(msg)
            | AppError::ParseError(msg)
            | AppError::ConfigError(msg)
            | AppError::SecurityError(msg)
            | AppError::UpstreamError(msg)
            | AppError::IoError(msg) => msg,
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Rejections produced while turning merge CSV text into a move batch.
///
/// Row numbers are 1-indexed and count the header, so they line up with what
/// a spreadsheet shows for the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformError {
    InsufficientRows,
    MissingHeaders(Vec<String>),
    ColumnCountMismatch {
        row: usize,
        actual: usize,
        expected: usize,
    },
    EmptyRequiredValue {
        row: usize,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InsufficientRows => {
                write!(f, "CSV must have at least a header row and one data row")
            }
            TransformError::MissingHeaders(names) => {
                write!(f, "Missing required headers: {}", names.join(", "))
            }
            TransformError::ColumnCountMismatch {
                row,
                actual,
                expected,
            } => write!(
                f,
                "Row {} has {} columns but expected {}",
                row, actual, expected
            ),
            TransformError::EmptyRequiredValue { row } => {
                write!(f, "Row {} has empty values in required columns", row)
            }
        }
    }
}

impl std::error::Error for TransformError {}
