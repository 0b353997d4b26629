mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
mod shared;

pub use app::run;
pub use application::{transform_csv_to_moves, CsvToMovesUseCase, MergeSkusUseCase};
pub use domain::error::{AppError, TransformError};
pub use domain::moves::{MoveBatch, MoveRecord};
pub use infrastructure::csv::{tokenize, ParsedLine};
