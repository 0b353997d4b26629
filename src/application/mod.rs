pub mod use_cases;

pub use use_cases::csv_to_moves::{transform_csv_to_moves, CsvToMovesUseCase};
pub use use_cases::merge_skus::MergeSkusUseCase;
