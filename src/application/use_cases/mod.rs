pub mod csv_to_moves;
pub mod merge_skus;
