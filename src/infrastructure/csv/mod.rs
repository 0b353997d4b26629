// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Line tokenizing, file decoding, and the sample merge file

mod csv_source;
mod line_tokenizer;
mod sample;

pub use csv_source::{decode_csv_bytes, read_csv_file, CsvSource};
pub use line_tokenizer::{tokenize, ParsedLine};
pub use sample::{sample_csv, write_sample_csv};
