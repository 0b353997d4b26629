pub mod error;
pub mod moves;
