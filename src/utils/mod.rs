pub mod environment;
pub mod files;

pub use environment::{max_file_bytes, resolve_encoding};
pub use files::{open_csv_file, validate_file_size};
