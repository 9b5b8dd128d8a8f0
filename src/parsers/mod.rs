//! Line tokenizing and whole-stream reading for comma separated values.
//!
//! # Error Handling Strategy
//!
//! Every record must match the shape fixed by the first data line, so a bad line
//! cannot be skipped and this module is strict:
//!
//! - **Construction**: field-name lists are validated before any I/O happens.
//!
//! - **Per line**: the first line that disagrees with the established field count
//!   aborts the read with [`CsvError::Structural`](crate::CsvError::Structural),
//!   citing the 1-based line number and both counts.
//!
//! - **No partial results**: records built before a failure are dropped. The reader
//!   itself stays usable and can be read again or closed.

pub mod reader;
pub mod tokenizer;

pub use reader::CsvStreamReader;
pub use tokenizer::{normalize_field, split_line, tokenize_line};
