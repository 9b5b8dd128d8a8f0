//! CSV Records - read comma separated values into queryable collections
//!
//! This library reads a whole CSV source into memory and exposes it through one of
//! two collection shapes:
//!
//! - Named collections, whose field names come from line 1 or from the caller
//! - Unnamed collections, whose shape is fixed by the width of the first line
//!
//! Fields may contain commas when wrapped in double quotes. Every line must have the
//! same number of fields as the first data line.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use csv_records::CsvStreamReader;
//!
//! let data = "Id,First Name,Mailing Address\n1,Jimmy,\"Some street, XX, yy...\"\n";
//! let mut reader = CsvStreamReader::new(Cursor::new(data));
//! let collection = reader.read_to_end()?;
//!
//! let named = collection.as_named().unwrap();
//! assert_eq!(named.get_by_name(0, "Mailing Address")?, "Some street, XX, yy...");
//! assert_eq!(named.get(0, 1)?, "Jimmy");
//! # Ok::<(), csv_records::CsvError>(())
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use error::{CsvError, Result};
pub use models::{CsvCollection, NamedCollection, UnnamedCollection};
pub use parsers::reader::CsvStreamReader;
pub use parsers::tokenizer::tokenize_line;
