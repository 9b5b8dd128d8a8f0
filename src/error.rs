//! Error types for reading and querying CSV collections.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the reader and the collections can report.
///
/// All variants are deterministic: malformed input fails the same way on every
/// attempt, so nothing in this crate retries.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Malformed construction input or a record that does not fit the declared shape.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A line's field count disagrees with the shape established by the collection.
    #[error("line number {line} has {found} field(s) but expects {expected} field(s)")]
    Structural { line: usize, found: usize, expected: usize },

    /// The source contained no lines at all.
    #[error("cannot read past end of empty input")]
    EmptyInput,

    /// A record index outside `[0, len)`.
    #[error("record index {index} is out of range (collection has {len} record(s))")]
    Index { index: usize, len: usize },

    /// The reader's source has already been released.
    #[error("reader has been closed")]
    Closed,

    /// Failed to open a file-backed source.
    #[error("failed to open CSV file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CsvError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        CsvError::Validation(message.into())
    }

    /// True for failures caused by the shape of the input stream itself.
    pub fn is_structural(&self) -> bool {
        matches!(self, CsvError::Structural { .. } | CsvError::EmptyInput)
    }
}

/// A convenience `Result` alias using [`CsvError`].
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_message_cites_line_and_counts() {
        let err = CsvError::Structural { line: 3, found: 3, expected: 4 };
        assert_eq!(err.to_string(), "line number 3 has 3 field(s) but expects 4 field(s)");
        assert!(err.is_structural());
    }

    #[test]
    fn test_empty_input_is_structural() {
        assert!(CsvError::EmptyInput.is_structural());
        assert!(!CsvError::Closed.is_structural());
        assert!(!CsvError::Index { index: 1, len: 1 }.is_structural());
    }

    #[test]
    fn test_open_error_mentions_path() {
        let err = CsvError::Open {
            path: PathBuf::from("/tmp/missing.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/tmp/missing.csv"));
    }
}
