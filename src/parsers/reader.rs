use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::error::{CsvError, Result};
use crate::models::{CsvCollection, NamedCollection, UnnamedCollection};
use crate::parsers::tokenizer::tokenize_line;

/// Reads comma separated values from a seekable source into a [`CsvCollection`].
///
/// The reader is built in one of three modes:
///
/// - [`new`](Self::new) - line 1 holds the field names, a named collection is produced
/// - [`with_field_names`](Self::with_field_names) - the caller supplies the field names
///   and line 1 is data; an empty list means unnamed
/// - [`unnamed`](Self::unnamed) - no field names, the first line fixes the field count
///
/// Every call to [`read_to_end`](Self::read_to_end) rewinds the source to byte zero
/// and builds a fresh collection, so reading twice over unchanged input yields equal
/// collections. This is why the source must implement [`Seek`].
///
/// A reader is not meant to be shared: `read_to_end` takes `&mut self`, so one
/// thread reads at a time. The collections it returns are immutable and can be
/// shared freely.
pub struct CsvStreamReader<R> {
    source: Option<R>,
    field_names: Vec<String>,
    use_first_line_for_field_names: bool,
    encoding: &'static Encoding,
}

impl<R: Read + Seek> CsvStreamReader<R> {
    /// Reader that takes its field names from line 1.
    pub fn new(source: R) -> Self {
        Self {
            source: Some(source),
            field_names: Vec::new(),
            use_first_line_for_field_names: true,
            encoding: UTF_8,
        }
    }

    /// Reader with caller-supplied field names. Line 1 is treated as data.
    ///
    /// Names are trimmed. An empty list produces an unnamed reader.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::Validation`] if any name is empty after trimming. No I/O
    /// happens before this check.
    pub fn with_field_names<S: AsRef<str>>(source: R, field_names: &[S]) -> Result<Self> {
        let field_names = validate_field_names(field_names)?;
        Ok(Self {
            source: Some(source),
            field_names,
            use_first_line_for_field_names: false,
            encoding: UTF_8,
        })
    }

    /// Reader without field names.
    pub fn unnamed(source: R) -> Self {
        Self {
            source: Some(source),
            field_names: Vec::new(),
            use_first_line_for_field_names: false,
            encoding: UTF_8,
        }
    }

    /// Decode the source with `encoding` instead of UTF-8.
    ///
    /// A byte order mark at the start of the input takes precedence.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The encoding used to decode the source when it has no byte order mark.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// The active field names: supplied at construction, or taken from line 1 by
    /// the most recent successful read. Empty for an unnamed reader.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// True once [`close`](Self::close) has released the source.
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> Result<&R> {
        self.source.as_ref().ok_or(CsvError::Closed)
    }

    /// Consume the reader, returning the source if it has not been closed.
    pub fn into_inner(self) -> Option<R> {
        self.source
    }

    /// Release the underlying source. Calling this more than once is harmless.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!("Closed CSV source");
        }
    }

    /// Reads every line from the start of the source and returns the collection.
    ///
    /// # Errors
    ///
    /// - [`CsvError::Closed`] if [`close`](Self::close) was called
    /// - [`CsvError::EmptyInput`] if the source has no lines
    /// - [`CsvError::Validation`] if line 1 is used for field names and one is empty
    /// - [`CsvError::Structural`] if a line's field count differs from the first data line
    /// - [`CsvError::Io`] if the source cannot be rewound or read
    ///
    /// On error nothing built during this call is returned.
    pub fn read_to_end(&mut self) -> Result<CsvCollection> {
        let text = self.read_source()?;
        if text.is_empty() {
            return Err(CsvError::EmptyInput);
        }

        let derive_names = self.use_first_line_for_field_names;
        let mut field_names = if derive_names { Vec::new() } else { self.field_names.clone() };
        let mut collection: Option<CsvCollection> = None;

        for (line_index, line) in split_lines(&text).into_iter().enumerate() {
            let line_number = line_index + 1;
            let values = tokenize_line(line);

            if derive_names && line_number == 1 {
                field_names = validate_field_names(&values)?;
                debug!("Using {} field name(s) from line 1", field_names.len());
                continue;
            }

            let target = match collection {
                Some(ref mut target) => target,
                None => collection.insert(new_collection(&field_names, values.len())?),
            };

            let expected = target.expected_field_count();
            if values.len() != expected {
                return Err(CsvError::Structural {
                    line: line_number,
                    found: values.len(),
                    expected,
                });
            }

            match target {
                CsvCollection::Named(named) => {
                    let pairs = named.field_names().iter().cloned().zip(values).collect();
                    named.append(pairs)?;
                }
                CsvCollection::Unnamed(unnamed) => unnamed.append(values)?,
            }
        }

        // A header line with no data rows still defines a named shape.
        let collection = match collection {
            Some(collection) => collection,
            None => new_collection(&field_names, 0)?,
        };

        debug!(
            "Read {} record(s) with {} field(s) ({})",
            collection.len(),
            collection.expected_field_count(),
            if collection.is_named() { "named" } else { "unnamed" }
        );

        if derive_names {
            self.field_names = field_names;
        }
        Ok(collection)
    }

    fn read_source(&mut self) -> Result<String> {
        let source = self.source.as_mut().ok_or(CsvError::Closed)?;
        source.seek(SeekFrom::Start(0))?;

        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;

        let (text, used_encoding, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            warn!(
                "Input contains byte sequences that are invalid in {}; replaced with U+FFFD",
                used_encoding.name()
            );
        }
        Ok(text.into_owned())
    }
}

impl CsvStreamReader<File> {
    /// Opens `path` and takes field names from line 1.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(open_file(path.as_ref())?))
    }

    /// Opens `path` with caller-supplied field names.
    ///
    /// The names are validated before the file is opened.
    pub fn open_with_field_names<S: AsRef<str>>(
        path: impl AsRef<Path>,
        field_names: &[S],
    ) -> Result<Self> {
        let field_names = validate_field_names(field_names)?;
        let mut reader = Self::unnamed(open_file(path.as_ref())?);
        reader.field_names = field_names;
        Ok(reader)
    }

    /// Opens `path` without field names.
    pub fn open_unnamed(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::unnamed(open_file(path.as_ref())?))
    }
}

/// Splits decoded text into lines ending in `\r\n`, `\n` or a lone `\r`.
///
/// A terminator at the very end does not start another line, so `"a\n"` is one
/// line while `"\n"` is one empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| CsvError::Open { path: path.to_path_buf(), source })
}

/// Shape is fixed by whichever comes first: the field-name list, or the width of
/// the first data line.
fn new_collection(field_names: &[String], width: usize) -> Result<CsvCollection> {
    if field_names.is_empty() {
        Ok(UnnamedCollection::new(width)?.into())
    } else {
        Ok(NamedCollection::new(field_names.to_vec())?.into())
    }
}

/// Trims every name and rejects any that end up empty.
fn validate_field_names<S: AsRef<str>>(field_names: &[S]) -> Result<Vec<String>> {
    field_names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(CsvError::validation(format!(
                    "field name at index {} is empty after trim",
                    index
                )));
            }
            Ok(name.to_string())
        })
        .collect()
}
