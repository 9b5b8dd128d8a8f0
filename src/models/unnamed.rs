use serde::Serialize;

use crate::error::{CsvError, Result};

/// Records addressed only by position. Every record has the same arity,
/// fixed when the collection is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnnamedCollection {
    expected_field_count: usize,
    records: Vec<Vec<String>>,
}

impl UnnamedCollection {
    /// Creates an empty collection whose records all have `expected_field_count` values.
    pub fn new(expected_field_count: usize) -> Result<Self> {
        if expected_field_count == 0 {
            return Err(CsvError::validation("expected field count must be larger than 0"));
        }
        Ok(Self { expected_field_count, records: Vec::new() })
    }

    /// Number of values every record holds.
    pub fn expected_field_count(&self) -> usize {
        self.expected_field_count
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends one record. Its length must match the collection's arity.
    pub fn append(&mut self, values: Vec<String>) -> Result<()> {
        if values.len() != self.expected_field_count {
            return Err(CsvError::validation(format!(
                "found {} field(s) but expects {} field(s)",
                values.len(),
                self.expected_field_count
            )));
        }
        self.records.push(values);
        Ok(())
    }

    /// Value at `(index, field_index)`.
    ///
    /// # Errors
    ///
    /// - [`CsvError::Index`] if `index` is past the last record
    /// - [`CsvError::Validation`] if `field_index` is outside the declared arity
    pub fn get(&self, index: usize, field_index: usize) -> Result<&str> {
        let record = self.record(index)?;
        if field_index >= self.expected_field_count {
            return Err(CsvError::validation(format!(
                "field index {} is out of range (expects {} field(s))",
                field_index, self.expected_field_count
            )));
        }
        Ok(&record[field_index])
    }

    /// All values of one record, in field order.
    pub fn record(&self, index: usize) -> Result<&[String]> {
        self.records
            .get(index)
            .map(Vec::as_slice)
            .ok_or(CsvError::Index { index, len: self.records.len() })
    }

    /// Iterates over every record in order.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        self.records.iter().map(Vec::as_slice)
    }

    pub(crate) fn raw_records(&self) -> &[Vec<String>] {
        &self.records
    }
}
