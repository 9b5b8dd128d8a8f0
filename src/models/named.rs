use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::error::{CsvError, Result};

/// Records whose fields are addressed by name or by position.
///
/// The collection owns one ordered field-name list; each record stores only its
/// values, laid out in that list's order. Name lookups go through a shared
/// name-to-position index so the canonical ordering never depends on how a
/// record's pairs were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCollection {
    field_names: Vec<String>,
    positions: HashMap<String, usize>,
    records: Vec<Vec<String>>,
}

impl NamedCollection {
    /// Creates an empty collection shaped by `field_names`.
    ///
    /// Duplicate names are accepted here; the first record appended against such
    /// a list fails with an "already exists" error.
    pub fn new(field_names: Vec<String>) -> Result<Self> {
        if field_names.is_empty() {
            return Err(CsvError::validation("field names are missing"));
        }

        let mut positions = HashMap::with_capacity(field_names.len());
        for (position, name) in field_names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(position);
        }

        Ok(Self { field_names, positions, records: Vec::new() })
    }

    /// Number of values every record holds, equal to the field-name count.
    pub fn expected_field_count(&self) -> usize {
        self.field_names.len()
    }

    /// The declared field names in canonical order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of `name` in the field-name list, if declared.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Appends one record given as `(field name, value)` pairs.
    ///
    /// The pairs may arrive in any order, but together they must name every
    /// declared field exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::Validation`] if:
    /// - the pair count differs from the field-name count
    /// - a pair names a field that is not declared
    /// - a field is named twice in the same record
    pub fn append(&mut self, fields: Vec<(String, String)>) -> Result<()> {
        if fields.len() != self.field_names.len() {
            return Err(CsvError::validation(format!(
                "found {} field(s) but expects {} field(s)",
                fields.len(),
                self.field_names.len()
            )));
        }

        let mut slots: Vec<Option<String>> = vec![None; self.field_names.len()];
        for (name, value) in fields {
            let position = self.field_index(&name).ok_or_else(|| {
                CsvError::validation(format!("cannot find '{}' in the field names", name))
            })?;

            let slot = &mut slots[position];
            if slot.is_some() {
                return Err(CsvError::validation(format!("field '{}' already exists", name)));
            }
            *slot = Some(value);
        }

        // Count matched and no name repeated, so every slot is filled.
        self.records.push(slots.into_iter().map(Option::unwrap_or_default).collect());
        Ok(())
    }

    /// Value at `(index, field_index)` using the field-name list's order.
    ///
    /// # Errors
    ///
    /// - [`CsvError::Index`] if `index` is past the last record
    /// - [`CsvError::Validation`] if `field_index` is outside the field-name list
    pub fn get(&self, index: usize, field_index: usize) -> Result<&str> {
        let record = self.record(index)?;
        record.get(field_index).map(String::as_str).ok_or_else(|| {
            CsvError::validation(format!(
                "field index {} is out of range (expects {} field(s))",
                field_index,
                self.field_names.len()
            ))
        })
    }

    /// Value of field `name` in record `index`.
    ///
    /// # Errors
    ///
    /// - [`CsvError::Index`] if `index` is past the last record
    /// - [`CsvError::Validation`] if `name` is not a declared field
    pub fn get_by_name(&self, index: usize, name: &str) -> Result<&str> {
        let record = self.record(index)?;
        let position = self.field_index(name).ok_or_else(|| {
            CsvError::validation(format!("field name '{}' not found in collection", name))
        })?;
        Ok(&record[position])
    }

    /// All values of one record, in field-name order.
    pub fn record(&self, index: usize) -> Result<&[String]> {
        self.records
            .get(index)
            .map(Vec::as_slice)
            .ok_or(CsvError::Index { index, len: self.records.len() })
    }

    /// Iterates over every record in order, values in field-name order.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        self.records.iter().map(Vec::as_slice)
    }

    pub(crate) fn raw_records(&self) -> &[Vec<String>] {
        &self.records
    }
}

/// One record serialized as a map keyed by field name, in declared order.
struct RecordView<'a> {
    field_names: &'a [String],
    values: &'a [String],
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.field_names.iter().zip(self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for NamedCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let records: Vec<RecordView<'_>> = self
            .records
            .iter()
            .map(|values| RecordView { field_names: &self.field_names, values })
            .collect();

        let mut state = serializer.serialize_struct("NamedCollection", 2)?;
        state.serialize_field("field_names", &self.field_names)?;
        state.serialize_field("records", &records)?;
        state.end()
    }
}
