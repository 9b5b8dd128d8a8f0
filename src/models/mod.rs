//! Record collections produced by the CSV reader.
//!
//! - [`NamedCollection`] - records addressed by field name or field position
//! - [`UnnamedCollection`] - records addressed by field position only
//! - [`CsvCollection`] - the tagged variant returned from a read
//!
//! Collections are only mutated while a read is in progress. Once handed to the
//! caller they expose read-only accessors and can be shared across threads.

pub mod named;
pub mod unnamed;

use serde::Serialize;

use crate::error::Result;

pub use named::NamedCollection;
pub use unnamed::UnnamedCollection;

/// The collection produced by [`CsvStreamReader::read_to_end`](crate::CsvStreamReader::read_to_end).
///
/// Which variant comes back is decided before parsing starts: a field-name list
/// (supplied or taken from line 1) produces `Named`, otherwise `Unnamed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CsvCollection {
    Named(NamedCollection),
    Unnamed(UnnamedCollection),
}

impl CsvCollection {
    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            CsvCollection::Named(c) => c.len(),
            CsvCollection::Unnamed(c) => c.len(),
        }
    }

    /// True if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of values every record holds.
    pub fn expected_field_count(&self) -> usize {
        match self {
            CsvCollection::Named(c) => c.expected_field_count(),
            CsvCollection::Unnamed(c) => c.expected_field_count(),
        }
    }

    /// Field names for a named collection; `None` for an unnamed one.
    pub fn field_names(&self) -> Option<&[String]> {
        match self {
            CsvCollection::Named(c) => Some(c.field_names()),
            CsvCollection::Unnamed(_) => None,
        }
    }

    /// Positional lookup, available on both variants.
    pub fn get(&self, index: usize, field_index: usize) -> Result<&str> {
        match self {
            CsvCollection::Named(c) => c.get(index, field_index),
            CsvCollection::Unnamed(c) => c.get(index, field_index),
        }
    }

    /// All values of one record, in field order.
    pub fn record(&self, index: usize) -> Result<&[String]> {
        match self {
            CsvCollection::Named(c) => c.record(index),
            CsvCollection::Unnamed(c) => c.record(index),
        }
    }

    /// Iterates over every record in order, on either variant.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        let records = match self {
            CsvCollection::Named(c) => c.raw_records(),
            CsvCollection::Unnamed(c) => c.raw_records(),
        };
        records.iter().map(Vec::as_slice)
    }

    /// True for the `Named` variant.
    pub fn is_named(&self) -> bool {
        matches!(self, CsvCollection::Named(_))
    }

    /// Borrow as a named collection, if it is one.
    pub fn as_named(&self) -> Option<&NamedCollection> {
        match self {
            CsvCollection::Named(c) => Some(c),
            CsvCollection::Unnamed(_) => None,
        }
    }

    /// Borrow as an unnamed collection, if it is one.
    pub fn as_unnamed(&self) -> Option<&UnnamedCollection> {
        match self {
            CsvCollection::Unnamed(c) => Some(c),
            CsvCollection::Named(_) => None,
        }
    }

    /// Unwrap into a named collection, if it is one.
    pub fn into_named(self) -> Option<NamedCollection> {
        match self {
            CsvCollection::Named(c) => Some(c),
            CsvCollection::Unnamed(_) => None,
        }
    }

    /// Unwrap into an unnamed collection, if it is one.
    pub fn into_unnamed(self) -> Option<UnnamedCollection> {
        match self {
            CsvCollection::Unnamed(c) => Some(c),
            CsvCollection::Named(_) => None,
        }
    }
}

impl From<NamedCollection> for CsvCollection {
    fn from(collection: NamedCollection) -> Self {
        CsvCollection::Named(collection)
    }
}

impl From<UnnamedCollection> for CsvCollection {
    fn from(collection: UnnamedCollection) -> Self {
        CsvCollection::Unnamed(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;

    fn unnamed() -> CsvCollection {
        let mut c = UnnamedCollection::new(2).unwrap();
        c.append(vec!["a".to_string(), "b".to_string()]).unwrap();
        c.into()
    }

    #[test]
    fn test_variant_accessors() {
        let collection = unnamed();
        assert!(!collection.is_named());
        assert!(collection.as_named().is_none());
        assert!(collection.field_names().is_none());
        assert_eq!(collection.expected_field_count(), 2);
        assert_eq!(collection.get(0, 1).unwrap(), "b");
        assert!(collection.into_unnamed().is_some());
    }

    #[test]
    fn test_positional_lookup_one_past_end() {
        let collection = unnamed();
        assert!(matches!(collection.get(1, 0), Err(CsvError::Index { .. })));
    }

    #[test]
    fn test_records_iterates_both_variants() {
        let collection = unnamed();
        let rows: Vec<&[String]> = collection.records().collect();
        assert_eq!(rows, vec![["a", "b"]]);

        let mut named = NamedCollection::new(vec!["x".to_string(), "y".to_string()]).unwrap();
        named.append(vec![("y".to_string(), "2".to_string()), ("x".to_string(), "1".to_string())]).unwrap();
        let named: CsvCollection = named.into();
        let rows: Vec<Vec<&str>> =
            named.records().map(|r| r.iter().map(String::as_str).collect()).collect();
        assert_eq!(rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_collections_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CsvCollection>();
    }

    #[test]
    fn test_serialized_with_kind_tag() {
        let json = serde_json::to_value(unnamed()).unwrap();
        assert_eq!(json["kind"], "unnamed");
        assert_eq!(json["expected_field_count"], 2);
        assert_eq!(json["records"][0][1], "b");
    }
}
