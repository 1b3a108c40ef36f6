//! Client memory data source

use super::SourceKind;
use super::TableDataSource;
use super::parse_payload;
use crate::error::Error;
use crate::error::StoreError;
use crate::model::Record;
use crate::model::Value;

/// A data source whose records live only in the request/response
/// round-trip.
///
/// Created empty at the start of each request and discarded at the end; the
/// client holds the authoritative copy between requests and resubmits it
/// with every data-submitting request. CRUD operations are pure in-memory
/// mutation and never fail.
///
/// # Example
///
/// ```
/// use tablekit_lib::model::{Record, Value};
/// use tablekit_lib::source::{ClientMemoryDataSource, TableDataSource};
///
/// let mut source = ClientMemoryDataSource::new("id");
/// source.set_record(&Value::from(1i64), Record::new().set("name", "A")).unwrap();
/// assert_eq!(source.records().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ClientMemoryDataSource {
    key_from: String,
    records: Vec<Record>,
}

impl ClientMemoryDataSource {
    /// Creates an empty client memory source keyed by the given field.
    pub fn new(key_from: impl Into<String>) -> Self {
        Self {
            key_from: key_from.into(),
            records: Vec::new(),
        }
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.key_value(&self.key_from) == Some(key))
    }
}

impl TableDataSource for ClientMemoryDataSource {
    fn kind(&self) -> SourceKind {
        SourceKind::ClientMemory
    }

    fn purge(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        Ok(())
    }

    fn init_records(&mut self, payload: &serde_json::Value) -> Result<usize, Error> {
        // Parse fully before touching the store so a malformed payload
        // leaves prior state untouched.
        let records = parse_payload(payload, &self.key_from)?;
        let added = records.len();
        self.records.extend(records);
        Ok(added)
    }

    fn records(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.clone())
    }

    fn record(&self, key: &Value) -> Result<Option<Record>, StoreError> {
        Ok(self.position(key).map(|index| self.records[index].clone()))
    }

    fn set_record(&mut self, key: &Value, mut record: Record) -> Result<(), StoreError> {
        record.insert(self.key_from.clone(), key.clone());
        match self.position(key) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        Ok(())
    }

    fn delete_record(&mut self, key: &Value) -> Result<bool, StoreError> {
        match self.position(key) {
            Some(index) => {
                self.records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::PayloadError;

    #[test]
    fn test_init_records_preserves_payload_order() {
        let mut source = ClientMemoryDataSource::new("id");
        let added = source
            .init_records(&json!([{"id": 3, "name": "C"}, {"id": 1, "name": "A"}]))
            .unwrap();
        assert_eq!(added, 2);

        let keys: Vec<_> = source
            .records()
            .unwrap()
            .iter()
            .map(|r| r.get_int("id").unwrap().unwrap())
            .collect();
        assert_eq!(keys, [3, 1]);
    }

    #[test]
    fn test_init_records_aborts_without_partial_insert() {
        let mut source = ClientMemoryDataSource::new("id");
        let error = source
            .init_records(&json!([{"id": 1}, {"name": "no key"}]))
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Payload(PayloadError::MissingKeyField { .. })
        ));
        assert!(source.records().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_through_serialized_records() {
        let mut source = ClientMemoryDataSource::new("id");
        source
            .init_records(&json!([{"id": 1, "name": "A", "active": true}, {"id": 2, "name": "B", "active": false}]))
            .unwrap();

        let snapshot = serde_json::to_value(source.records().unwrap()).unwrap();

        let mut rehydrated = ClientMemoryDataSource::new("id");
        rehydrated.init_records(&snapshot).unwrap();
        assert_eq!(rehydrated.records().unwrap(), source.records().unwrap());
    }

    #[test]
    fn test_purge_is_idempotent() {
        let mut source = ClientMemoryDataSource::new("id");
        source.init_records(&json!([{"id": 1}])).unwrap();

        source.purge().unwrap();
        assert!(source.records().unwrap().is_empty());
        source.purge().unwrap();
        assert!(source.records().unwrap().is_empty());
    }

    #[test]
    fn test_set_record_updates_in_place_and_appends() {
        let mut source = ClientMemoryDataSource::new("id");
        source
            .init_records(&json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]))
            .unwrap();

        source
            .set_record(&Value::from(1i64), Record::new().set("name", "A2"))
            .unwrap();
        source
            .set_record(&Value::from(3i64), Record::new().set("name", "C"))
            .unwrap();

        let records = source.records().unwrap();
        assert_eq!(records[0].get_string("name").unwrap(), Some("A2"));
        assert_eq!(records[0].get_int("id").unwrap(), Some(1));
        assert_eq!(records[2].get_string("name").unwrap(), Some("C"));
    }

    #[test]
    fn test_delete_record() {
        let mut source = ClientMemoryDataSource::new("id");
        source.init_records(&json!([{"id": 1}, {"id": 2}])).unwrap();

        assert!(source.delete_record(&Value::from(1i64)).unwrap());
        assert!(!source.delete_record(&Value::from(1i64)).unwrap());
        assert_eq!(source.records().unwrap().len(), 1);
    }

    #[test]
    fn test_record_lookup_by_key() {
        let mut source = ClientMemoryDataSource::new("code");
        source
            .init_records(&json!([{"code": "x", "name": "X"}]))
            .unwrap();

        let found = source.record(&Value::from("x")).unwrap().unwrap();
        assert_eq!(found.get_string("name").unwrap(), Some("X"));
        assert!(source.record(&Value::from("y")).unwrap().is_none());
    }
}
