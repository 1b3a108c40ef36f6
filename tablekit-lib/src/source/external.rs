//! External data source

use super::SourceKind;
use super::TableDataSource;
use super::parse_payload;
use crate::error::Error;
use crate::error::StoreError;
use crate::model::Record;
use crate::model::Value;

/// Host-supplied persistent record store.
///
/// The external data source forwards every operation here and holds no copy
/// of its own; the store provides its own consistency guarantees for
/// concurrent access. Failures surface as [`StoreError`] and are propagated
/// to the caller untouched.
pub trait RecordStore {
    /// Loads all records in their original order.
    fn load_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Loads the record with the given key value, if any.
    fn load(&self, key: &Value) -> Result<Option<Record>, StoreError>;

    /// Inserts or updates a record.
    fn save(&mut self, key: &Value, record: Record) -> Result<(), StoreError>;

    /// Deletes the record with the given key value. Returns `true` when a
    /// record was removed.
    fn delete(&mut self, key: &Value) -> Result<bool, StoreError>;
}

/// A data source delegating storage to a host-supplied [`RecordStore`].
///
/// Assumed always-current: the synchronization protocol never rehydrates an
/// external source, and render output carries no data snapshot for it (the
/// client fetches rows by other means).
pub struct ExternalDataSource {
    key_from: String,
    store: Box<dyn RecordStore>,
}

impl ExternalDataSource {
    /// Creates an external source forwarding to the given store.
    pub fn new(key_from: impl Into<String>, store: Box<dyn RecordStore>) -> Self {
        Self {
            key_from: key_from.into(),
            store,
        }
    }
}

impl TableDataSource for ExternalDataSource {
    fn kind(&self) -> SourceKind {
        SourceKind::External
    }

    fn purge(&mut self) -> Result<(), StoreError> {
        // The source holds no records of its own; the delegate's data is
        // not this layer's to discard.
        Ok(())
    }

    fn init_records(&mut self, payload: &serde_json::Value) -> Result<usize, Error> {
        let records = parse_payload(payload, &self.key_from)?;
        let added = records.len();
        for record in records {
            let key = record
                .key_value(&self.key_from)
                .cloned()
                .unwrap_or_default();
            self.store.save(&key, record)?;
        }
        Ok(added)
    }

    fn records(&self) -> Result<Vec<Record>, StoreError> {
        self.store.load_all()
    }

    fn record(&self, key: &Value) -> Result<Option<Record>, StoreError> {
        self.store.load(key)
    }

    fn set_record(&mut self, key: &Value, mut record: Record) -> Result<(), StoreError> {
        record.insert(self.key_from.clone(), key.clone());
        self.store.save(key, record)
    }

    fn delete_record(&mut self, key: &Value) -> Result<bool, StoreError> {
        self.store.delete(key)
    }
}

impl std::fmt::Debug for ExternalDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalDataSource")
            .field("key_from", &self.key_from)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Store stub keeping records in a vector, with an optional failure
    /// switch for propagation tests.
    #[derive(Default)]
    struct StubStore {
        records: Vec<(Value, Record)>,
        fail: bool,
    }

    impl RecordStore for StubStore {
        fn load_all(&self) -> Result<Vec<Record>, StoreError> {
            if self.fail {
                return Err(StoreError::new("load_all", "backend offline"));
            }
            Ok(self.records.iter().map(|(_, r)| r.clone()).collect())
        }

        fn load(&self, key: &Value) -> Result<Option<Record>, StoreError> {
            Ok(self
                .records
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, r)| r.clone()))
        }

        fn save(&mut self, key: &Value, record: Record) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::new("save", "backend offline"));
            }
            match self.records.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = record,
                None => self.records.push((key.clone(), record)),
            }
            Ok(())
        }

        fn delete(&mut self, key: &Value) -> Result<bool, StoreError> {
            let before = self.records.len();
            self.records.retain(|(k, _)| k != key);
            Ok(self.records.len() != before)
        }
    }

    #[test]
    fn test_forwards_crud_to_delegate() {
        let mut source = ExternalDataSource::new("id", Box::new(StubStore::default()));

        source
            .set_record(&Value::from(1i64), Record::new().set("name", "A"))
            .unwrap();
        let record = source.record(&Value::from(1i64)).unwrap().unwrap();
        assert_eq!(record.get_string("name").unwrap(), Some("A"));
        assert_eq!(record.get_int("id").unwrap(), Some(1));

        assert!(source.delete_record(&Value::from(1i64)).unwrap());
        assert!(source.records().unwrap().is_empty());
    }

    #[test]
    fn test_init_records_saves_through_delegate() {
        let mut source = ExternalDataSource::new("id", Box::new(StubStore::default()));
        let added = source
            .init_records(&json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]))
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(source.records().unwrap().len(), 2);
    }

    #[test]
    fn test_store_errors_propagate() {
        let store = StubStore {
            fail: true,
            ..StubStore::default()
        };
        let mut source = ExternalDataSource::new("id", Box::new(store));

        assert!(source.records().is_err());
        let error = source
            .set_record(&Value::from(1i64), Record::new())
            .unwrap_err();
        assert_eq!(error.operation, "save");
    }

    #[test]
    fn test_purge_is_a_no_op() {
        let mut store = StubStore::default();
        store
            .save(&Value::from(1i64), Record::new().set("id", 1i64))
            .unwrap();
        let mut source = ExternalDataSource::new("id", Box::new(store));

        source.purge().unwrap();
        assert_eq!(source.records().unwrap().len(), 1);
    }
}
