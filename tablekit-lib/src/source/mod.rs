//! Data source abstraction.
//!
//! A data source is the storage strategy backing a grid's records. The
//! widget talks to it only through the [`TableDataSource`] trait; where the
//! records actually live is the variant's concern. Two variants ship with
//! the crate: client memory (records exist only in the request/response
//! round-trip) and external (records live in a host-supplied store).

mod client_memory;
mod external;

pub use client_memory::*;
pub use external::*;

use std::collections::HashMap;

use log::debug;

use crate::error::ConfigError;
use crate::error::Error;
use crate::error::PayloadError;
use crate::error::StoreError;
use crate::model::Record;
use crate::model::Value;

/// Alias under which the client memory data source is registered.
pub const CLIENT_SOURCE_ALIAS: &str = "client";

/// Tag identifying a data source variant.
///
/// Carried by every source so the synchronization protocol can branch on it
/// without inspecting the concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Records live only in the request/response round-trip.
    ClientMemory,
    /// Records live in a host-supplied store.
    External,
}

/// Uniform record storage contract for the table widget.
///
/// `records()` returns rows in insertion order; the order is what the
/// client renders and what round-trips through submissions. At most one
/// source instance is active per widget per request.
pub trait TableDataSource: std::fmt::Debug {
    /// Returns the variant tag of this source.
    fn kind(&self) -> SourceKind;

    /// Removes all held records. Idempotent.
    fn purge(&mut self) -> Result<(), StoreError>;

    /// Parses an ordered collection of row objects from a submission
    /// payload and populates the store. Returns the number of rows added.
    ///
    /// The payload is either a JSON array of row objects or a JSON string
    /// containing one. The whole call fails on the first malformed row
    /// (abort policy); for the client memory source a failed call inserts
    /// nothing.
    fn init_records(&mut self, payload: &serde_json::Value) -> Result<usize, Error>;

    /// Returns all records in insertion order.
    fn records(&self) -> Result<Vec<Record>, StoreError>;

    /// Returns the record with the given key value, if any.
    fn record(&self, key: &Value) -> Result<Option<Record>, StoreError>;

    /// Inserts or updates the record with the given key value.
    ///
    /// The record's key field is set to `key`. Updates keep the record's
    /// position; inserts append.
    fn set_record(&mut self, key: &Value, record: Record) -> Result<(), StoreError>;

    /// Deletes the record with the given key value. Returns `true` when a
    /// record was removed.
    fn delete_record(&mut self, key: &Value) -> Result<bool, StoreError>;
}

/// Parses a submission payload into records.
///
/// Shared by the source variants: accepts a JSON array of row objects, or a
/// JSON string containing one (clients submit the grid as a serialized form
/// field). Every row must be an object carrying the key field with scalar
/// cells; the first malformed row fails the whole call.
pub fn parse_payload(
    payload: &serde_json::Value,
    key_from: &str,
) -> Result<Vec<Record>, PayloadError> {
    let parsed;
    let payload = match payload {
        serde_json::Value::String(raw) => {
            parsed = serde_json::from_str::<serde_json::Value>(raw)?;
            &parsed
        }
        other => other,
    };

    let rows = match payload {
        serde_json::Value::Array(rows) => rows,
        _ => return Err(PayloadError::NotAnArray),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let record = Record::from_json(row, index)?;
        if !record.contains(key_from) {
            return Err(PayloadError::missing_key_field(index, key_from));
        }
        records.push(record);
    }

    Ok(records)
}

/// Factory constructing a data source for a given record key field.
pub type DataSourceFactory = Box<dyn Fn(&str) -> Box<dyn TableDataSource>>;

/// Registry resolving data source identifiers to constructible sources.
///
/// Maps a stable string key (a short alias such as `"client"` or a
/// fully-qualified type identifier) to a factory. Populated once at
/// startup; hosts register factories for their external stores. Unknown
/// identifiers fail with [`ConfigError::UnknownDataSource`] at widget
/// construction, never later.
pub struct DataSourceRegistry {
    factories: HashMap<String, DataSourceFactory>,
}

impl Default for DataSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSourceRegistry {
    /// Creates a registry with the built-in `"client"` alias registered.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(CLIENT_SOURCE_ALIAS, |key_from| {
            Box::new(ClientMemoryDataSource::new(key_from))
        });
        registry
    }

    /// Registers a factory under the given identifier, replacing any
    /// previous registration.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Box<dyn TableDataSource> + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Returns `true` if the identifier is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Constructs the data source registered under `id`.
    pub fn resolve(
        &self,
        id: &str,
        key_from: &str,
    ) -> Result<Box<dyn TableDataSource>, ConfigError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ConfigError::unknown_source(id))?;
        debug!("resolved data source '{id}' (key field '{key_from}')");
        Ok(factory(key_from))
    }
}

impl std::fmt::Debug for DataSourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceRegistry")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_registry_resolves_client_alias() {
        let registry = DataSourceRegistry::new();
        let source = registry.resolve(CLIENT_SOURCE_ALIAS, "id").unwrap();
        assert_eq!(source.kind(), SourceKind::ClientMemory);
    }

    #[test]
    fn test_registry_rejects_unknown_identifier() {
        let registry = DataSourceRegistry::new();
        let error = registry.resolve("nope", "id").unwrap_err();
        assert!(matches!(error, ConfigError::UnknownDataSource { ref id } if id == "nope"));
    }

    #[test]
    fn test_registry_accepts_host_registrations() {
        let mut registry = DataSourceRegistry::new();
        registry.register("acme.orders", |key_from| {
            Box::new(ClientMemoryDataSource::new(key_from))
        });
        assert!(registry.contains("acme.orders"));
        assert!(registry.resolve("acme.orders", "id").is_ok());
    }

    #[test]
    fn test_parse_payload_preserves_order() {
        let payload = json!([{"id": 2, "name": "B"}, {"id": 1, "name": "A"}]);
        let records = parse_payload(&payload, "id").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_int("id").unwrap(), Some(2));
        assert_eq!(records[1].get_int("id").unwrap(), Some(1));
    }

    #[test]
    fn test_parse_payload_accepts_json_string() {
        let payload = json!(r#"[{"id": 1, "name": "A"}]"#);
        let records = parse_payload(&payload, "id").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_payload_rejects_missing_key_field() {
        let payload = json!([{"id": 1}, {"name": "B"}]);
        let error = parse_payload(&payload, "id").unwrap_err();
        match error {
            PayloadError::MissingKeyField { index, field } => {
                assert_eq!(index, 1);
                assert_eq!(field, "id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_payload_rejects_non_array() {
        let error = parse_payload(&json!({"id": 1}), "id").unwrap_err();
        assert!(matches!(error, PayloadError::NotAnArray));
    }
}
