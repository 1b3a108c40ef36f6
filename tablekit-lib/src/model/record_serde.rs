//! JSON conversion for Record.
//!
//! Records travel to and from the client as plain JSON objects:
//! `{"id": 1, "name": "A", "active": true}`. Serialization emits every cell
//! as a scalar; deserialization accepts only scalar cells, since the grid's
//! wire format has no nested structure.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;
use crate::error::PayloadError;

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a grid record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let json: serde_json::Value = map.next_value()?;
            let value = Value::from_json(&json).ok_or_else(|| {
                M::Error::custom(format!("field '{key}' holds a non-scalar value"))
            })?;
            record.fields.insert(key, value);
        }

        Ok(record)
    }
}

impl Record {
    /// Builds a record from a JSON object.
    ///
    /// `index` is the row's position in the submission payload, used for
    /// error reporting. Fails when the input is not an object or a cell
    /// holds a non-scalar value.
    pub fn from_json(json: &serde_json::Value, index: usize) -> Result<Self, PayloadError> {
        let object = match json {
            serde_json::Value::Object(map) => map,
            _ => return Err(PayloadError::row_not_object(index)),
        };

        let mut record = Record::new();
        for (key, cell) in object {
            let value = Value::from_json(cell)
                .ok_or_else(|| PayloadError::non_scalar_cell(index, key))?;
            record.fields.insert(key.clone(), value);
        }

        Ok(record)
    }

    /// Converts this record to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.to_json());
        }
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_simple_fields() {
        let record = Record::new().set("name", "Contoso").set("count", 42i64);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"name\":\"Contoso\""));
        assert!(json.contains("\"count\":42"));
    }

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"name": "Contoso", "count": 42, "active": true}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_string("name").unwrap(), Some("Contoso"));
        assert_eq!(record.get_int("count").unwrap(), Some(42));
        assert_eq!(record.get_bool("active").unwrap(), Some(true));
    }

    #[test]
    fn test_deserialize_rejects_nested_values() {
        let json = r#"{"name": {"nested": true}}"#;
        let result: Result<Record, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_rejects_non_object_row() {
        let err = Record::from_json(&json!([1, 2]), 3).unwrap_err();
        assert!(matches!(err, PayloadError::RowNotObject { index: 3 }));
    }

    #[test]
    fn test_from_json_rejects_non_scalar_cell() {
        let err = Record::from_json(&json!({"tags": ["a", "b"]}), 0).unwrap_err();
        match err {
            PayloadError::NonScalarCell { index, field } => {
                assert_eq!(index, 0);
                assert_eq!(field, "tags");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let record = Record::new()
            .set("id", 7i64)
            .set("name", "A")
            .set("ratio", 0.5f64)
            .set("active", false)
            .set("note", Value::Null);

        let back = Record::from_json(&record.to_json(), 0).unwrap();
        assert_eq!(back, record);
    }
}
