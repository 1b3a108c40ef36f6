//! Column pipeline: render and validation directions.
//!
//! The render direction turns declared columns into a flat ordered array of
//! descriptors for the client, translating titles and static option labels.
//! The client renders columns positionally, so output order always equals
//! declared order.
//!
//! The validation direction checks submitted cell values against the column
//! type tag, producing one [`ValidationError`] per failing cell.

use serde::Deserialize;
use serde::Serialize;

use super::ColumnSpec;
use super::ColumnType;
use crate::error::ValidationError;
use crate::model::Record;
use crate::model::Value;
use crate::translate::Translator;

/// A render-ready column descriptor sent to the client.
///
/// Same shape as [`ColumnSpec`] with the key inlined and the title and
/// option labels already translated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedColumn {
    /// The column key.
    pub key: String,

    /// Resolved display title, absent when the column declares none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Render/edit behavior tag.
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Resolved static option labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Free-form declarative attributes, passed through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Resolves declared columns into render-ready descriptors.
///
/// Output order equals declaration order. Titles and static option labels
/// go through the translator; everything else passes through unchanged.
pub fn resolve_columns(columns: &[ColumnSpec], translator: &dyn Translator) -> Vec<RenderedColumn> {
    columns
        .iter()
        .map(|column| RenderedColumn {
            key: column.key.clone(),
            title: column.title.as_deref().map(|t| translator.translate(t)),
            column_type: column.column_type,
            options: column
                .options
                .iter()
                .map(|option| translator.translate(option))
                .collect(),
            min: column.min,
            max: column.max,
            max_length: column.max_length,
            required: column.required,
            extra: column.extra.clone(),
        })
        .collect()
}

/// Validates every declared column of a record.
///
/// Returns all failures instead of stopping at the first one; the save
/// handler surfaces the whole list to the client. Cells for undeclared
/// columns pass through unvalidated.
pub fn validate_record(columns: &[ColumnSpec], key_from: &str, record: &Record) -> Vec<ValidationError> {
    let row_key = record
        .key_value(key_from)
        .map(Value::display)
        .unwrap_or_default();

    let mut errors = Vec::new();
    for column in columns {
        if let Err(error) = validate_cell(column, &row_key, record.get(&column.key)) {
            errors.push(error);
        }
    }

    errors
}

/// Validates a single submitted cell value against its column.
pub fn validate_cell(
    column: &ColumnSpec,
    row_key: &str,
    value: Option<&Value>,
) -> Result<(), ValidationError> {
    let fail = |message: String| Err(ValidationError::new(&column.key, row_key, message));

    let value = match value {
        None | Some(Value::Null) => {
            if column.required {
                return fail("a value is required".to_string());
            }
            return Ok(());
        }
        Some(value) => value,
    };

    match column.column_type {
        ColumnType::String => {
            let Value::String(s) = value else {
                return fail(format!("expected a string, got {}", value.type_name()));
            };
            if let Some(max_length) = column.max_length {
                if s.chars().count() > max_length {
                    return fail(format!("exceeds the maximum length of {max_length}"));
                }
            }
        }
        ColumnType::Number => {
            let number = match value {
                Value::Int(i) => *i as f64,
                Value::Float(f) => *f,
                other => {
                    return fail(format!("expected a number, got {}", other.type_name()));
                }
            };
            if let Some(min) = column.min {
                if number < min {
                    return fail(format!("{number} is below the minimum of {min}"));
                }
            }
            if let Some(max) = column.max {
                if number > max {
                    return fail(format!("{number} is above the maximum of {max}"));
                }
            }
        }
        ColumnType::Checkbox => {
            if !matches!(value, Value::Bool(_)) {
                return fail(format!("expected a boolean, got {}", value.type_name()));
            }
        }
        ColumnType::Dropdown => {
            // Columns without static options rely on dynamically resolved
            // choices, which only exist at edit time; accept any scalar.
            if !column.options.is_empty() && !column.options.contains(&value.display()) {
                return fail(format!("'{}' is not one of the available options", value.display()));
            }
        }
    }

    Ok(())
}
