//! Column specification types

mod pipeline;

pub use pipeline::*;

use serde::Deserialize;
use serde::Serialize;

/// Declarative description of a single grid column.
///
/// Columns carry no behavior of their own; the pipeline turns them into
/// render-ready descriptors and validates submitted cell values against
/// them.
///
/// # Example
///
/// ```
/// use tablekit_lib::column::{ColumnSpec, ColumnType};
///
/// let column = ColumnSpec::new("amount", ColumnType::Number)
///     .with_title("backend::lang.table.amount")
///     .with_min(0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// The column key. Unique and order-significant; must not collide with
    /// the widget's record key field.
    pub key: String,

    /// Translatable label key for the column header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Render/edit behavior tag.
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Ordered translatable choice labels. Only meaningful for dropdown
    /// columns with a static choice list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Lower bound for number columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound for number columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Maximum length for string columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Whether a value is required (null/missing cells fail validation).
    #[serde(default)]
    pub required: bool,

    /// Free-form type-specific attributes passed through to the client
    /// unchanged (formats, widths, placeholder text).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ColumnSpec {
    /// Creates a new column specification.
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            title: None,
            column_type,
            options: Vec::new(),
            min: None,
            max: None,
            max_length: None,
            required: false,
            extra: serde_json::Map::new(),
        }
    }

    /// Sets the translatable title key.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the static option labels.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Sets the lower bound for number columns.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound for number columns.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the maximum length for string columns.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Marks the column as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a free-form passthrough attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Render/edit behavior tag for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Single-line text.
    String,
    /// Integer or float, with optional bounds.
    Number,
    /// Boolean toggle.
    Checkbox,
    /// Choice list; static options on the column, or dynamic via the
    /// option resolver.
    Dropdown,
}
