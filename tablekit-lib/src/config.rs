//! Table widget configuration

use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnSpec;

/// Default widget alias when the host supplies none.
pub const DEFAULT_ALIAS: &str = "table";

/// Configuration for a table widget, supplied once at construction.
///
/// All display flags carry their defaults; only `data_source` is required
/// (construction fails with a configuration error when it is empty).
///
/// # Example
///
/// ```
/// use tablekit_lib::column::{ColumnSpec, ColumnType};
/// use tablekit_lib::config::TableConfig;
///
/// let config = TableConfig::new("client")
///     .with_column(ColumnSpec::new("name", ColumnType::String))
///     .with_column(ColumnSpec::new("active", ColumnType::Checkbox))
///     .with_deleting(false);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Declared columns, in render order.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    /// Name of the record key field.
    ///
    /// Default: `"id"`
    #[serde(default = "default_key_from")]
    pub key_from: String,

    /// Data source alias or type identifier. Required.
    #[serde(default)]
    pub data_source: String,

    /// Records shown per page, `None` to disable pagination.
    ///
    /// Default: `None`
    #[serde(default)]
    pub records_per_page: Option<u32>,

    /// Name of the host save handler dispatched on postback.
    ///
    /// Default: `"onSave"`
    #[serde(default = "default_postback_handler_name")]
    pub postback_handler_name: String,

    /// Whether the client may add rows.
    ///
    /// Default: `true`
    #[serde(default = "default_true")]
    pub adding: bool,

    /// Whether the client may delete rows.
    ///
    /// Default: `true`
    #[serde(default = "default_true")]
    pub deleting: bool,

    /// Whether the toolbar is shown.
    ///
    /// Default: `true`
    #[serde(default = "default_true")]
    pub toolbar: bool,

    /// Fixed grid height in pixels, `None` for automatic.
    ///
    /// Default: `None`
    #[serde(default)]
    pub height: Option<u32>,

    /// Whether the grid grows with its contents.
    ///
    /// Default: `false`
    #[serde(default)]
    pub dynamic_height: bool,
}

fn default_key_from() -> String {
    "id".to_string()
}

fn default_postback_handler_name() -> String {
    "onSave".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            key_from: default_key_from(),
            data_source: String::new(),
            records_per_page: None,
            postback_handler_name: default_postback_handler_name(),
            adding: true,
            deleting: true,
            toolbar: true,
            height: None,
            dynamic_height: false,
        }
    }
}

impl TableConfig {
    /// Creates a config for the given data source with default flags.
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            ..Self::default()
        }
    }

    /// Appends a column declaration.
    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the record key field name.
    pub fn with_key_from(mut self, key_from: impl Into<String>) -> Self {
        self.key_from = key_from.into();
        self
    }

    /// Sets the per-page record count.
    pub fn with_records_per_page(mut self, records_per_page: u32) -> Self {
        self.records_per_page = Some(records_per_page);
        self
    }

    /// Sets the save handler name.
    pub fn with_postback_handler_name(mut self, name: impl Into<String>) -> Self {
        self.postback_handler_name = name.into();
        self
    }

    /// Enables or disables row adding.
    pub fn with_adding(mut self, adding: bool) -> Self {
        self.adding = adding;
        self
    }

    /// Enables or disables row deletion.
    pub fn with_deleting(mut self, deleting: bool) -> Self {
        self.deleting = deleting;
        self
    }

    /// Shows or hides the toolbar.
    pub fn with_toolbar(mut self, toolbar: bool) -> Self {
        self.toolbar = toolbar;
        self
    }

    /// Sets a fixed grid height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Enables dynamic height.
    pub fn with_dynamic_height(mut self, dynamic_height: bool) -> Self {
        self.dynamic_height = dynamic_height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.key_from, "id");
        assert_eq!(config.postback_handler_name, "onSave");
        assert!(config.adding && config.deleting && config.toolbar);
        assert!(config.records_per_page.is_none());
        assert!(config.height.is_none());
        assert!(!config.dynamic_height);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: TableConfig =
            serde_json::from_str(r#"{"dataSource": "client", "deleting": false}"#).unwrap();
        assert_eq!(config.data_source, "client");
        assert!(!config.deleting);
        assert!(config.adding);
        assert_eq!(config.key_from, "id");
    }
}
