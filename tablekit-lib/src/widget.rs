//! The Table widget.
//!
//! Owns the declared columns, the resolved data source, and the per-request
//! synchronization state. The host constructs one widget per inbound
//! request, renders it through [`Table::render_vars`], and dispatches its
//! save handler (named by the configuration) against the data source.

use log::debug;

use crate::column::RenderedColumn;
use crate::column::resolve_columns;
use crate::column::validate_record;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::error::Error;
use crate::error::PayloadError;
use crate::error::StoreError;
use crate::error::ValidationError;
use crate::model::Record;
use crate::options::DropdownOption;
use crate::options::DropdownOptionsResponse;
use crate::options::OptionResolverChain;
use crate::render::TableVars;
use crate::request::TableRequest;
use crate::source::DataSourceRegistry;
use crate::source::SourceKind;
use crate::source::TableDataSource;
use crate::sync::SyncState;
use crate::sync::rehydrate;
use crate::translate::NoopTranslator;
use crate::translate::Translator;

/// An editable-grid widget instance serving one request/response cycle.
///
/// Construction validates the configuration, resolves the data source
/// through the registry, and runs the synchronization protocol against the
/// inbound request, in that order, so every later operation sees only
/// rehydrated state.
///
/// # Example
///
/// ```
/// use tablekit_lib::column::{ColumnSpec, ColumnType};
/// use tablekit_lib::config::TableConfig;
/// use tablekit_lib::request::TableRequest;
/// use tablekit_lib::Table;
/// use tablekit_lib::source::DataSourceRegistry;
///
/// let config = TableConfig::new("client")
///     .with_column(ColumnSpec::new("name", ColumnType::String));
/// let registry = DataSourceRegistry::new();
///
/// let table = Table::new("table", config, &registry, &TableRequest::get()).unwrap();
/// assert!(table.render_vars().unwrap().data.as_array().unwrap().is_empty());
/// ```
pub struct Table {
    alias: String,
    config: TableConfig,
    data_source: Box<dyn TableDataSource>,
    sync_state: SyncState,
    resolvers: OptionResolverChain,
    translator: Box<dyn Translator>,
}

impl Table {
    /// Constructs a widget for one request.
    ///
    /// Fails with [`ConfigError`], before any data source is created, when
    /// the configuration names no data source, the identifier is not
    /// registered, or the column declarations break the key invariants.
    /// Payload errors from rehydration also abort construction.
    pub fn new(
        alias: impl Into<String>,
        config: TableConfig,
        registry: &DataSourceRegistry,
        request: &TableRequest,
    ) -> Result<Self, Error> {
        let alias = alias.into();

        if config.data_source.is_empty() {
            return Err(ConfigError::MissingDataSource.into());
        }
        Self::check_columns(&config)?;

        let mut data_source = registry.resolve(&config.data_source, &config.key_from)?;

        let sync_state = rehydrate(&alias, data_source.as_mut(), request)?;
        debug!("table '{alias}' initialized, sync state {sync_state:?}");

        Ok(Self {
            alias,
            config,
            data_source,
            sync_state,
            resolvers: OptionResolverChain::new(),
            translator: Box::new(NoopTranslator),
        })
    }

    fn check_columns(config: &TableConfig) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for column in &config.columns {
            if column.key == config.key_from {
                return Err(ConfigError::reserved_column(&column.key));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ConfigError::duplicate_column(&column.key));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the widget alias.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the widget configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the synchronization state of this request.
    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }

    /// Returns the active data source.
    pub fn data_source(&self) -> &dyn TableDataSource {
        self.data_source.as_ref()
    }

    /// Returns the active data source mutably, for save handlers.
    pub fn data_source_mut(&mut self) -> &mut dyn TableDataSource {
        self.data_source.as_mut()
    }

    /// Returns the save handler name the host dispatches on postback.
    pub fn postback_handler_name(&self) -> &str {
        &self.config.postback_handler_name
    }

    // =========================================================================
    // Extension points
    // =========================================================================

    /// Replaces the translator used for column titles and option labels.
    pub fn set_translator(&mut self, translator: Box<dyn Translator>) {
        self.translator = translator;
    }

    /// Registers a dynamic dropdown option resolver.
    ///
    /// Resolvers run in registration order; the first non-empty result
    /// wins.
    pub fn register_option_resolver<F>(&mut self, resolver: F)
    where
        F: Fn(&str, &Record) -> Vec<DropdownOption> + 'static,
    {
        self.resolvers.register(resolver);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Prepares the view data for the host's template.
    pub fn render_vars(&self) -> Result<TableVars, Error> {
        let is_client = self.data_source.kind() == SourceKind::ClientMemory;

        let data = if is_client {
            let records = self.data_source.records()?;
            serde_json::Value::Array(records.iter().map(Record::to_json).collect())
        } else {
            serde_json::Value::Array(Vec::new())
        };

        Ok(TableVars {
            columns: self.rendered_columns(),
            records_key_from: self.config.key_from.clone(),
            records_per_page: self.config.records_per_page,
            postback_handler_name: self.config.postback_handler_name.clone(),
            adding: self.config.adding,
            deleting: self.config.deleting,
            toolbar: self.config.toolbar,
            height: self.config.height,
            dynamic_height: self.config.dynamic_height,
            client_data_source_class: if is_client { "client" } else { "server" }.to_string(),
            data,
        })
    }

    /// Resolves the declared columns into render-ready descriptors, in
    /// declared order.
    pub fn rendered_columns(&self) -> Vec<RenderedColumn> {
        resolve_columns(&self.config.columns, self.translator.as_ref())
    }

    /// Validates every record in the data source against the declared
    /// columns.
    ///
    /// Returns all per-cell failures for the save handler to surface; an
    /// empty list means every record conforms.
    pub fn validate_records(&self) -> Result<Vec<ValidationError>, StoreError> {
        let mut errors = Vec::new();
        for record in self.data_source.records()? {
            errors.extend(validate_record(
                &self.config.columns,
                &self.config.key_from,
                &record,
            ));
        }
        Ok(errors)
    }

    /// Serves an edit-time dropdown-options request.
    ///
    /// Reads the required `column` parameter and the optional `rowData`
    /// snapshot, then queries the registered resolvers. No registered
    /// resolver, or all-empty results, yield an empty option list.
    pub fn dropdown_options(
        &self,
        request: &TableRequest,
    ) -> Result<DropdownOptionsResponse, Error> {
        let column = match request.param("column") {
            None => return Err(PayloadError::missing_parameter("column").into()),
            Some(serde_json::Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(PayloadError::invalid_parameter("column", "a string").into());
            }
        };

        let row_data = match request.param("rowData") {
            None => Record::new(),
            Some(param) => parse_row_data(param)?,
        };

        Ok(DropdownOptionsResponse {
            options: self.resolvers.resolve(&column, &row_data),
        })
    }
}

/// Parses the `rowData` request parameter into a record.
///
/// Accepts a JSON object or a JSON string containing one.
fn parse_row_data(param: &serde_json::Value) -> Result<Record, PayloadError> {
    let parsed;
    let param = match param {
        serde_json::Value::String(raw) => {
            parsed = serde_json::from_str::<serde_json::Value>(raw)?;
            &parsed
        }
        other => other,
    };

    Record::from_json(param, 0)
        .map_err(|_| PayloadError::invalid_parameter("rowData", "a JSON object of scalar cells"))
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("alias", &self.alias)
            .field("data_source", &self.config.data_source)
            .field("sync_state", &self.sync_state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::column::ColumnSpec;
    use crate::column::ColumnType;

    fn config() -> TableConfig {
        TableConfig::new("client")
            .with_column(ColumnSpec::new("name", ColumnType::String))
            .with_column(ColumnSpec::new("active", ColumnType::Checkbox))
    }

    #[test]
    fn test_missing_data_source_is_fatal() {
        let registry = DataSourceRegistry::new();
        let error = Table::new(
            "table",
            TableConfig::default(),
            &registry,
            &TableRequest::get(),
        )
        .unwrap_err();
        assert!(matches!(
            error,
            Error::Config(ConfigError::MissingDataSource)
        ));
    }

    #[test]
    fn test_unknown_data_source_is_fatal() {
        let registry = DataSourceRegistry::new();
        let error = Table::new(
            "table",
            TableConfig::new("mystery"),
            &registry,
            &TableRequest::get(),
        )
        .unwrap_err();
        assert!(matches!(
            error,
            Error::Config(ConfigError::UnknownDataSource { .. })
        ));
    }

    #[test]
    fn test_column_key_colliding_with_key_field_is_fatal() {
        let registry = DataSourceRegistry::new();
        let config = TableConfig::new("client")
            .with_column(ColumnSpec::new("id", ColumnType::String));
        let error = Table::new("table", config, &registry, &TableRequest::get()).unwrap_err();
        assert!(matches!(
            error,
            Error::Config(ConfigError::ReservedColumnKey { .. })
        ));
    }

    #[test]
    fn test_duplicate_column_key_is_fatal() {
        let registry = DataSourceRegistry::new();
        let config = TableConfig::new("client")
            .with_column(ColumnSpec::new("name", ColumnType::String))
            .with_column(ColumnSpec::new("name", ColumnType::Dropdown));
        let error = Table::new("table", config, &registry, &TableRequest::get()).unwrap_err();
        assert!(matches!(
            error,
            Error::Config(ConfigError::DuplicateColumnKey { .. })
        ));
    }

    #[test]
    fn test_renaming_a_column_key_keeps_declared_order() {
        let registry = DataSourceRegistry::new();
        let config = TableConfig::new("client")
            .with_column(ColumnSpec::new("zebra", ColumnType::String))
            .with_column(ColumnSpec::new("apple", ColumnType::String));

        let table = Table::new("table", config, &registry, &TableRequest::get()).unwrap();
        let keys: Vec<_> = table
            .rendered_columns()
            .iter()
            .map(|c| c.key.clone())
            .collect();
        assert_eq!(keys, ["zebra", "apple"]);
    }

    #[test]
    fn test_dropdown_options_requires_column_parameter() {
        let registry = DataSourceRegistry::new();
        let table = Table::new("table", config(), &registry, &TableRequest::get()).unwrap();

        let error = table.dropdown_options(&TableRequest::post()).unwrap_err();
        assert!(matches!(
            error,
            Error::Payload(PayloadError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_dropdown_options_without_resolvers_is_empty() {
        let registry = DataSourceRegistry::new();
        let table = Table::new("table", config(), &registry, &TableRequest::get()).unwrap();

        let request = TableRequest::post()
            .with_param("column", json!("status"))
            .with_param("rowData", json!({"id": 1}));
        let response = table.dropdown_options(&request).unwrap();
        assert!(response.options.is_empty());
    }

    #[test]
    fn test_dropdown_options_pass_row_data_to_resolver() {
        let registry = DataSourceRegistry::new();
        let mut table = Table::new("table", config(), &registry, &TableRequest::get()).unwrap();
        table.register_option_resolver(|column, row| {
            let id = row.get_int("id").ok().flatten().unwrap_or(0);
            vec![DropdownOption::new(id, format!("{column}-{id}"))]
        });

        let request = TableRequest::post()
            .with_param("column", json!("status"))
            .with_param("rowData", json!(r#"{"id": 5}"#));
        let response = table.dropdown_options(&request).unwrap();
        assert_eq!(response.options[0].label, "status-5");
    }

    #[test]
    fn test_validate_records_collects_failures_across_rows() {
        let registry = DataSourceRegistry::new();
        let request = TableRequest::post().with_param(
            "tableTableData",
            json!([
                {"id": 1, "name": "ok", "active": true},
                {"id": 2, "name": 7, "active": "yes"}
            ]),
        );
        let table = Table::new("table", config(), &registry, &request).unwrap();

        let errors = table.validate_records().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.row_key == "2"));
    }
}
