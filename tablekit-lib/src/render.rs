//! Render output contract.
//!
//! The host's templating layer consumes this structure to render the grid;
//! field names follow the JS client's camelCase contract.

use serde::Deserialize;
use serde::Serialize;

use crate::column::RenderedColumn;

/// View data prepared for the host's template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableVars {
    /// Resolved column descriptors, in declared order.
    pub columns: Vec<RenderedColumn>,

    /// Name of the record key field.
    pub records_key_from: String,

    /// Records per page, `None` to disable pagination.
    pub records_per_page: Option<u32>,

    /// Save handler name for host event dispatch.
    pub postback_handler_name: String,

    /// Whether the client may add rows.
    pub adding: bool,

    /// Whether the client may delete rows.
    pub deleting: bool,

    /// Whether the toolbar is shown.
    pub toolbar: bool,

    /// Fixed grid height in pixels, `None` for automatic.
    pub height: Option<u32>,

    /// Whether the grid grows with its contents.
    pub dynamic_height: bool,

    /// Which client-side data source class to instantiate: `"client"` or
    /// `"server"`.
    pub client_data_source_class: String,

    /// Serialized snapshot of all records for client memory sources; an
    /// empty array for external sources (the client fetches rows by other
    /// means).
    pub data: serde_json::Value,
}
