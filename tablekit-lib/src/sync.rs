//! Request-lifecycle synchronization protocol.
//!
//! On every data-submitting request the client resubmits its full copy of
//! the grid. When the active data source is client memory, the protocol
//! discards any prior in-memory state and repopulates the source from that
//! payload before anything else runs, so every downstream operation in the
//! request sees only freshly rehydrated state. External sources are assumed
//! already current and never rehydrate.

use log::debug;

use crate::error::Error;
use crate::request::TableRequest;
use crate::source::SourceKind;
use crate::source::TableDataSource;

/// Per-request synchronization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No submission has been merged into the data source.
    #[default]
    Fresh,
    /// The client payload has been merged into the data source.
    Rehydrated,
}

/// Suffix of the request field carrying the submitted grid data.
const DATA_FIELD_SUFFIX: &str = "TableData";

/// Computes the request field name carrying the grid payload for a widget
/// alias.
///
/// A plain alias concatenates the suffix (`foo` → `fooTableData`). An alias
/// with an array-index marker nests the suffix inside the bracket structure
/// instead (`foo[0]` → `foo[TableData]`).
pub fn payload_field_name(alias: &str) -> String {
    match alias.find('[') {
        Some(index) => format!("{}[{}]", &alias[..index], DATA_FIELD_SUFFIX),
        None => format!("{alias}{DATA_FIELD_SUFFIX}"),
    }
}

/// Runs the rehydration protocol against an inbound request.
///
/// The Fresh→Rehydrated transition happens iff the request is a
/// POST-equivalent, the source is client memory, and the payload field is
/// present. On transition the source is purged and repopulated from the
/// payload, in that order. Runs during widget construction, before any
/// render or handler logic.
pub fn rehydrate(
    alias: &str,
    source: &mut dyn TableDataSource,
    request: &TableRequest,
) -> Result<SyncState, Error> {
    if !request.is_post() || source.kind() != SourceKind::ClientMemory {
        return Ok(SyncState::Fresh);
    }

    let field = payload_field_name(alias);
    let Some(payload) = request.param(&field) else {
        return Ok(SyncState::Fresh);
    };

    source.purge()?;
    let added = source.init_records(payload)?;
    debug!("rehydrated {added} records for '{alias}' from field '{field}'");

    Ok(SyncState::Rehydrated)
}
