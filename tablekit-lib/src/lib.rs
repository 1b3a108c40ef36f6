//! Editable-grid widget core
//!
//! An editable tabular control backed by a pluggable data source. The host
//! declares columns and a storage strategy; this crate presents, validates,
//! and synchronizes the records without the host writing grid logic itself.

pub mod column;
pub mod config;
pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod request;
pub mod source;
pub mod sync;
pub mod translate;

mod widget;

pub use widget::*;
