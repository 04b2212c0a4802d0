//! Operator tooling for CMS map layers.
//!
//! Loads a YAML catalog of maps and layers into the in-memory repository and
//! exposes the layer operations (client config, list view, admin form,
//! feature-info proxy) on the command line.

pub mod catalog;
pub mod report;

pub use catalog::Catalog;
pub use report::format_summary_table;
