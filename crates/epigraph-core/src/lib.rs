//! Epigraph Core Library
//!
//! Domain records, CSV row import and report assembly for the
//! methylation knowledge graph.

pub mod csv_import;
pub mod error;
pub mod record;
pub mod report;

pub use error::{EpigraphError, EpigraphResult};
pub use record::{PropertyMap, PropertyValue};
