//! # Epigraph Graph
//!
//! Property-graph integration for the methylation knowledge graph.
//!
//! Provides the graph-store capability trait with its Neo4j implementation,
//! the bulk ingestion batcher, per-entity ingestion operations and the
//! factor association queries.

pub mod batch;
pub mod client;
pub mod ingest;
pub mod queries;
pub mod schema;
pub mod store;

#[cfg(test)]
pub(crate) mod memstore;

pub use batch::{BulkExecutor, DEFAULT_BATCH_SIZE};
pub use client::{GraphClient, GraphConfig};
pub use store::{Direction, EdgeSpec, GraphStore, VertexId, VertexSpec};
