//! Bulk ingestion of tabular uploads into the graph.
//!
//! One module per entity kind. Every operation batches vertex creation
//! through `BulkExecutor`, flushes, and only then reads the store-assigned
//! ids back to build the external-key mapping (read-after-write ordering).
//! Duplicate-key handling is the caller's responsibility except for factors,
//! which are deduplicated by name.

pub mod articles;
pub mod cpgs;
pub mod diseases;
pub mod factors;
pub mod links;
pub mod microbes;

use std::collections::HashMap;

pub use articles::ingest_articles;
pub use cpgs::ingest_cpgs;
pub use diseases::ingest_diseases;
pub use factors::ingest_factors;
pub use links::link_microbes_to_diseases;
pub use microbes::ingest_microbes;

use epigraph_core::EpigraphResult;

use crate::store::{GraphStore, VertexId};

/// Map each vertex of `label` from its `key` property to its graph id.
///
/// When several vertices share a key value, the last one wins; this matches
/// the duplicate-insert lifecycle (no dedup for CpGs, microbes or diseases).
pub(crate) async fn id_map_by_key<S: GraphStore>(
    store: &S,
    label: &str,
    key: &str,
) -> EpigraphResult<HashMap<String, VertexId>> {
    let mut map = HashMap::new();
    for (id, properties) in store.vertices_by_label(label).await? {
        if let Some(value) = properties.get(key) {
            map.insert(value.to_string(), id);
        }
    }
    Ok(map)
}
