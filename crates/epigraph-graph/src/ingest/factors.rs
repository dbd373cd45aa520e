//! Factor ingestion with name deduplication.
//!
//! Factors are the one entity kind with check-then-create semantics: a name
//! that already has a vertex maps to the existing id instead of creating a
//! second vertex. Creation is flushed one row at a time because the new id
//! is needed immediately to populate the mapping.
//!
//! The check-then-create sequence is not atomic; concurrent factor ingestion
//! can race and leave duplicate names behind.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use epigraph_core::record::FactorRecord;
use epigraph_core::{EpigraphResult, PropertyValue};

use crate::batch::BulkExecutor;
use crate::store::{GraphStore, VertexId};

/// Create `factor` vertices for unseen names and return row index → graph id.
pub async fn ingest_factors<S: GraphStore>(
    store: &S,
    records: &[FactorRecord],
) -> EpigraphResult<HashMap<usize, VertexId>> {
    let mut map = HashMap::new();

    for (row_index, record) in records.iter().enumerate() {
        let name = PropertyValue::Text(record.name.clone());

        if let Some(existing) = store
            .find_vertex_id(FactorRecord::LABEL, FactorRecord::NAME, &name)
            .await?
        {
            debug!(factor = %record.name, "Factor vertex already exists");
            map.insert(row_index, existing);
            continue;
        }

        // Batch of one: the assigned id must be readable right after the add.
        let mut executor = BulkExecutor::with_batch_size(store, 1);
        executor.add_vertex(FactorRecord::LABEL, record.properties()).await?;
        executor.force_execute().await?;

        match store
            .find_vertex_id(FactorRecord::LABEL, FactorRecord::NAME, &name)
            .await?
        {
            Some(id) => {
                debug!(factor = %record.name, %id, "Created factor vertex");
                map.insert(row_index, id);
            }
            None => {
                warn!(factor = %record.name, "Factor vertex missing right after creation");
            }
        }
    }

    info!(rows = records.len(), mapped = map.len(), "Ingested factors");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memstore::MemStore;

    fn factor(name: &str) -> FactorRecord {
        FactorRecord {
            name: name.to_string(),
            factor_type: "lifestyle".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_one_vertex_per_distinct_name() {
        let store = MemStore::new();
        let map = ingest_factors(&store, &[factor("Smoking"), factor("Obesity")])
            .await
            .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(store.vertex_count("factor"), 2);
    }

    #[tokio::test]
    async fn existing_name_is_not_recreated() {
        let store = MemStore::new();
        let first = ingest_factors(&store, &[factor("Smoking")]).await.unwrap();
        let second = ingest_factors(&store, &[factor("Smoking")]).await.unwrap();

        assert_eq!(store.vertex_count("factor"), 1);
        // The mapping resolves to the pre-existing vertex's id.
        assert_eq!(first[&0], second[&0]);
    }

    #[tokio::test]
    async fn duplicate_names_within_one_upload_share_a_vertex() {
        let store = MemStore::new();
        let map = ingest_factors(&store, &[factor("Smoking"), factor("Smoking")])
            .await
            .unwrap();

        assert_eq!(store.vertex_count("factor"), 1);
        assert_eq!(map[&0], map[&1]);
    }
}
