//! Disease ingestion.

use std::collections::HashMap;

use tracing::info;

use epigraph_core::record::DiseaseRecord;
use epigraph_core::EpigraphResult;

use crate::batch::BulkExecutor;
use crate::ingest::id_map_by_key;
use crate::store::{GraphStore, VertexId};

/// Create one `disease` vertex per row and return the disease ontology id →
/// graph id mapping.
pub async fn ingest_diseases<S: GraphStore>(
    store: &S,
    records: &[DiseaseRecord],
) -> EpigraphResult<HashMap<String, VertexId>> {
    let mut executor = BulkExecutor::new(store);
    for record in records {
        executor.add_vertex(DiseaseRecord::LABEL, record.properties()).await?;
    }
    executor.force_execute().await?;

    let map = id_map_by_key(store, DiseaseRecord::LABEL, DiseaseRecord::ONTOLOGY_ID).await?;
    info!(rows = records.len(), mapped = map.len(), "Ingested diseases");
    Ok(map)
}
