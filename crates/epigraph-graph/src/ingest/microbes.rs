//! Microbe ingestion.

use std::collections::HashMap;

use tracing::info;

use epigraph_core::record::MicrobeRecord;
use epigraph_core::EpigraphResult;

use crate::batch::BulkExecutor;
use crate::ingest::id_map_by_key;
use crate::store::{GraphStore, VertexId};

/// Create one `microbe` vertex per row and return the taxon → graph id mapping.
pub async fn ingest_microbes<S: GraphStore>(
    store: &S,
    records: &[MicrobeRecord],
) -> EpigraphResult<HashMap<String, VertexId>> {
    let mut executor = BulkExecutor::new(store);
    for record in records {
        executor.add_vertex(MicrobeRecord::LABEL, record.properties()).await?;
    }
    executor.force_execute().await?;

    let map = id_map_by_key(store, MicrobeRecord::LABEL, MicrobeRecord::TAXON).await?;
    info!(rows = records.len(), mapped = map.len(), "Ingested microbes");
    Ok(map)
}
