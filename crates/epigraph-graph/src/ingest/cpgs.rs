//! CpG site ingestion.

use std::collections::HashMap;

use tracing::info;

use epigraph_core::record::CpgRecord;
use epigraph_core::EpigraphResult;

use crate::batch::BulkExecutor;
use crate::ingest::id_map_by_key;
use crate::store::{GraphStore, VertexId};

/// Create one `cpg` vertex per row and return the `internal ID` → graph id
/// mapping. Re-ingesting the same rows creates fresh vertices; there is no
/// update path.
pub async fn ingest_cpgs<S: GraphStore>(
    store: &S,
    records: &[CpgRecord],
) -> EpigraphResult<HashMap<String, VertexId>> {
    let mut executor = BulkExecutor::new(store);
    for record in records {
        executor.add_vertex(CpgRecord::LABEL, record.properties()).await?;
    }
    executor.force_execute().await?;

    let map = id_map_by_key(store, CpgRecord::LABEL, CpgRecord::INTERNAL_ID).await?;
    info!(rows = records.len(), mapped = map.len(), "Ingested CpG sites");
    Ok(map)
}
