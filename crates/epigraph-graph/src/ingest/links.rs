//! Microbe-to-disease edge ingestion.

use tracing::{info, warn};

use epigraph_core::record::{DiseaseRecord, MicrobeDiseaseLink, MicrobeRecord};
use epigraph_core::EpigraphResult;

use crate::batch::BulkExecutor;
use crate::ingest::id_map_by_key;
use crate::store::GraphStore;

/// Create one `associated with` edge per (taxon, DOID) row whose endpoints
/// both resolve to existing vertices. Returns the number of edges created.
/// Edge creation is not idempotent: re-ingesting the same rows duplicates
/// the edges.
pub async fn link_microbes_to_diseases<S: GraphStore>(
    store: &S,
    links: &[MicrobeDiseaseLink],
) -> EpigraphResult<usize> {
    let microbes = id_map_by_key(store, MicrobeRecord::LABEL, MicrobeRecord::TAXON).await?;
    let diseases = id_map_by_key(store, DiseaseRecord::LABEL, DiseaseRecord::ONTOLOGY_ID).await?;

    let mut executor = BulkExecutor::new(store);
    let mut created = 0usize;
    for link in links {
        let (Some(microbe_id), Some(disease_id)) =
            (microbes.get(&link.taxon), diseases.get(&link.doid))
        else {
            warn!(taxon = %link.taxon, doid = %link.doid, "Skipping link with unresolved endpoint");
            continue;
        };
        executor
            .add_edge(microbe_id, disease_id, MicrobeDiseaseLink::EDGE_LABEL)
            .await?;
        created += 1;
    }
    executor.force_execute().await?;

    info!(rows = links.len(), edges = created, "Linked microbes to diseases");
    Ok(created)
}
