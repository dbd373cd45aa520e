//! Article ingestion.
//!
//! Articles have no natural unique key in the upload, so each vertex briefly
//! carries a transient `_sql_id` property holding its row index. The id
//! mapping is read back through that property, which is then deleted from
//! every vertex holding it.

use std::collections::HashMap;

use tracing::info;

use epigraph_core::record::ArticleRecord;
use epigraph_core::{EpigraphResult, PropertyValue};

use crate::batch::BulkExecutor;
use crate::store::{GraphStore, VertexId};

/// Create one `article` vertex per row and return row index → (graph id, doi).
pub async fn ingest_articles<S: GraphStore>(
    store: &S,
    records: &[ArticleRecord],
) -> EpigraphResult<HashMap<usize, (VertexId, String)>> {
    let mut executor = BulkExecutor::new(store);
    for (row_index, record) in records.iter().enumerate() {
        let mut properties = record.properties();
        properties.insert(
            ArticleRecord::SQL_ID.to_string(),
            PropertyValue::Int(row_index as i64),
        );
        executor.add_vertex(ArticleRecord::LABEL, properties).await?;
    }
    executor.force_execute().await?;

    let mut map = HashMap::new();
    for (id, properties) in store.vertices_with_property(ArticleRecord::SQL_ID).await? {
        let Some(PropertyValue::Int(sql_id)) = properties.get(ArticleRecord::SQL_ID) else {
            continue;
        };
        let doi = properties
            .get(ArticleRecord::DOI)
            .map(|v| v.to_string())
            .unwrap_or_default();
        map.insert(*sql_id as usize, (id, doi));
    }

    // The transient row-index property must not outlive the mapping read.
    store.delete_property_everywhere(ArticleRecord::SQL_ID).await?;

    info!(rows = records.len(), mapped = map.len(), "Ingested articles");
    Ok(map)
}
