//! Neo4j schema initialization (lookup indexes).
//!
//! Indexes only, no uniqueness constraints: re-ingesting CpG rows must still
//! create fresh vertices, and factor dedup is application-level
//! check-then-create rather than a store constraint.

use neo4rs::Query;
use tracing::info;

use epigraph_core::EpigraphResult;

use crate::client::GraphClient;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE INDEX cpg_internal_id IF NOT EXISTS FOR (c:cpg) ON (c.`internal ID`)",
    "CREATE INDEX cpg_name IF NOT EXISTS FOR (c:cpg) ON (c.name)",
    "CREATE INDEX factor_name IF NOT EXISTS FOR (f:factor) ON (f.name)",
    "CREATE INDEX microbe_taxon IF NOT EXISTS FOR (m:microbe) ON (m.taxon)",
    "CREATE INDEX disease_ontology_id IF NOT EXISTS FOR (d:disease) ON (d.`disease ontology id`)",
];

/// Initialize the lookup indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> EpigraphResult<()> {
    info!("Initializing graph schema...");

    for statement in SCHEMA_STATEMENTS {
        client.run(Query::new(statement.to_string())).await?;
    }

    info!("Graph schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
