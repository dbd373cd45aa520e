//! Neo4j connection client.

use epigraph_core::{EpigraphError, EpigraphResult};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "epigraph_dev".to_string(),
            database: "neo4j".to_string(),
        }
    }
}

/// Client for graph operations over a shared connection pool.
///
/// Cloning is cheap; every request handler gets its own handle onto the same
/// pool, so no ambient global connection exists.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy deadpool — `Graph::connect` only creates the
    /// pool object and does NOT establish a real bolt connection yet. We run
    /// a cheap `RETURN 1` ping immediately so that callers can wrap this in
    /// a timeout and get a fast failure when Neo4j is unreachable.
    pub async fn connect(config: &GraphConfig) -> EpigraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(8)
            .fetch_size(200)
            .build()
            .map_err(EpigraphError::store)?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(EpigraphError::store)?;

        // Ping to force an actual TCP+bolt handshake so the caller's timeout works.
        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(EpigraphError::store)?;

        Ok(Self { graph })
    }

    /// Create a new GraphClient with default configuration.
    pub async fn connect_default() -> EpigraphResult<Self> {
        Self::connect(&GraphConfig::default()).await
    }

    /// Execute a Cypher query that returns no results.
    pub async fn run(&self, query: Query) -> EpigraphResult<()> {
        self.graph.run(query).await.map_err(EpigraphError::store)
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn rows(&self, query: Query) -> EpigraphResult<Vec<neo4rs::Row>> {
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(EpigraphError::store)?;

        let mut rows = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> EpigraphResult<Option<T>> {
        let rows = self.rows(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field).map_err(|e| {
                EpigraphError::store(format!("failed to read field '{}': {:?}", field, e))
            })?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }
}
