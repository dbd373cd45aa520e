//! The graph-store capability.
//!
//! Ingestion and queries program against `GraphStore`, not against the bolt
//! driver. `GraphClient` implements it over Cypher; tests implement it over
//! an in-memory graph. Labels and property keys are spliced into Cypher
//! after sanitization, values always travel as bound parameters.

use async_trait::async_trait;
use neo4rs::{BoltType, Query};

use epigraph_core::{EpigraphResult, PropertyMap, PropertyValue};

use crate::client::GraphClient;

/// Store-assigned opaque vertex identifier (Neo4j `elementId`).
pub type VertexId = String;

/// A staged vertex creation.
#[derive(Debug, Clone)]
pub struct VertexSpec {
    pub label: String,
    pub properties: PropertyMap,
}

impl VertexSpec {
    pub fn new(label: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            label: label.into(),
            properties,
        }
    }
}

/// A staged edge creation between two existing vertices.
#[derive(Debug, Clone)]
pub struct EdgeSpec {
    pub from: VertexId,
    pub to: VertexId,
    pub label: String,
}

/// Traversal direction relative to the start vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
    Both,
}

/// Mutable property-graph capability.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create every vertex in `batch` in a single round trip.
    async fn create_vertices(&self, batch: &[VertexSpec]) -> EpigraphResult<()>;

    /// Create every edge in `batch` in a single round trip.
    async fn create_edges(&self, batch: &[EdgeSpec]) -> EpigraphResult<()>;

    /// Id of the first vertex with `label` whose `key` equals `value`.
    async fn find_vertex_id(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> EpigraphResult<Option<VertexId>>;

    /// All vertices with `label`, with their ids.
    async fn vertices_by_label(
        &self,
        label: &str,
    ) -> EpigraphResult<Vec<(VertexId, PropertyMap)>>;

    /// Property maps of vertices with `label` whose `key` equals `value`.
    async fn vertices_by_property(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> EpigraphResult<Vec<PropertyMap>>;

    /// All vertices holding `key`, regardless of label.
    async fn vertices_with_property(
        &self,
        key: &str,
    ) -> EpigraphResult<Vec<(VertexId, PropertyMap)>>;

    /// Property maps of neighbors of the vertices with `label` whose `key`
    /// equals `value`, optionally filtered to `neighbor_label`.
    async fn neighbors(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
        direction: Direction,
        neighbor_label: Option<&str>,
    ) -> EpigraphResult<Vec<PropertyMap>>;

    /// Distinct vertices with `label` having at least one neighbor (in the
    /// given direction) with `neighbor_label` whose `neighbor_key` is one of
    /// `values`.
    async fn vertices_with_neighbor(
        &self,
        label: &str,
        direction: Direction,
        neighbor_label: &str,
        neighbor_key: &str,
        values: &[String],
    ) -> EpigraphResult<Vec<PropertyMap>>;

    /// Remove `key` from every vertex holding it, process-wide.
    async fn delete_property_everywhere(&self, key: &str) -> EpigraphResult<()>;

    /// Number of vertices with `label`.
    async fn count_by_label(&self, label: &str) -> EpigraphResult<u64>;
}

/// Strip anything that could escape a backtick-quoted Cypher identifier.
fn sanitize_ident(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == ' ')
        .collect()
}

fn ident(raw: &str) -> String {
    format!("`{}`", sanitize_ident(raw))
}

fn bolt_value(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::Int(v) => BoltType::from(*v),
        PropertyValue::Float(v) => BoltType::from(*v),
        PropertyValue::Text(v) => BoltType::from(v.clone()),
    }
}

/// Cypher relationship pattern for a direction.
fn rel_pattern(direction: Direction, neighbor: &str) -> String {
    match direction {
        Direction::Out => format!("-[]->({})", neighbor),
        Direction::In => format!("<-[]-({})", neighbor),
        Direction::Both => format!("-[]-({})", neighbor),
    }
}

fn node_properties(node: &neo4rs::Node) -> PropertyMap {
    let mut map = PropertyMap::new();
    for key in node.keys() {
        // Integers first so bolt integers do not degrade to floats.
        if let Ok(v) = node.get::<i64>(key) {
            map.insert(key.to_string(), PropertyValue::Int(v));
        } else if let Ok(v) = node.get::<f64>(key) {
            map.insert(key.to_string(), PropertyValue::Float(v));
        } else if let Ok(v) = node.get::<String>(key) {
            map.insert(key.to_string(), PropertyValue::Text(v));
        }
    }
    map
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn create_vertices(&self, batch: &[VertexSpec]) -> EpigraphResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        // One CREATE clause per staged vertex, all in a single statement.
        let mut cypher = String::new();
        let mut params: Vec<(String, BoltType)> = Vec::new();
        for (i, spec) in batch.iter().enumerate() {
            let mut fields = Vec::with_capacity(spec.properties.len());
            for (j, (key, value)) in spec.properties.iter().enumerate() {
                let name = format!("p{}_{}", i, j);
                fields.push(format!("{}: ${}", ident(key), name));
                params.push((name, bolt_value(value)));
            }
            cypher.push_str(&format!(
                "CREATE (v{}:{} {{{}}})\n",
                i,
                ident(&spec.label),
                fields.join(", ")
            ));
        }

        let mut query = Query::new(cypher);
        for (name, value) in params {
            query = query.param(&name, value);
        }
        self.run(query).await
    }

    async fn create_edges(&self, batch: &[EdgeSpec]) -> EpigraphResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        // MATCH both endpoints by elementId, CREATE the edge, then reset
        // cardinality so one failed lookup cannot suppress the rest.
        let mut cypher = String::new();
        let mut query_params: Vec<(String, String)> = Vec::new();
        for (i, spec) in batch.iter().enumerate() {
            cypher.push_str(&format!(
                "MATCH (a{i}) WHERE elementId(a{i}) = $f{i} \
                 MATCH (b{i}) WHERE elementId(b{i}) = $t{i} \
                 CREATE (a{i})-[:{label}]->(b{i})\n",
                i = i,
                label = ident(&spec.label),
            ));
            if i + 1 < batch.len() {
                cypher.push_str(&format!("WITH count(*) AS sep{}\n", i));
            }
            query_params.push((format!("f{}", i), spec.from.clone()));
            query_params.push((format!("t{}", i), spec.to.clone()));
        }

        let mut query = Query::new(cypher);
        for (name, value) in query_params {
            query = query.param(&name, value);
        }
        self.run(query).await
    }

    async fn find_vertex_id(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> EpigraphResult<Option<VertexId>> {
        let query = Query::new(format!(
            "MATCH (v:{}) WHERE v.{} = $value RETURN elementId(v) AS id LIMIT 1",
            ident(label),
            ident(key)
        ))
        .param("value", bolt_value(value));

        self.scalar::<String>(query, "id").await
    }

    async fn vertices_by_label(
        &self,
        label: &str,
    ) -> EpigraphResult<Vec<(VertexId, PropertyMap)>> {
        let query = Query::new(format!(
            "MATCH (v:{}) RETURN elementId(v) AS id, v",
            ident(label)
        ));

        let mut out = Vec::new();
        for row in self.rows(query).await? {
            let id: String = row.get("id").unwrap_or_default();
            if id.is_empty() {
                continue;
            }
            if let Ok(node) = row.get::<neo4rs::Node>("v") {
                out.push((id, node_properties(&node)));
            }
        }
        Ok(out)
    }

    async fn vertices_by_property(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> EpigraphResult<Vec<PropertyMap>> {
        let query = Query::new(format!(
            "MATCH (v:{}) WHERE v.{} = $value RETURN v",
            ident(label),
            ident(key)
        ))
        .param("value", bolt_value(value));

        let mut out = Vec::new();
        for row in self.rows(query).await? {
            if let Ok(node) = row.get::<neo4rs::Node>("v") {
                out.push(node_properties(&node));
            }
        }
        Ok(out)
    }

    async fn vertices_with_property(
        &self,
        key: &str,
    ) -> EpigraphResult<Vec<(VertexId, PropertyMap)>> {
        let query = Query::new(format!(
            "MATCH (v) WHERE v.{} IS NOT NULL RETURN elementId(v) AS id, v",
            ident(key)
        ));

        let mut out = Vec::new();
        for row in self.rows(query).await? {
            let id: String = row.get("id").unwrap_or_default();
            if id.is_empty() {
                continue;
            }
            if let Ok(node) = row.get::<neo4rs::Node>("v") {
                out.push((id, node_properties(&node)));
            }
        }
        Ok(out)
    }

    async fn neighbors(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
        direction: Direction,
        neighbor_label: Option<&str>,
    ) -> EpigraphResult<Vec<PropertyMap>> {
        let neighbor = match neighbor_label {
            Some(nl) => format!("n:{}", ident(nl)),
            None => "n".to_string(),
        };
        let query = Query::new(format!(
            "MATCH (v:{}){} WHERE v.{} = $value RETURN n",
            ident(label),
            rel_pattern(direction, &neighbor),
            ident(key)
        ))
        .param("value", bolt_value(value));

        let mut out = Vec::new();
        for row in self.rows(query).await? {
            if let Ok(node) = row.get::<neo4rs::Node>("n") {
                out.push(node_properties(&node));
            }
        }
        Ok(out)
    }

    async fn vertices_with_neighbor(
        &self,
        label: &str,
        direction: Direction,
        neighbor_label: &str,
        neighbor_key: &str,
        values: &[String],
    ) -> EpigraphResult<Vec<PropertyMap>> {
        let neighbor = format!("n:{}", ident(neighbor_label));
        let query = Query::new(format!(
            "MATCH (v:{}){} WHERE n.{} IN $values RETURN DISTINCT v",
            ident(label),
            rel_pattern(direction, &neighbor),
            ident(neighbor_key)
        ))
        .param("values", values.to_vec());

        let mut out = Vec::new();
        for row in self.rows(query).await? {
            if let Ok(node) = row.get::<neo4rs::Node>("v") {
                out.push(node_properties(&node));
            }
        }
        Ok(out)
    }

    async fn delete_property_everywhere(&self, key: &str) -> EpigraphResult<()> {
        let key = ident(key);
        let query = Query::new(format!(
            "MATCH (v) WHERE v.{} IS NOT NULL REMOVE v.{}",
            key, key
        ));
        self.run(query).await
    }

    async fn count_by_label(&self, label: &str) -> EpigraphResult<u64> {
        let query = Query::new(format!(
            "MATCH (v:{}) RETURN count(v) AS count",
            ident(label)
        ));
        let count: i64 = self.scalar(query, "count").await?.unwrap_or(0);
        Ok(count.max(0) as u64)
    }
}
