//! In-memory `GraphStore` for tests.
//!
//! A flat adjacency list plus a log of batch sizes per round trip, so tests
//! can assert both graph semantics and the batching contract.

use std::sync::Mutex;

use async_trait::async_trait;

use epigraph_core::{EpigraphResult, PropertyMap, PropertyValue};

use crate::store::{Direction, EdgeSpec, GraphStore, VertexId, VertexSpec};

#[derive(Debug, Clone)]
struct MemVertex {
    id: VertexId,
    label: String,
    properties: PropertyMap,
}

#[derive(Default)]
struct MemGraph {
    next_id: u64,
    vertices: Vec<MemVertex>,
    edges: Vec<EdgeSpec>,
}

#[derive(Default)]
pub(crate) struct MemStore {
    graph: Mutex<MemGraph>,
    vertex_batches: Mutex<Vec<usize>>,
    edge_batches: Mutex<Vec<usize>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes of the `create_vertices` round trips, in order.
    pub fn vertex_batches(&self) -> Vec<usize> {
        self.vertex_batches.lock().unwrap().clone()
    }

    /// Sizes of the `create_edges` round trips, in order.
    pub fn edge_batches(&self) -> Vec<usize> {
        self.edge_batches.lock().unwrap().clone()
    }

    pub fn vertex_count(&self, label: &str) -> usize {
        self.graph
            .lock()
            .unwrap()
            .vertices
            .iter()
            .filter(|v| v.label == label)
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.lock().unwrap().edges.len()
    }

    fn matching_ids(
        graph: &MemGraph,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> Vec<VertexId> {
        graph
            .vertices
            .iter()
            .filter(|v| v.label == label && v.properties.get(key) == Some(value))
            .map(|v| v.id.clone())
            .collect()
    }

    fn neighbor_ids(graph: &MemGraph, id: &VertexId, direction: Direction) -> Vec<VertexId> {
        let mut out = Vec::new();
        for edge in &graph.edges {
            match direction {
                Direction::Out if edge.from == *id => out.push(edge.to.clone()),
                Direction::In if edge.to == *id => out.push(edge.from.clone()),
                Direction::Both => {
                    if edge.from == *id {
                        out.push(edge.to.clone());
                    } else if edge.to == *id {
                        out.push(edge.from.clone());
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn vertex<'g>(graph: &'g MemGraph, id: &VertexId) -> Option<&'g MemVertex> {
        graph.vertices.iter().find(|v| v.id == *id)
    }
}

#[async_trait]
impl GraphStore for MemStore {
    async fn create_vertices(&self, batch: &[VertexSpec]) -> EpigraphResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.vertex_batches.lock().unwrap().push(batch.len());
        let mut graph = self.graph.lock().unwrap();
        for spec in batch {
            graph.next_id += 1;
            let id = format!("v{}", graph.next_id);
            graph.vertices.push(MemVertex {
                id,
                label: spec.label.clone(),
                properties: spec.properties.clone(),
            });
        }
        Ok(())
    }

    async fn create_edges(&self, batch: &[EdgeSpec]) -> EpigraphResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.edge_batches.lock().unwrap().push(batch.len());
        self.graph.lock().unwrap().edges.extend(batch.iter().cloned());
        Ok(())
    }

    async fn find_vertex_id(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> EpigraphResult<Option<VertexId>> {
        let graph = self.graph.lock().unwrap();
        Ok(Self::matching_ids(&graph, label, key, value).into_iter().next())
    }

    async fn vertices_by_label(
        &self,
        label: &str,
    ) -> EpigraphResult<Vec<(VertexId, PropertyMap)>> {
        let graph = self.graph.lock().unwrap();
        Ok(graph
            .vertices
            .iter()
            .filter(|v| v.label == label)
            .map(|v| (v.id.clone(), v.properties.clone()))
            .collect())
    }

    async fn vertices_by_property(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> EpigraphResult<Vec<PropertyMap>> {
        let graph = self.graph.lock().unwrap();
        Ok(graph
            .vertices
            .iter()
            .filter(|v| v.label == label && v.properties.get(key) == Some(value))
            .map(|v| v.properties.clone())
            .collect())
    }

    async fn vertices_with_property(
        &self,
        key: &str,
    ) -> EpigraphResult<Vec<(VertexId, PropertyMap)>> {
        let graph = self.graph.lock().unwrap();
        Ok(graph
            .vertices
            .iter()
            .filter(|v| v.properties.contains_key(key))
            .map(|v| (v.id.clone(), v.properties.clone()))
            .collect())
    }

    async fn neighbors(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
        direction: Direction,
        neighbor_label: Option<&str>,
    ) -> EpigraphResult<Vec<PropertyMap>> {
        let graph = self.graph.lock().unwrap();
        let mut out = Vec::new();
        for id in Self::matching_ids(&graph, label, key, value) {
            for neighbor_id in Self::neighbor_ids(&graph, &id, direction) {
                let Some(neighbor) = Self::vertex(&graph, &neighbor_id) else {
                    continue;
                };
                if neighbor_label.is_none_or(|nl| neighbor.label == nl) {
                    out.push(neighbor.properties.clone());
                }
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
        let graph = self.graph.lock().unwrap();
        let mut out = Vec::new();
        for vertex in graph.vertices.iter().filter(|v| v.label == label) {
            let qualifies = Self::neighbor_ids(&graph, &vertex.id, direction)
                .iter()
                .filter_map(|id| Self::vertex(&graph, id))
                .any(|n| {
                    n.label == neighbor_label
                        && matches!(
                            n.properties.get(neighbor_key),
                            Some(PropertyValue::Text(v)) if values.contains(v)
                        )
                });
            if qualifies {
                out.push(vertex.properties.clone());
            }
        }
        Ok(out)
    }

    async fn delete_property_everywhere(&self, key: &str) -> EpigraphResult<()> {
        let mut graph = self.graph.lock().unwrap();
        for vertex in &mut graph.vertices {
            vertex.properties.remove(key);
        }
        Ok(())
    }

    async fn count_by_label(&self, label: &str) -> EpigraphResult<u64> {
        Ok(self.vertex_count(label) as u64)
    }
}
