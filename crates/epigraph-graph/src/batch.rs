//! Bulk ingestion batcher.
//!
//! Accumulates vertex/edge creation operations and flushes them to the store
//! in bounded-size batches so a CSV upload of thousands of rows costs a
//! handful of round trips instead of one per row.

use epigraph_core::{EpigraphError, EpigraphResult, PropertyMap};
use tracing::debug;

use crate::store::{EdgeSpec, GraphStore, VertexId, VertexSpec};

pub const DEFAULT_BATCH_SIZE: usize = 100;

enum StagedOp {
    Vertex(VertexSpec),
    Edge(EdgeSpec),
}

/// Batches creation operations against a graph store.
///
/// Once the number of staged operations reaches `batch_size` the batch is
/// submitted automatically. `force_execute` must be called after the last
/// add of a run or trailing items are lost. A flush failure propagates
/// unchanged; the batch is neither retried nor rolled back.
pub struct BulkExecutor<'a, S: GraphStore> {
    store: &'a S,
    batch_size: usize,
    staged: Vec<StagedOp>,
}

impl<'a, S: GraphStore> BulkExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_batch_size(store, DEFAULT_BATCH_SIZE)
    }

    pub fn with_batch_size(store: &'a S, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
            staged: Vec::new(),
        }
    }

    /// Stage one vertex creation; flushes if the batch is full.
    pub async fn add_vertex(&mut self, label: &str, properties: PropertyMap) -> EpigraphResult<()> {
        if label.is_empty() {
            return Err(EpigraphError::validation("vertex label must not be empty"));
        }
        self.staged
            .push(StagedOp::Vertex(VertexSpec::new(label, properties)));
        self.flush_if_full().await
    }

    /// Stage one edge creation between existing vertices; flushes if the
    /// batch is full.
    pub async fn add_edge(
        &mut self,
        from: &VertexId,
        to: &VertexId,
        label: &str,
    ) -> EpigraphResult<()> {
        if label.is_empty() {
            return Err(EpigraphError::validation("edge label must not be empty"));
        }
        self.staged.push(StagedOp::Edge(EdgeSpec {
            from: from.clone(),
            to: to.clone(),
            label: label.to_string(),
        }));
        self.flush_if_full().await
    }

    /// Submit any staged operations regardless of the threshold.
    pub async fn force_execute(&mut self) -> EpigraphResult<()> {
        self.flush().await
    }

    /// Number of operations currently staged.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    async fn flush_if_full(&mut self) -> EpigraphResult<()> {
        if self.staged.len() >= self.batch_size {
            self.flush().await
        } else {
            Ok(())
        }
    }

    async fn flush(&mut self) -> EpigraphResult<()> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let staged = std::mem::take(&mut self.staged);
        let mut vertices = Vec::new();
        let mut edges = Vec::new();
        for op in staged {
            match op {
                StagedOp::Vertex(v) => vertices.push(v),
                StagedOp::Edge(e) => edges.push(e),
            }
        }

        debug!(vertices = vertices.len(), edges = edges.len(), "Flushing batch");
        if !vertices.is_empty() {
            self.store.create_vertices(&vertices).await?;
        }
        if !edges.is_empty() {
            self.store.create_edges(&edges).await?;
        }
        Ok(())
    }
}
