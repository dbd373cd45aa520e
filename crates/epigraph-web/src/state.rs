//! Application state.

use epigraph_graph::GraphClient;

/// State shared across handlers: one clone of the pooled graph client per
/// handler invocation, no ambient global connection.
#[derive(Clone)]
pub struct AppState {
    pub client: GraphClient,
}

impl AppState {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }
}
