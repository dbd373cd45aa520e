//! Inspection queries used by health checks and the CLI.

use epigraph_core::{EpigraphResult, PropertyMap, PropertyValue};

use crate::store::{Direction, GraphStore};

/// Properties of one vertex together with its connected neighbors.
#[derive(Debug, Clone)]
pub struct VertexDetails {
    pub properties: PropertyMap,
    pub connected: Vec<PropertyMap>,
}

/// Number of vertices carrying `label`.
pub async fn count_vertices<S: GraphStore>(store: &S, label: &str) -> EpigraphResult<u64> {
    store.count_by_label(label).await
}

/// Property maps of the vertices with `label` whose `key` equals `value`,
/// each with the property maps of its neighbors in both directions.
pub async fn vertex_details<S: GraphStore>(
    store: &S,
    label: &str,
    key: &str,
    value: &str,
) -> EpigraphResult<Vec<VertexDetails>> {
    let value = PropertyValue::Text(value.to_string());
    let vertices = store.vertices_by_property(label, key, &value).await?;
    let connected = store
        .neighbors(label, key, &value, Direction::Both, None)
        .await?;

    Ok(vertices
        .into_iter()
        .map(|properties| VertexDetails {
            properties,
            connected: connected.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memstore::MemStore;
    use crate::store::{EdgeSpec, GraphStore, VertexSpec};

    fn vertex(label: &str, key: &str, value: &str) -> VertexSpec {
        let mut props = PropertyMap::new();
        props.insert(key.to_string(), PropertyValue::Text(value.to_string()));
        VertexSpec::new(label, props)
    }

    #[tokio::test]
    async fn counts_vertices_by_label() {
        let store = MemStore::new();
        store
            .create_vertices(&[
                vertex("microbe", "taxon", "Akkermansia"),
                vertex("microbe", "taxon", "Prevotella"),
                vertex("disease", "name", "type 2 diabetes"),
            ])
            .await
            .unwrap();

        assert_eq!(count_vertices(&store, "microbe").await.unwrap(), 2);
        assert_eq!(count_vertices(&store, "disease").await.unwrap(), 1);
        assert_eq!(count_vertices(&store, "cpg").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unmatched_value_yields_no_details() {
        let store = MemStore::new();
        store
            .create_vertices(&[vertex("microbe", "taxon", "Akkermansia")])
            .await
            .unwrap();

        let details = vertex_details(&store, "microbe", "taxon", "Prevotella")
            .await
            .unwrap();
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn details_include_neighbors_in_both_directions() {
        let store = MemStore::new();
        store
            .create_vertices(&[
                vertex("microbe", "taxon", "Akkermansia"),
                vertex("disease", "name", "type 2 diabetes"),
            ])
            .await
            .unwrap();
        let microbe = store
            .find_vertex_id("microbe", "taxon", &PropertyValue::Text("Akkermansia".into()))
            .await
            .unwrap()
            .unwrap();
        let disease = store
            .find_vertex_id("disease", "name", &PropertyValue::Text("type 2 diabetes".into()))
            .await
            .unwrap()
            .unwrap();
        store
            .create_edges(&[EdgeSpec {
                from: microbe,
                to: disease,
                label: "associated with".to_string(),
            }])
            .await
            .unwrap();

        let details = vertex_details(&store, "microbe", "taxon", "Akkermansia")
            .await
            .unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].connected.len(), 1);
        assert_eq!(
            details[0].connected[0].get("name"),
            Some(&PropertyValue::Text("type 2 diabetes".into()))
        );
    }
}
