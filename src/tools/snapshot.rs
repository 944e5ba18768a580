/// Snapshot a store into a `petgraph` graph
///
/// Node weights are vertex ids and edge weights are edge ids. Undirected
/// edges appear as a pair of opposite arcs (a single arc for a self-loop),
/// so directed algorithms see them as traversable both ways.

use crate::storage::{GraphStore, StorageResult};
use crate::types::{EdgeId, VertexId};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub async fn to_petgraph(storage: &dyn GraphStore) -> StorageResult<DiGraph<VertexId, EdgeId>> {
    let mut vertices = storage.vertices().await?;
    vertices.sort();
    let mut edges = storage.edges().await?;
    edges.sort();

    let mut graph = DiGraph::with_capacity(vertices.len(), edges.len());
    let mut index: HashMap<VertexId, NodeIndex> = HashMap::with_capacity(vertices.len());
    for vid in vertices {
        let node = graph.add_node(vid.clone());
        index.insert(vid, node);
    }

    for eid in edges {
        let (Some(&a), Some(&b)) = (index.get(eid.source()), index.get(eid.sink())) else {
            tracing::warn!(edge = %eid, "edge endpoint missing from vertex list");
            continue;
        };
        if !eid.is_directed() && a != b {
            graph.add_edge(b, a, eid.clone());
        }
        graph.add_edge(a, b, eid);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use petgraph::algo::{connected_components, dijkstra};

    #[tokio::test]
    async fn test_snapshot_shape() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::directed(1, 2)).await.unwrap();
        store.add_edge(&EdgeId::undirected(2, 3)).await.unwrap();
        store.add_edge(&EdgeId::undirected(4, 4)).await.unwrap();
        store.add_vertex(&VertexId::from("isolated")).await.unwrap();

        let graph = to_petgraph(&store).await.unwrap();
        assert_eq!(graph.node_count(), 5);
        // one arc, two arcs, one arc
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(connected_components(&graph), 3);
    }

    #[tokio::test]
    async fn test_snapshot_supports_petgraph_algorithms() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::directed("a", "b")).await.unwrap();
        store.add_edge(&EdgeId::directed("b", "c")).await.unwrap();
        store.add_edge(&EdgeId::undirected("c", "d")).await.unwrap();

        let graph = to_petgraph(&store).await.unwrap();
        let start = graph
            .node_indices()
            .find(|&n| graph[n] == VertexId::from("a"))
            .unwrap();
        let costs = dijkstra(&graph, start, None, |_| 1);
        let d = graph
            .node_indices()
            .find(|&n| graph[n] == VertexId::from("d"))
            .unwrap();
        assert_eq!(costs.get(&d), Some(&3));
    }
}
