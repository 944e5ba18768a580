/// Shortest path search
///
/// Every edge has unit weight, so a breadth-first search finds the
/// minimum-hop path.

use super::successors;
use crate::storage::{GraphStore, StorageResult};
use crate::types::{EdgeId, GraphPath, VertexId};
use std::collections::{HashMap, VecDeque};

/// Find a minimum-hop path from `start` to `end`
///
/// # Returns
/// * `Ok(Some(path))` - Shortest path found
/// * `Ok(None)` - Either vertex is missing or `end` is unreachable
pub async fn bfs_shortest_path<S>(
    store: &S,
    start: &VertexId,
    end: &VertexId,
) -> StorageResult<Option<GraphPath>>
where
    S: GraphStore + ?Sized,
{
    if !store.has_vertex(start).await? || !store.has_vertex(end).await? {
        return Ok(None);
    }
    if start == end {
        return Ok(Some(GraphPath::new(start.clone())));
    }

    let mut predecessors: HashMap<VertexId, (VertexId, EdgeId)> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start.clone());

    while let Some(vertex) = queue.pop_front() {
        for (edge, next) in successors(store, &vertex).await? {
            if next == *start || predecessors.contains_key(&next) {
                continue;
            }
            predecessors.insert(next.clone(), (vertex.clone(), edge));

            if next == *end {
                return Ok(reconstruct_path(start, end, &predecessors));
            }
            queue.push_back(next);
        }
    }

    Ok(None)
}

/// Walk predecessors back from `end` to `start`
///
/// Returns `None` if the chain breaks before reaching `start`.
pub(crate) fn reconstruct_path(
    start: &VertexId,
    end: &VertexId,
    predecessors: &HashMap<VertexId, (VertexId, EdgeId)>,
) -> Option<GraphPath> {
    let mut vertices = vec![end.clone()];
    let mut edges = Vec::new();
    let mut current = end;

    while current != start {
        let (prev, edge) = predecessors.get(current)?;
        edges.push(edge.clone());
        vertices.push(prev.clone());
        current = prev;
    }

    vertices.reverse();
    edges.reverse();
    Some(GraphPath { vertices, edges })
}
