/// Depth-bounded reachability

use super::successors;
use crate::storage::{GraphStore, StorageResult};
use crate::types::VertexId;
use std::collections::{HashSet, VecDeque};

/// Collect vertices reachable from `start` in at most `max_depth` hops
///
/// Results are in breadth-first order and begin with `start`. A missing
/// start vertex yields an empty list.
pub async fn bfs_reachable<S>(
    store: &S,
    start: &VertexId,
    max_depth: usize,
) -> StorageResult<Vec<VertexId>>
where
    S: GraphStore + ?Sized,
{
    if !store.has_vertex(start).await? {
        return Ok(Vec::new());
    }

    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited.insert(start.clone());
    order.push(start.clone());
    queue.push_back((start.clone(), 0usize));

    while let Some((vertex, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for (_, next) in successors(store, &vertex).await? {
            if visited.insert(next.clone()) {
                order.push(next.clone());
                queue.push_back((next, depth + 1));
            }
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::EdgeId;

    #[tokio::test]
    async fn test_reachable_depth_limit() {
        let store = MemoryStore::new();
        for (s, t) in [(1, 2), (2, 3), (3, 4)] {
            store.add_edge(&EdgeId::directed(s, t)).await.unwrap();
        }

        let within_two = bfs_reachable(&store, &VertexId::from(1), 2).await.unwrap();
        assert_eq!(
            within_two,
            vec![VertexId::from(1), VertexId::from(2), VertexId::from(3)]
        );

        let zero = bfs_reachable(&store, &VertexId::from(1), 0).await.unwrap();
        assert_eq!(zero, vec![VertexId::from(1)]);
    }

    #[tokio::test]
    async fn test_reachable_handles_cycles() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::directed("a", "b")).await.unwrap();
        store.add_edge(&EdgeId::directed("b", "a")).await.unwrap();
        store.add_edge(&EdgeId::undirected("b", "c")).await.unwrap();

        let mut all = bfs_reachable(&store, &"a".into(), 10).await.unwrap();
        all.sort();
        assert_eq!(all, vec![VertexId::from("a"), VertexId::from("b"), VertexId::from("c")]);
    }

    #[tokio::test]
    async fn test_reachable_missing_start() {
        let store = MemoryStore::new();
        let result = bfs_reachable(&store, &"nobody".into(), 3).await.unwrap();
        assert!(result.is_empty());
    }
}
