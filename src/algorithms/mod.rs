/// Graph algorithms module
///
/// Generic, client-side implementations built purely on the
/// [`GraphStore`](crate::storage::GraphStore) adjacency operations. They
/// back the default `shortest_path` / `reachable` trait methods, so every
/// back end gets them for free and can override them with something faster.

pub mod reachability;
pub mod shortest_path;

pub use reachability::bfs_reachable;
pub use shortest_path::bfs_shortest_path;

use crate::storage::{GraphStore, StorageResult};
use crate::types::{EdgeId, VertexId};

/// Edges that can be walked out of `vid`, paired with the vertex they lead to
///
/// Outbound directed edges come first, then undirected ones.
pub(crate) async fn successors<S>(store: &S, vid: &VertexId) -> StorageResult<Vec<(EdgeId, VertexId)>>
where
    S: GraphStore + ?Sized,
{
    let mut out = Vec::new();
    for sink in store.sinks(vid).await? {
        out.push((EdgeId::Directed(vid.clone(), sink.clone()), sink));
    }
    for other in store.neighbors(vid).await? {
        out.push((EdgeId::undirected(vid.clone(), other.clone()), other));
    }
    Ok(out)
}
