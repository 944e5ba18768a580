/// Storage back ends for the graph
///
/// This module provides the back-end contract and its implementations:
/// - GraphStore trait: every operation a back end must support
/// - MemoryStore: transient in-memory back end
/// - RocksDbStore: persistent back end on a local RocksDB directory

pub mod error;
pub mod memory_store;
pub mod rocksdb_store;

use crate::algorithms;
use crate::types::{DataValue, EdgeId, GraphPath, Label, VertexId};
use async_trait::async_trait;
pub use error::{StorageError, StorageResult};
pub use memory_store::MemoryStore;
pub use rocksdb_store::RocksDbStore;
use std::sync::Arc;

/// Graph storage abstraction
///
/// All back ends must support this interface in order to be accessed via
/// the [`Graph`](crate::Graph) handle.
///
/// Semantics shared by every implementation:
/// - `add_*` is a no-op on an existing element and returns whether it created one
/// - Adding an edge, label or data entry implicitly adds the element (and
///   for edges, both endpoints)
/// - Discarding a vertex discards every incident edge
/// - `discard_*` on an absent element is a no-op and returns `false`/`None`
///
/// `shortest_path` and `reachable` have generic client-side defaults built
/// on the adjacency operations. Back ends with a faster native route
/// override them.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Whether the store is open. A closed store rejects every operation
    /// with [`StorageError::Closed`].
    fn is_open(&self) -> bool {
        true
    }

    /// Shut the store down, leaving persistent stores in a consistent
    /// on-disk state. Closing twice is a no-op.
    fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    /// Total number of vertices
    async fn count_vertices(&self) -> StorageResult<usize>;

    /// Total number of edges (directed and undirected)
    async fn count_edges(&self) -> StorageResult<usize>;

    /// Ids of every vertex
    async fn vertices(&self) -> StorageResult<Vec<VertexId>>;

    /// Ids of every edge, each listed once
    async fn edges(&self) -> StorageResult<Vec<EdgeId>>;

    /// Whether `sink` has at least one inbound directed edge
    async fn has_source(&self, sink: &VertexId) -> StorageResult<bool>;

    /// Whether `source` has at least one outbound directed edge
    async fn has_sink(&self, source: &VertexId) -> StorageResult<bool>;

    /// Vertices with a directed edge into `sink`
    async fn sources(&self, sink: &VertexId) -> StorageResult<Vec<VertexId>>;

    /// Vertices reached by a directed edge out of `source`
    async fn sinks(&self, source: &VertexId) -> StorageResult<Vec<VertexId>>;

    /// Number of inbound directed edges of `sink`
    async fn count_sources(&self, sink: &VertexId) -> StorageResult<usize>;

    /// Number of outbound directed edges of `source`
    async fn count_sinks(&self, source: &VertexId) -> StorageResult<usize>;

    /// Every vertex with at least one outbound directed edge
    async fn all_sources(&self) -> StorageResult<Vec<VertexId>>;

    /// Every vertex with at least one inbound directed edge
    async fn all_sinks(&self) -> StorageResult<Vec<VertexId>>;

    async fn count_all_sources(&self) -> StorageResult<usize> {
        Ok(self.all_sources().await?.len())
    }

    async fn count_all_sinks(&self) -> StorageResult<usize> {
        Ok(self.all_sinks().await?.len())
    }

    /// Vertices joined to `vid` by an undirected edge
    async fn neighbors(&self, vid: &VertexId) -> StorageResult<Vec<VertexId>>;

    /// Number of undirected edges incident to `vid`
    async fn count_neighbors(&self, vid: &VertexId) -> StorageResult<usize>;

    async fn has_vertex(&self, vid: &VertexId) -> StorageResult<bool>;

    async fn has_edge(&self, eid: &EdgeId) -> StorageResult<bool>;

    /// Add a vertex; returns `false` if it already existed
    async fn add_vertex(&self, vid: &VertexId) -> StorageResult<bool>;

    /// Add an edge, creating missing endpoints; returns `false` if it already existed
    async fn add_edge(&self, eid: &EdgeId) -> StorageResult<bool>;

    /// Remove a vertex with its incident edges, labels and data
    async fn discard_vertex(&self, vid: &VertexId) -> StorageResult<bool>;

    /// Remove an edge with its labels and data; endpoints are kept
    async fn discard_edge(&self, eid: &EdgeId) -> StorageResult<bool>;

    async fn add_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool>;

    async fn has_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool>;

    async fn discard_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool>;

    async fn vertex_labels(&self, vid: &VertexId) -> StorageResult<Vec<Label>>;

    async fn count_vertex_labels(&self, vid: &VertexId) -> StorageResult<usize>;

    async fn add_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool>;

    async fn has_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool>;

    async fn discard_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool>;

    async fn edge_labels(&self, eid: &EdgeId) -> StorageResult<Vec<Label>>;

    async fn count_edge_labels(&self, eid: &EdgeId) -> StorageResult<usize>;

    async fn get_vertex_data(&self, vid: &VertexId, key: &str) -> StorageResult<Option<DataValue>>;

    /// Set a data entry, returning the previous value
    async fn set_vertex_data(
        &self,
        vid: &VertexId,
        key: &str,
        value: DataValue,
    ) -> StorageResult<Option<DataValue>>;

    async fn has_vertex_data(&self, vid: &VertexId, key: &str) -> StorageResult<bool>;

    /// Remove a data entry, returning the removed value
    async fn discard_vertex_data(&self, vid: &VertexId, key: &str)
        -> StorageResult<Option<DataValue>>;

    async fn vertex_data_keys(&self, vid: &VertexId) -> StorageResult<Vec<String>>;

    async fn count_vertex_data_keys(&self, vid: &VertexId) -> StorageResult<usize>;

    async fn get_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<Option<DataValue>>;

    async fn set_edge_data(
        &self,
        eid: &EdgeId,
        key: &str,
        value: DataValue,
    ) -> StorageResult<Option<DataValue>>;

    async fn has_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<bool>;

    async fn discard_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<Option<DataValue>>;

    async fn edge_data_keys(&self, eid: &EdgeId) -> StorageResult<Vec<String>>;

    async fn count_edge_data_keys(&self, eid: &EdgeId) -> StorageResult<usize>;

    /// Minimum-hop path from `from` to `to`
    ///
    /// Directed edges are followed source to sink, undirected edges either
    /// way. Returns `Ok(None)` when either vertex is missing or no path exists.
    async fn shortest_path(
        &self,
        from: &VertexId,
        to: &VertexId,
    ) -> StorageResult<Option<GraphPath>> {
        algorithms::bfs_shortest_path(self, from, to).await
    }

    /// Vertices reachable from `from` within `max_depth` hops, in
    /// breadth-first order, `from` included
    async fn reachable(&self, from: &VertexId, max_depth: usize) -> StorageResult<Vec<VertexId>> {
        algorithms::bfs_reachable(self, from, max_depth).await
    }
}

/// Shared storage handle
pub type SharedStore = Arc<dyn GraphStore>;
