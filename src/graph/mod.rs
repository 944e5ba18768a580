/// First-class graph interface
///
/// [`Graph`] is a scoped session over a [`GraphStore`]. It hands out
/// lightweight handles ([`VertexRef`], [`EdgeRef`]) that forward every
/// operation to the store, so the same code runs against any back end.
///
/// ```no_run
/// # async fn demo() -> vert::StorageResult<()> {
/// use vert::Graph;
///
/// let graph = Graph::open("my_graph.db")?;
/// let edge = graph.edges().get("a", "b");
/// edge.add().await?;
/// edge.labels().add("friend").await?;
/// graph.close()?;
/// # Ok(())
/// # }
/// ```

pub mod attributes;
pub mod edge;
pub mod vertex;

pub use attributes::{Data, Labels};
pub use edge::{EdgeRef, Edges};
pub use vertex::{VertexRef, Vertices};

use crate::config::GraphConfig;
use crate::storage::rocksdb_store::RocksDbOptions;
use crate::storage::{GraphStore, MemoryStore, RocksDbStore, SharedStore, StorageResult};
use crate::types::{GraphPath, VertexId};
use std::path::Path;
use std::sync::Arc;

/// Graph name used when a path is opened without one
pub const DEFAULT_GRAPH_NAME: &str = "default";

/// A scoped session bound to a storage back end
///
/// Stores opened by the graph itself are closed by [`Graph::close`], or on
/// drop if `close` was never called. Stores passed in through
/// [`Graph::with_store`] belong to the caller and stay open.
pub struct Graph {
    store: SharedStore,
    owns_store: bool,
    closed: bool,
}

impl Graph {
    /// Create a transient in-memory graph
    pub fn new() -> Self {
        Self::from_store(MemoryStore::new())
    }

    /// Alias for [`Graph::new`]
    pub fn in_memory() -> Self {
        Self::new()
    }

    /// Open (or create) a persistent graph at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let store = RocksDbStore::new(path, DEFAULT_GRAPH_NAME)?;
        Ok(Self::from_store(store))
    }

    /// Open the graph described by `config`
    ///
    /// Without a path the graph is held in memory.
    pub fn from_config(config: &GraphConfig) -> StorageResult<Self> {
        match &config.path {
            Some(path) => {
                let options = RocksDbOptions {
                    create_if_missing: config.create_if_missing,
                    sync_writes: config.sync_writes,
                };
                let store = RocksDbStore::open(path, config.graph_name.clone(), options)?;
                Ok(Self::from_store(store))
            }
            None => Ok(Self::new()),
        }
    }

    /// Wrap a store the graph takes ownership of
    pub fn from_store<S: GraphStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
            owns_store: true,
            closed: false,
        }
    }

    /// Wrap a caller-managed shared store; the graph will not close it
    pub fn with_store(store: SharedStore) -> Self {
        Self {
            store,
            owns_store: false,
            closed: false,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn vertices(&self) -> Vertices<'_> {
        Vertices::new(self.store.as_ref())
    }

    pub fn edges(&self) -> Edges<'_> {
        Edges::new(self.store.as_ref())
    }

    /// Minimum-hop path between two vertices, if any
    pub async fn shortest_path(
        &self,
        from: impl Into<VertexId>,
        to: impl Into<VertexId>,
    ) -> StorageResult<Option<GraphPath>> {
        self.store.shortest_path(&from.into(), &to.into()).await
    }

    /// Vertices within `max_depth` hops of `from`
    pub async fn reachable(
        &self,
        from: impl Into<VertexId>,
        max_depth: usize,
    ) -> StorageResult<Vec<VertexId>> {
        self.store.reachable(&from.into(), max_depth).await
    }

    /// End the session, flushing and closing an owned store
    pub fn close(mut self) -> StorageResult<()> {
        self.closed = true;
        if self.owns_store {
            self.store.close()
        } else {
            Ok(())
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        if self.closed || !self.owns_store {
            return;
        }
        if let Err(err) = self.store.close() {
            tracing::warn!(error = %err, "failed to close graph store on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use crate::types::EdgeId;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fresh_graph_has_no_edges() {
        let graph = Graph::new();
        let edge = graph.edges().get("a", "b");
        assert!(!edge.exists().await.unwrap());
        assert!(graph.edges().is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_edge_add_and_labels() {
        let graph = Graph::new();
        let edge = graph.edges().get("a", "b");

        assert!(edge.add().await.unwrap());
        assert!(!edge.add().await.unwrap());
        assert!(edge.exists().await.unwrap());
        assert!(edge.source().exists().await.unwrap());

        edge.labels().add("label").await.unwrap();
        assert!(edge.labels().contains("label").await.unwrap());
        assert_eq!(edge.labels().len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_elements_errors() {
        let graph = Graph::new();

        let result = graph.vertices().remove("ghost").await;
        assert!(matches!(result, Err(StorageError::VertexNotFound(_))));

        let result = graph.edges().remove(("a", "b")).await;
        assert!(matches!(result, Err(StorageError::EdgeNotFound(_))));

        let vertex = graph.vertices().add("v").await.unwrap();
        let result = vertex.labels().remove("none").await;
        assert!(matches!(result, Err(StorageError::LabelNotFound(_))));

        let result = vertex.data().remove("none").await;
        assert!(matches!(result, Err(StorageError::DataKeyNotFound(_))));

        assert!(!graph.vertices().discard("ghost").await.unwrap());
        assert!(!vertex.labels().discard("none").await.unwrap());
    }

    #[tokio::test]
    async fn test_vertex_adjacency_handles() {
        let graph = Graph::new();
        graph.edges().add(("hub", 1)).await.unwrap();
        graph.edges().add(("hub", 2)).await.unwrap();
        graph.edges().add((3, "hub")).await.unwrap();
        graph
            .edges()
            .add(EdgeId::undirected("hub", "peer"))
            .await
            .unwrap();

        let hub = graph.vertices().get("hub");
        assert_eq!(hub.outbound_count().await.unwrap(), 2);
        assert_eq!(hub.inbound_count().await.unwrap(), 1);
        assert_eq!(hub.inbound().await.unwrap()[0].id(), &EdgeId::directed(3, "hub"));

        let neighbors = hub.neighbors().await.unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].id(), &VertexId::from("peer"));
        assert!(hub.edge_to(1).exists().await.unwrap());
        assert!(!hub.edge_from(1).exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_data_on_edges() {
        let graph = Graph::new();
        let edge = graph.edges().get_undirected("y", "x");

        edge.data().set("weight", 2.5).await.unwrap();
        assert!(edge.exists().await.unwrap());
        assert!(graph.edges().contains(EdgeId::undirected("x", "y")).await.unwrap());
        assert_eq!(edge.data().get("weight").await.unwrap(), Some(json!(2.5)));
        assert_eq!(edge.data().remove("weight").await.unwrap(), json!(2.5));
        assert!(edge.data().is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_with_store_leaves_store_open() {
        let shared: SharedStore = Arc::new(MemoryStore::new());
        {
            let graph = Graph::with_store(shared.clone());
            graph.vertices().add("kept").await.unwrap();
        }
        assert!(shared.is_open());
        assert!(shared.has_vertex(&"kept".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_drop_closes_persistent_store() {
        let temp_dir = TempDir::new().unwrap();
        {
            let graph = Graph::open(temp_dir.path()).unwrap();
            graph.edges().get(1, 2).add().await.unwrap();
            // dropped without close
        }
        let graph = Graph::open(temp_dir.path()).unwrap();
        assert!(graph.edges().get(1, 2).exists().await.unwrap());
        graph.close().unwrap();
    }

    #[tokio::test]
    async fn test_from_config_without_path_is_memory() {
        let config = GraphConfig::default();
        let graph = Graph::from_config(&config).unwrap();
        graph.vertices().add(1).await.unwrap();
        assert_eq!(graph.vertices().len().await.unwrap(), 1);
    }
}
