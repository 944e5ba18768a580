use super::attributes::{Data, Labels, Owner};
use super::vertex::VertexRef;
use crate::storage::{GraphStore, StorageError, StorageResult};
use crate::types::{EdgeId, VertexId};

/// Handle to an edge id in a graph
///
/// Like [`VertexRef`], the handle exists independently of the edge.
#[derive(Clone)]
pub struct EdgeRef<'g> {
    store: &'g dyn GraphStore,
    id: EdgeId,
}

impl<'g> EdgeRef<'g> {
    pub(crate) fn new(store: &'g dyn GraphStore, id: EdgeId) -> Self {
        Self {
            store,
            id: id.normalized(),
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn is_directed(&self) -> bool {
        self.id.is_directed()
    }

    /// Source vertex (lesser endpoint of an undirected edge)
    pub fn source(&self) -> VertexRef<'g> {
        VertexRef::new(self.store, self.id.source().clone())
    }

    /// Sink vertex (greater endpoint of an undirected edge)
    pub fn sink(&self) -> VertexRef<'g> {
        VertexRef::new(self.store, self.id.sink().clone())
    }

    pub fn vertices(&self) -> (VertexRef<'g>, VertexRef<'g>) {
        (self.source(), self.sink())
    }

    pub async fn exists(&self) -> StorageResult<bool> {
        self.store.has_edge(&self.id).await
    }

    /// Add the edge (and any missing endpoint); returns `false` if it already existed
    pub async fn add(&self) -> StorageResult<bool> {
        self.store.add_edge(&self.id).await
    }

    /// Remove the edge, keeping its endpoints
    ///
    /// # Errors
    /// `StorageError::EdgeNotFound` if the edge does not exist
    pub async fn remove(&self) -> StorageResult<()> {
        if self.store.discard_edge(&self.id).await? {
            Ok(())
        } else {
            Err(StorageError::EdgeNotFound(self.id.to_string()))
        }
    }

    /// Remove the edge if it exists
    pub async fn discard(&self) -> StorageResult<bool> {
        self.store.discard_edge(&self.id).await
    }

    pub fn labels(&self) -> Labels<'g> {
        Labels::new(self.store, Owner::Edge(self.id.clone()))
    }

    pub fn data(&self) -> Data<'g> {
        Data::new(self.store, Owner::Edge(self.id.clone()))
    }
}

impl std::fmt::Debug for EdgeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EdgeRef").field(&self.id).finish()
    }
}

impl From<&EdgeRef<'_>> for EdgeId {
    fn from(edge: &EdgeRef<'_>) -> Self {
        edge.id.clone()
    }
}

/// All edges of a graph
pub struct Edges<'g> {
    store: &'g dyn GraphStore,
}

impl<'g> Edges<'g> {
    pub(crate) fn new(store: &'g dyn GraphStore) -> Self {
        Self { store }
    }

    /// Handle to the directed edge `source -> sink`
    pub fn get(&self, source: impl Into<VertexId>, sink: impl Into<VertexId>) -> EdgeRef<'g> {
        EdgeRef::new(self.store, EdgeId::directed(source, sink))
    }

    /// Handle to the undirected edge `a -- b`
    pub fn get_undirected(&self, a: impl Into<VertexId>, b: impl Into<VertexId>) -> EdgeRef<'g> {
        EdgeRef::new(self.store, EdgeId::undirected(a, b))
    }

    /// Handle to any edge id
    pub fn get_id(&self, id: impl Into<EdgeId>) -> EdgeRef<'g> {
        EdgeRef::new(self.store, id.into())
    }

    /// Add an edge and return its handle
    pub async fn add(&self, id: impl Into<EdgeId>) -> StorageResult<EdgeRef<'g>> {
        let edge = self.get_id(id);
        edge.add().await?;
        Ok(edge)
    }

    pub async fn contains(&self, id: impl Into<EdgeId>) -> StorageResult<bool> {
        self.store.has_edge(&id.into().normalized()).await
    }

    pub async fn len(&self) -> StorageResult<usize> {
        self.store.count_edges().await
    }

    pub async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len().await? == 0)
    }

    pub async fn list(&self) -> StorageResult<Vec<EdgeRef<'g>>> {
        Ok(self
            .store
            .edges()
            .await?
            .into_iter()
            .map(|eid| EdgeRef::new(self.store, eid))
            .collect())
    }

    /// # Errors
    /// `StorageError::EdgeNotFound` if the edge does not exist
    pub async fn remove(&self, id: impl Into<EdgeId>) -> StorageResult<()> {
        self.get_id(id).remove().await
    }

    pub async fn discard(&self, id: impl Into<EdgeId>) -> StorageResult<bool> {
        self.get_id(id).discard().await
    }
}
