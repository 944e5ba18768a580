use super::attributes::{Data, Labels, Owner};
use super::edge::EdgeRef;
use crate::storage::{GraphStore, StorageError, StorageResult};
use crate::types::{EdgeId, VertexId};

/// Handle to a vertex id in a graph
///
/// The handle does not imply the vertex exists; check with
/// [`VertexRef::exists`] or create it with [`VertexRef::add`].
#[derive(Clone)]
pub struct VertexRef<'g> {
    store: &'g dyn GraphStore,
    id: VertexId,
}

impl<'g> VertexRef<'g> {
    pub(crate) fn new(store: &'g dyn GraphStore, id: VertexId) -> Self {
        Self { store, id }
    }

    pub fn id(&self) -> &VertexId {
        &self.id
    }

    pub async fn exists(&self) -> StorageResult<bool> {
        self.store.has_vertex(&self.id).await
    }

    /// Add the vertex; returns `false` if it already existed
    pub async fn add(&self) -> StorageResult<bool> {
        self.store.add_vertex(&self.id).await
    }

    /// Remove the vertex and its incident edges
    ///
    /// # Errors
    /// `StorageError::VertexNotFound` if the vertex does not exist
    pub async fn remove(&self) -> StorageResult<()> {
        if self.store.discard_vertex(&self.id).await? {
            Ok(())
        } else {
            Err(StorageError::VertexNotFound(self.id.to_string()))
        }
    }

    /// Remove the vertex if it exists
    pub async fn discard(&self) -> StorageResult<bool> {
        self.store.discard_vertex(&self.id).await
    }

    pub fn labels(&self) -> Labels<'g> {
        Labels::new(self.store, Owner::Vertex(self.id.clone()))
    }

    pub fn data(&self) -> Data<'g> {
        Data::new(self.store, Owner::Vertex(self.id.clone()))
    }

    /// Directed edges ending at this vertex
    pub async fn inbound(&self) -> StorageResult<Vec<EdgeRef<'g>>> {
        Ok(self
            .store
            .sources(&self.id)
            .await?
            .into_iter()
            .map(|source| EdgeRef::new(self.store, EdgeId::Directed(source, self.id.clone())))
            .collect())
    }

    /// Directed edges starting at this vertex
    pub async fn outbound(&self) -> StorageResult<Vec<EdgeRef<'g>>> {
        Ok(self
            .store
            .sinks(&self.id)
            .await?
            .into_iter()
            .map(|sink| EdgeRef::new(self.store, EdgeId::Directed(self.id.clone(), sink)))
            .collect())
    }

    pub async fn inbound_count(&self) -> StorageResult<usize> {
        self.store.count_sources(&self.id).await
    }

    pub async fn outbound_count(&self) -> StorageResult<usize> {
        self.store.count_sinks(&self.id).await
    }

    /// Undirected edges touching this vertex
    pub async fn undirected(&self) -> StorageResult<Vec<EdgeRef<'g>>> {
        Ok(self
            .store
            .neighbors(&self.id)
            .await?
            .into_iter()
            .map(|other| EdgeRef::new(self.store, EdgeId::undirected(self.id.clone(), other)))
            .collect())
    }

    /// Vertices sharing an undirected edge with this vertex
    pub async fn neighbors(&self) -> StorageResult<Vec<VertexRef<'g>>> {
        Ok(self
            .store
            .neighbors(&self.id)
            .await?
            .into_iter()
            .map(|other| VertexRef::new(self.store, other))
            .collect())
    }

    /// Directed edge from this vertex to `other` (not necessarily existing)
    pub fn edge_to(&self, other: impl Into<VertexId>) -> EdgeRef<'g> {
        EdgeRef::new(self.store, EdgeId::Directed(self.id.clone(), other.into()))
    }

    /// Directed edge from `other` to this vertex (not necessarily existing)
    pub fn edge_from(&self, other: impl Into<VertexId>) -> EdgeRef<'g> {
        EdgeRef::new(self.store, EdgeId::Directed(other.into(), self.id.clone()))
    }
}

impl std::fmt::Debug for VertexRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VertexRef").field(&self.id).finish()
    }
}

impl From<&VertexRef<'_>> for VertexId {
    fn from(vertex: &VertexRef<'_>) -> Self {
        vertex.id.clone()
    }
}

impl From<VertexRef<'_>> for VertexId {
    fn from(vertex: VertexRef<'_>) -> Self {
        vertex.id
    }
}

/// All vertices of a graph
pub struct Vertices<'g> {
    store: &'g dyn GraphStore,
}

impl<'g> Vertices<'g> {
    pub(crate) fn new(store: &'g dyn GraphStore) -> Self {
        Self { store }
    }

    /// Handle to a vertex id, whether or not it exists
    pub fn get(&self, id: impl Into<VertexId>) -> VertexRef<'g> {
        VertexRef::new(self.store, id.into())
    }

    /// Add a vertex and return its handle
    pub async fn add(&self, id: impl Into<VertexId>) -> StorageResult<VertexRef<'g>> {
        let vertex = self.get(id);
        vertex.add().await?;
        Ok(vertex)
    }

    pub async fn contains(&self, id: impl Into<VertexId>) -> StorageResult<bool> {
        self.store.has_vertex(&id.into()).await
    }

    pub async fn len(&self) -> StorageResult<usize> {
        self.store.count_vertices().await
    }

    pub async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len().await? == 0)
    }

    pub async fn list(&self) -> StorageResult<Vec<VertexRef<'g>>> {
        Ok(self
            .store
            .vertices()
            .await?
            .into_iter()
            .map(|vid| VertexRef::new(self.store, vid))
            .collect())
    }

    /// Vertices with at least one outbound directed edge
    pub async fn sources(&self) -> StorageResult<Vec<VertexRef<'g>>> {
        Ok(self
            .store
            .all_sources()
            .await?
            .into_iter()
            .map(|vid| VertexRef::new(self.store, vid))
            .collect())
    }

    /// Vertices with at least one inbound directed edge
    pub async fn sinks(&self) -> StorageResult<Vec<VertexRef<'g>>> {
        Ok(self
            .store
            .all_sinks()
            .await?
            .into_iter()
            .map(|vid| VertexRef::new(self.store, vid))
            .collect())
    }

    /// # Errors
    /// `StorageError::VertexNotFound` if the vertex does not exist
    pub async fn remove(&self, id: impl Into<VertexId>) -> StorageResult<()> {
        self.get(id).remove().await
    }

    pub async fn discard(&self, id: impl Into<VertexId>) -> StorageResult<bool> {
        self.get(id).discard().await
    }
}
