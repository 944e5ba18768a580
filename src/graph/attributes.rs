/// Label sets and data maps attached to a vertex or an edge

use crate::storage::{GraphStore, StorageError, StorageResult};
use crate::types::{DataValue, EdgeId, Label, VertexId};

/// The element a label set or data map belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Owner {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl Owner {
    fn describe(&self) -> String {
        match self {
            Owner::Vertex(vid) => format!("vertex {}", vid),
            Owner::Edge(eid) => format!("edge {}", eid),
        }
    }
}

/// Set of labels on one vertex or edge
///
/// Adding a label adds the element if it does not exist yet. Removing the
/// last label leaves the element in place.
pub struct Labels<'g> {
    store: &'g dyn GraphStore,
    owner: Owner,
}

impl<'g> Labels<'g> {
    pub(crate) fn new(store: &'g dyn GraphStore, owner: Owner) -> Self {
        Self { store, owner }
    }

    pub async fn contains(&self, label: &str) -> StorageResult<bool> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.has_vertex_label(vid, label).await,
            Owner::Edge(eid) => self.store.has_edge_label(eid, label).await,
        }
    }

    /// Add a label; returns `false` if it was already present
    pub async fn add(&self, label: &str) -> StorageResult<bool> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.add_vertex_label(vid, label).await,
            Owner::Edge(eid) => self.store.add_edge_label(eid, label).await,
        }
    }

    /// Remove a label that must be present
    ///
    /// # Errors
    /// `StorageError::LabelNotFound` if the label is not attached
    pub async fn remove(&self, label: &str) -> StorageResult<()> {
        if self.discard(label).await? {
            Ok(())
        } else {
            Err(StorageError::LabelNotFound(format!(
                "{} on {}",
                label,
                self.owner.describe()
            )))
        }
    }

    /// Remove a label if present; returns whether it was
    pub async fn discard(&self, label: &str) -> StorageResult<bool> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.discard_vertex_label(vid, label).await,
            Owner::Edge(eid) => self.store.discard_edge_label(eid, label).await,
        }
    }

    pub async fn list(&self) -> StorageResult<Vec<Label>> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.vertex_labels(vid).await,
            Owner::Edge(eid) => self.store.edge_labels(eid).await,
        }
    }

    pub async fn len(&self) -> StorageResult<usize> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.count_vertex_labels(vid).await,
            Owner::Edge(eid) => self.store.count_edge_labels(eid).await,
        }
    }

    pub async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Key/value data map on one vertex or edge
///
/// Setting a key adds the element if it does not exist yet.
pub struct Data<'g> {
    store: &'g dyn GraphStore,
    owner: Owner,
}

impl<'g> Data<'g> {
    pub(crate) fn new(store: &'g dyn GraphStore, owner: Owner) -> Self {
        Self { store, owner }
    }

    pub async fn get(&self, key: &str) -> StorageResult<Option<DataValue>> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.get_vertex_data(vid, key).await,
            Owner::Edge(eid) => self.store.get_edge_data(eid, key).await,
        }
    }

    /// Set a value, returning the one it replaced
    pub async fn set(&self, key: &str, value: impl Into<DataValue>) -> StorageResult<Option<DataValue>> {
        let value = value.into();
        match &self.owner {
            Owner::Vertex(vid) => self.store.set_vertex_data(vid, key, value).await,
            Owner::Edge(eid) => self.store.set_edge_data(eid, key, value).await,
        }
    }

    pub async fn contains_key(&self, key: &str) -> StorageResult<bool> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.has_vertex_data(vid, key).await,
            Owner::Edge(eid) => self.store.has_edge_data(eid, key).await,
        }
    }

    /// Remove a key that must be present, returning its value
    ///
    /// # Errors
    /// `StorageError::DataKeyNotFound` if the key is not set
    pub async fn remove(&self, key: &str) -> StorageResult<DataValue> {
        self.discard(key).await?.ok_or_else(|| {
            StorageError::DataKeyNotFound(format!("{} on {}", key, self.owner.describe()))
        })
    }

    /// Remove a key if present
    pub async fn discard(&self, key: &str) -> StorageResult<Option<DataValue>> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.discard_vertex_data(vid, key).await,
            Owner::Edge(eid) => self.store.discard_edge_data(eid, key).await,
        }
    }

    pub async fn keys(&self) -> StorageResult<Vec<String>> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.vertex_data_keys(vid).await,
            Owner::Edge(eid) => self.store.edge_data_keys(eid).await,
        }
    }

    pub async fn len(&self) -> StorageResult<usize> {
        match &self.owner {
            Owner::Vertex(vid) => self.store.count_vertex_data_keys(vid).await,
            Owner::Edge(eid) => self.store.count_edge_data_keys(eid).await,
        }
    }

    pub async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len().await? == 0)
    }
}
