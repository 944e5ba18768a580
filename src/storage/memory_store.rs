/// In-memory storage implementation
///
/// A non-persistent store for sparse graphs. Adjacency is kept three ways:
/// - forward:  source → sinks of directed edges
/// - backward: sink → sources of directed edges
/// - dual:     vertex → other ends of undirected edges
///
/// Every vertex has an entry in all three maps, so `forward` doubles as the
/// vertex set. Labels and data live in side tables that only hold
/// non-empty entries.

use super::error::{StorageError, StorageResult};
use super::GraphStore;
use crate::algorithms::shortest_path::reconstruct_path;
use crate::types::{DataValue, EdgeId, GraphPath, Label, VertexId};
use async_trait::async_trait;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

type DataMap = HashMap<String, DataValue>;

#[derive(Debug, Default)]
struct MemoryGraph {
    forward: HashMap<VertexId, HashSet<VertexId>>,
    backward: HashMap<VertexId, HashSet<VertexId>>,
    dual: HashMap<VertexId, HashSet<VertexId>>,
    vertex_labels: HashMap<VertexId, HashSet<Label>>,
    edge_labels: HashMap<EdgeId, HashSet<Label>>,
    vertex_data: HashMap<VertexId, DataMap>,
    edge_data: HashMap<EdgeId, DataMap>,
    edge_count: usize,
}

impl MemoryGraph {
    fn has_vertex(&self, vid: &VertexId) -> bool {
        self.forward.contains_key(vid)
    }

    fn has_edge(&self, eid: &EdgeId) -> bool {
        match eid {
            EdgeId::Directed(source, sink) => self
                .forward
                .get(source)
                .map_or(false, |sinks| sinks.contains(sink)),
            EdgeId::Undirected(a, b) => self.dual.get(a).map_or(false, |others| others.contains(b)),
        }
    }

    fn add_vertex(&mut self, vid: &VertexId) -> bool {
        if self.has_vertex(vid) {
            return false;
        }
        self.forward.insert(vid.clone(), HashSet::new());
        self.backward.insert(vid.clone(), HashSet::new());
        self.dual.insert(vid.clone(), HashSet::new());
        true
    }

    fn add_edge(&mut self, eid: &EdgeId) -> bool {
        if self.has_edge(eid) {
            return false;
        }
        let (a, b) = eid.vertices();
        self.add_vertex(a);
        self.add_vertex(b);

        match eid {
            EdgeId::Directed(source, sink) => {
                insert_into(&mut self.forward, source, sink);
                insert_into(&mut self.backward, sink, source);
            }
            EdgeId::Undirected(a, b) => {
                insert_into(&mut self.dual, a, b);
                insert_into(&mut self.dual, b, a);
            }
        }
        self.edge_count += 1;
        true
    }

    fn discard_edge(&mut self, eid: &EdgeId) -> bool {
        let removed = match eid {
            EdgeId::Directed(source, sink) => {
                let removed = remove_from(&mut self.forward, source, sink);
                if removed {
                    remove_from(&mut self.backward, sink, source);
                }
                removed
            }
            EdgeId::Undirected(a, b) => {
                let removed = remove_from(&mut self.dual, a, b);
                if removed {
                    remove_from(&mut self.dual, b, a);
                }
                removed
            }
        };

        if removed {
            self.edge_labels.remove(eid);
            self.edge_data.remove(eid);
            self.edge_count -= 1;
        }
        removed
    }

    fn incident_edges(&self, vid: &VertexId) -> Vec<EdgeId> {
        let mut incident = Vec::new();
        if let Some(sinks) = self.forward.get(vid) {
            incident.extend(sinks.iter().map(|sink| EdgeId::Directed(vid.clone(), sink.clone())));
        }
        if let Some(sources) = self.backward.get(vid) {
            // Self-loops were already collected from the forward side
            incident.extend(
                sources
                    .iter()
                    .filter(|source| *source != vid)
                    .map(|source| EdgeId::Directed(source.clone(), vid.clone())),
            );
        }
        if let Some(others) = self.dual.get(vid) {
            incident.extend(others.iter().map(|other| EdgeId::undirected(vid.clone(), other.clone())));
        }
        incident
    }

    fn discard_vertex(&mut self, vid: &VertexId) -> bool {
        if !self.has_vertex(vid) {
            return false;
        }

        let incident = self.incident_edges(vid);
        tracing::debug!(vertex = %vid, edges = incident.len(), "discarding vertex with incident edges");
        for eid in &incident {
            self.discard_edge(eid);
        }

        self.vertex_labels.remove(vid);
        self.vertex_data.remove(vid);
        self.forward.remove(vid);
        self.backward.remove(vid);
        self.dual.remove(vid);
        true
    }

    fn edges(&self) -> Vec<EdgeId> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (source, sinks) in &self.forward {
            edges.extend(sinks.iter().map(|sink| EdgeId::Directed(source.clone(), sink.clone())));
        }
        // Undirected pairs appear under both ends; keep the normalised side
        for (a, others) in &self.dual {
            edges.extend(
                others
                    .iter()
                    .filter(|b| a <= *b)
                    .map(|b| EdgeId::Undirected(a.clone(), b.clone())),
            );
        }
        edges
    }

    fn successors(&self, vid: &VertexId) -> Vec<(EdgeId, VertexId)> {
        let mut out = Vec::new();
        if let Some(sinks) = self.forward.get(vid) {
            out.extend(
                sinks
                    .iter()
                    .map(|sink| (EdgeId::Directed(vid.clone(), sink.clone()), sink.clone())),
            );
        }
        if let Some(others) = self.dual.get(vid) {
            out.extend(
                others
                    .iter()
                    .map(|other| (EdgeId::undirected(vid.clone(), other.clone()), other.clone())),
            );
        }
        out
    }

    fn shortest_path(&self, start: &VertexId, end: &VertexId) -> Option<GraphPath> {
        if !self.has_vertex(start) || !self.has_vertex(end) {
            return None;
        }
        if start == end {
            return Some(GraphPath::new(start.clone()));
        }

        let mut predecessors = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(start.clone());

        while let Some(vertex) = queue.pop_front() {
            for (edge, next) in self.successors(&vertex) {
                if next == *start || predecessors.contains_key(&next) {
                    continue;
                }
                predecessors.insert(next.clone(), (vertex.clone(), edge));
                if next == *end {
                    return reconstruct_path(start, end, &predecessors);
                }
                queue.push_back(next);
            }
        }
        None
    }
}

fn insert_into(map: &mut HashMap<VertexId, HashSet<VertexId>>, key: &VertexId, value: &VertexId) {
    map.entry(key.clone()).or_default().insert(value.clone());
}

fn remove_from(map: &mut HashMap<VertexId, HashSet<VertexId>>, key: &VertexId, value: &VertexId) -> bool {
    map.get_mut(key).map_or(false, |set| set.remove(value))
}

fn set_len<K: std::hash::Hash + Eq, V>(map: &HashMap<K, HashSet<V>>, key: &K) -> usize {
    map.get(key).map_or(0, HashSet::len)
}

fn set_items<K: std::hash::Hash + Eq, V: Clone>(map: &HashMap<K, HashSet<V>>, key: &K) -> Vec<V> {
    map.get(key).map_or_else(Vec::new, |set| set.iter().cloned().collect())
}

fn non_empty_keys<V>(map: &HashMap<VertexId, HashSet<V>>) -> impl Iterator<Item = &VertexId> {
    map.iter().filter(|(_, set)| !set.is_empty()).map(|(key, _)| key)
}

fn add_label<K: std::hash::Hash + Eq + Clone>(map: &mut HashMap<K, HashSet<Label>>, key: &K, label: &str) -> bool {
    map.entry(key.clone()).or_default().insert(label.to_string())
}

fn discard_label<K: std::hash::Hash + Eq>(map: &mut HashMap<K, HashSet<Label>>, key: &K, label: &str) -> bool {
    let Some(labels) = map.get_mut(key) else {
        return false;
    };
    let removed = labels.remove(label);
    if labels.is_empty() {
        map.remove(key);
    }
    removed
}

fn has_label<K: std::hash::Hash + Eq>(map: &HashMap<K, HashSet<Label>>, key: &K, label: &str) -> bool {
    map.get(key).map_or(false, |labels| labels.contains(label))
}

fn discard_data<K: std::hash::Hash + Eq>(map: &mut HashMap<K, DataMap>, key: &K, data_key: &str) -> Option<DataValue> {
    let data = map.get_mut(key)?;
    let removed = data.remove(data_key);
    if data.is_empty() {
        map.remove(key);
    }
    removed
}

/// Transient graph store
///
/// State is dropped with the store; [`GraphStore::close`] discards it early.
#[derive(Debug)]
pub struct MemoryStore {
    graph: RwLock<MemoryGraph>,
    open: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(MemoryGraph::default()),
            open: AtomicBool::new(true),
        }
    }

    // The open flag is checked under the lock so nothing lands after `close`

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, MemoryGraph>> {
        let graph = self.graph.read();
        if !self.is_open() {
            return Err(StorageError::Closed);
        }
        Ok(graph)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, MemoryGraph>> {
        let graph = self.graph.write();
        if !self.is_open() {
            return Err(StorageError::Closed);
        }
        Ok(graph)
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn close(&self) -> StorageResult<()> {
        if self.open.swap(false, Ordering::AcqRel) {
            *self.graph.write() = MemoryGraph::default();
        }
        Ok(())
    }

    async fn count_vertices(&self) -> StorageResult<usize> {
        Ok(self.read()?.forward.len())
    }

    async fn count_edges(&self) -> StorageResult<usize> {
        Ok(self.read()?.edge_count)
    }

    async fn vertices(&self) -> StorageResult<Vec<VertexId>> {
        Ok(self.read()?.forward.keys().cloned().collect())
    }

    async fn edges(&self) -> StorageResult<Vec<EdgeId>> {
        Ok(self.read()?.edges())
    }

    async fn has_source(&self, sink: &VertexId) -> StorageResult<bool> {
        Ok(set_len(&self.read()?.backward, sink) > 0)
    }

    async fn has_sink(&self, source: &VertexId) -> StorageResult<bool> {
        Ok(set_len(&self.read()?.forward, source) > 0)
    }

    async fn sources(&self, sink: &VertexId) -> StorageResult<Vec<VertexId>> {
        Ok(set_items(&self.read()?.backward, sink))
    }

    async fn sinks(&self, source: &VertexId) -> StorageResult<Vec<VertexId>> {
        Ok(set_items(&self.read()?.forward, source))
    }

    async fn count_sources(&self, sink: &VertexId) -> StorageResult<usize> {
        Ok(set_len(&self.read()?.backward, sink))
    }

    async fn count_sinks(&self, source: &VertexId) -> StorageResult<usize> {
        Ok(set_len(&self.read()?.forward, source))
    }

    async fn all_sources(&self) -> StorageResult<Vec<VertexId>> {
        Ok(non_empty_keys(&self.read()?.forward).cloned().collect())
    }

    async fn all_sinks(&self) -> StorageResult<Vec<VertexId>> {
        Ok(non_empty_keys(&self.read()?.backward).cloned().collect())
    }

    async fn count_all_sources(&self) -> StorageResult<usize> {
        Ok(non_empty_keys(&self.read()?.forward).count())
    }

    async fn count_all_sinks(&self) -> StorageResult<usize> {
        Ok(non_empty_keys(&self.read()?.backward).count())
    }

    async fn neighbors(&self, vid: &VertexId) -> StorageResult<Vec<VertexId>> {
        Ok(set_items(&self.read()?.dual, vid))
    }

    async fn count_neighbors(&self, vid: &VertexId) -> StorageResult<usize> {
        Ok(set_len(&self.read()?.dual, vid))
    }

    async fn has_vertex(&self, vid: &VertexId) -> StorageResult<bool> {
        Ok(self.read()?.has_vertex(vid))
    }

    async fn has_edge(&self, eid: &EdgeId) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self.read()?.has_edge(eid))
    }

    async fn add_vertex(&self, vid: &VertexId) -> StorageResult<bool> {
        Ok(self.write()?.add_vertex(vid))
    }

    async fn add_edge(&self, eid: &EdgeId) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self.write()?.add_edge(eid))
    }

    async fn discard_vertex(&self, vid: &VertexId) -> StorageResult<bool> {
        Ok(self.write()?.discard_vertex(vid))
    }

    async fn discard_edge(&self, eid: &EdgeId) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self.write()?.discard_edge(eid))
    }

    async fn add_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool> {
        let mut graph = self.write()?;
        graph.add_vertex(vid);
        Ok(add_label(&mut graph.vertex_labels, vid, label))
    }

    async fn has_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool> {
        Ok(has_label(&self.read()?.vertex_labels, vid, label))
    }

    async fn discard_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool> {
        Ok(discard_label(&mut self.write()?.vertex_labels, vid, label))
    }

    async fn vertex_labels(&self, vid: &VertexId) -> StorageResult<Vec<Label>> {
        Ok(set_items(&self.read()?.vertex_labels, vid))
    }

    async fn count_vertex_labels(&self, vid: &VertexId) -> StorageResult<usize> {
        Ok(set_len(&self.read()?.vertex_labels, vid))
    }

    async fn add_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        let mut graph = self.write()?;
        graph.add_edge(eid);
        Ok(add_label(&mut graph.edge_labels, eid, label))
    }

    async fn has_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(has_label(&self.read()?.edge_labels, eid, label))
    }

    async fn discard_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(discard_label(&mut self.write()?.edge_labels, eid, label))
    }

    async fn edge_labels(&self, eid: &EdgeId) -> StorageResult<Vec<Label>> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(set_items(&self.read()?.edge_labels, eid))
    }

    async fn count_edge_labels(&self, eid: &EdgeId) -> StorageResult<usize> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(set_len(&self.read()?.edge_labels, eid))
    }

    async fn get_vertex_data(&self, vid: &VertexId, key: &str) -> StorageResult<Option<DataValue>> {
        Ok(self
            .read()?
            .vertex_data
            .get(vid)
            .and_then(|data| data.get(key).cloned()))
    }

    async fn set_vertex_data(
        &self,
        vid: &VertexId,
        key: &str,
        value: DataValue,
    ) -> StorageResult<Option<DataValue>> {
        let mut graph = self.write()?;
        graph.add_vertex(vid);
        Ok(graph
            .vertex_data
            .entry(vid.clone())
            .or_default()
            .insert(key.to_string(), value))
    }

    async fn has_vertex_data(&self, vid: &VertexId, key: &str) -> StorageResult<bool> {
        Ok(self
            .read()?
            .vertex_data
            .get(vid)
            .map_or(false, |data| data.contains_key(key)))
    }

    async fn discard_vertex_data(
        &self,
        vid: &VertexId,
        key: &str,
    ) -> StorageResult<Option<DataValue>> {
        Ok(discard_data(&mut self.write()?.vertex_data, vid, key))
    }

    async fn vertex_data_keys(&self, vid: &VertexId) -> StorageResult<Vec<String>> {
        Ok(self
            .read()?
            .vertex_data
            .get(vid)
            .map_or_else(Vec::new, |data| data.keys().cloned().collect()))
    }

    async fn count_vertex_data_keys(&self, vid: &VertexId) -> StorageResult<usize> {
        Ok(self.read()?.vertex_data.get(vid).map_or(0, HashMap::len))
    }

    async fn get_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<Option<DataValue>> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self
            .read()?
            .edge_data
            .get(eid)
            .and_then(|data| data.get(key).cloned()))
    }

    async fn set_edge_data(
        &self,
        eid: &EdgeId,
        key: &str,
        value: DataValue,
    ) -> StorageResult<Option<DataValue>> {
        let eid: &EdgeId = &eid.to_normalized();
        let mut graph = self.write()?;
        graph.add_edge(eid);
        Ok(graph
            .edge_data
            .entry(eid.clone())
            .or_default()
            .insert(key.to_string(), value))
    }

    async fn has_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self
            .read()?
            .edge_data
            .get(eid)
            .map_or(false, |data| data.contains_key(key)))
    }

    async fn discard_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<Option<DataValue>> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(discard_data(&mut self.write()?.edge_data, eid, key))
    }

    async fn edge_data_keys(&self, eid: &EdgeId) -> StorageResult<Vec<String>> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self
            .read()?
            .edge_data
            .get(eid)
            .map_or_else(Vec::new, |data| data.keys().cloned().collect()))
    }

    async fn count_edge_data_keys(&self, eid: &EdgeId) -> StorageResult<usize> {
        let eid: &EdgeId = &eid.to_normalized();
        Ok(self.read()?.edge_data.get(eid).map_or(0, HashMap::len))
    }

    async fn shortest_path(
        &self,
        from: &VertexId,
        to: &VertexId,
    ) -> StorageResult<Option<GraphPath>> {
        Ok(self.read()?.shortest_path(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    #[tokio::test]
    async fn test_add_edge_creates_endpoints() {
        let store = MemoryStore::new();

        assert!(store.add_edge(&EdgeId::directed("a", "b")).await.unwrap());
        assert!(!store.add_edge(&EdgeId::directed("a", "b")).await.unwrap());

        assert_eq!(store.count_vertices().await.unwrap(), 2);
        assert_eq!(store.count_edges().await.unwrap(), 1);
        assert!(store.has_vertex(&"b".into()).await.unwrap());
        assert!(store.has_sink(&"a".into()).await.unwrap());
        assert!(store.has_source(&"b".into()).await.unwrap());
        assert!(!store.has_source(&"a".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_undirected_edges_listed_once() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::undirected(2, 1)).await.unwrap();
        store.add_edge(&EdgeId::undirected(3, 3)).await.unwrap();
        store.add_edge(&EdgeId::directed(1, 2)).await.unwrap();

        let edges = sorted(store.edges().await.unwrap());
        assert_eq!(
            edges,
            sorted(vec![
                EdgeId::directed(1, 2),
                EdgeId::undirected(1, 2),
                EdgeId::undirected(3, 3),
            ])
        );
        assert_eq!(store.count_edges().await.unwrap(), 3);
        assert_eq!(store.count_neighbors(&VertexId::from(3)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_discard_vertex_cascades() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::directed("a", "b")).await.unwrap();
        store.add_edge(&EdgeId::directed("c", "a")).await.unwrap();
        store.add_edge(&EdgeId::directed("a", "a")).await.unwrap();
        store.add_edge(&EdgeId::undirected("a", "d")).await.unwrap();
        store.add_edge(&EdgeId::directed("b", "c")).await.unwrap();
        store.add_edge_label(&EdgeId::directed("a", "b"), "knows").await.unwrap();

        assert!(store.discard_vertex(&"a".into()).await.unwrap());
        assert!(!store.discard_vertex(&"a".into()).await.unwrap());

        assert_eq!(store.count_vertices().await.unwrap(), 3);
        assert_eq!(store.count_edges().await.unwrap(), 1);
        assert_eq!(store.edges().await.unwrap(), vec![EdgeId::directed("b", "c")]);
        assert!(store.sources(&"b".into()).await.unwrap().is_empty());
        assert!(store.neighbors(&"d".into()).await.unwrap().is_empty());
        assert_eq!(
            store.count_edge_labels(&EdgeId::directed("a", "b")).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_labels_do_not_own_edge_existence() {
        let store = MemoryStore::new();
        let eid = EdgeId::directed(1, 2);

        assert!(store.add_edge_label(&eid, "x").await.unwrap());
        assert!(store.has_edge(&eid).await.unwrap());
        assert!(store.discard_edge_label(&eid, "x").await.unwrap());
        assert!(!store.discard_edge_label(&eid, "x").await.unwrap());

        assert!(store.has_edge(&eid).await.unwrap());
        assert!(store.edge_labels(&eid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vertex_data() {
        let store = MemoryStore::new();
        let vid = VertexId::from("v");

        assert_eq!(store.set_vertex_data(&vid, "age", json!(3)).await.unwrap(), None);
        assert_eq!(
            store.set_vertex_data(&vid, "age", json!(4)).await.unwrap(),
            Some(json!(3))
        );
        assert!(store.has_vertex(&vid).await.unwrap());
        assert_eq!(store.get_vertex_data(&vid, "age").await.unwrap(), Some(json!(4)));
        assert_eq!(store.vertex_data_keys(&vid).await.unwrap(), vec!["age".to_string()]);
        assert_eq!(
            store.discard_vertex_data(&vid, "age").await.unwrap(),
            Some(json!(4))
        );
        assert_eq!(store.count_vertex_data_keys(&vid).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_close_discards_state() {
        let store = MemoryStore::new();
        store.add_vertex(&"a".into()).await.unwrap();

        store.close().unwrap();
        assert!(!store.is_open());
        assert!(matches!(
            store.count_vertices().await,
            Err(StorageError::Closed)
        ));
        // Second close is a no-op
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_native_shortest_path() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::directed("a", "b")).await.unwrap();
        store.add_edge(&EdgeId::undirected("b", "c")).await.unwrap();

        let path = store
            .shortest_path(&"a".into(), &"c".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 2);
        assert!(path.validate().is_ok());
        assert!(store
            .shortest_path(&"c".into(), &"a".into())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_hand_built_undirected_id_is_normalized() {
        let store = MemoryStore::new();
        let raw = EdgeId::Undirected(VertexId::from(2), VertexId::from(1));
        let eid = EdgeId::undirected(1, 2);

        assert!(store.add_edge(&raw).await.unwrap());
        assert!(!store.add_edge(&eid).await.unwrap());
        assert!(store.add_edge_label(&raw, "x").await.unwrap());
        store.set_edge_data(&raw, "w", json!(1)).await.unwrap();

        assert_eq!(store.edges().await.unwrap(), vec![eid.clone()]);
        assert_eq!(store.edge_labels(&eid).await.unwrap(), vec!["x".to_string()]);
        assert_eq!(store.get_edge_data(&eid, "w").await.unwrap(), Some(json!(1)));
        assert!(store.has_edge_label(&raw, "x").await.unwrap());

        assert!(store.discard_edge_label(&raw, "x").await.unwrap());
        assert_eq!(store.discard_edge_data(&raw, "w").await.unwrap(), Some(json!(1)));

        assert!(store.discard_vertex(&VertexId::from(1)).await.unwrap());
        assert_eq!(store.count_edges().await.unwrap(), 0);
        assert!(store.edges().await.unwrap().is_empty());
        assert!(!store.has_edge(&raw).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_sources_and_sinks() {
        let store = MemoryStore::new();
        store.add_edge(&EdgeId::directed(1, 2)).await.unwrap();
        store.add_edge(&EdgeId::directed(1, 3)).await.unwrap();
        store.add_edge(&EdgeId::directed(3, 1)).await.unwrap();
        store.add_edge(&EdgeId::undirected(4, 5)).await.unwrap();

        assert_eq!(
            sorted(store.all_sources().await.unwrap()),
            vec![VertexId::from(1), VertexId::from(3)]
        );
        assert_eq!(store.count_all_sinks().await.unwrap(), 3);

        // Emptied adjacency sets do not count
        store.discard_edge(&EdgeId::directed(3, 1)).await.unwrap();
        assert_eq!(store.all_sources().await.unwrap(), vec![VertexId::from(1)]);
        assert_eq!(store.count_all_sources().await.unwrap(), 1);
        assert_eq!(
            sorted(store.all_sinks().await.unwrap()),
            vec![VertexId::from(2), VertexId::from(3)]
        );
    }
}
