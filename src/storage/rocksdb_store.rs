/// RocksDB storage implementation
///
/// Key space design:
/// - Vertex:     v:{graph}:{vid} → JSON {labels, data}
/// - Edge:       e:{graph}:{eid} → JSON {id, labels, data}
/// - OutEdge:    o:{graph}:{source}:{sink} → empty
/// - InEdge:     i:{graph}:{sink}:{source} → empty
/// - Undirected: u:{graph}:{a}:{b} → empty (stored for both ends)
/// - Counter:    c:{graph}:{vertices|edges} → u64 LE
///
/// Ids are embedded as compact JSON, which is self-delimiting, so the
/// remainder after an index prefix always decodes to exactly one id.

use super::error::{StorageError, StorageResult};
use super::GraphStore;
use crate::types::{DataValue, EdgeId, Label, VertexId};
use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use rocksdb::{Options, WriteBatch, WriteOptions, DB};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

const VERTEX_COUNTER: &str = "vertices";
const EDGE_COUNTER: &str = "edges";

/// Stored value of a vertex key
#[derive(Debug, Default, Serialize, Deserialize)]
struct VertexRecord {
    #[serde(default)]
    labels: BTreeSet<Label>,
    #[serde(default)]
    data: BTreeMap<String, DataValue>,
}

/// Stored value of an edge key
#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    id: EdgeId,
    #[serde(default)]
    labels: BTreeSet<Label>,
    #[serde(default)]
    data: BTreeMap<String, DataValue>,
}

impl EdgeRecord {
    fn new(id: EdgeId) -> Self {
        Self {
            id,
            labels: BTreeSet::new(),
            data: BTreeMap::new(),
        }
    }
}

/// Options for opening a RocksDB store
#[derive(Debug, Clone)]
pub struct RocksDbOptions {
    /// Create the database directory if it does not exist
    pub create_if_missing: bool,
    /// fsync the WAL on every write
    pub sync_writes: bool,
}

impl Default for RocksDbOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_writes: false,
        }
    }
}

/// A batch of writes plus the counter adjustments it implies
#[derive(Default)]
struct Mutation {
    batch: WriteBatch,
    vertices: i64,
    edges: i64,
}

/// RocksDB-backed graph storage
///
/// Every mutation is applied as one `WriteBatch`. Writers are serialised so
/// read-modify-write of records and counters cannot interleave.
pub struct RocksDbStore {
    /// RocksDB database instance
    db: DB,

    /// Database directory
    path: PathBuf,

    /// Graph name (namespace)
    graph_name: String,

    write_options: WriteOptions,

    /// Held for the duration of every mutation
    write_lock: Mutex<()>,

    open: AtomicBool,
}

impl RocksDbStore {
    /// Create a new RocksDB storage instance with default options
    ///
    /// # Arguments
    /// * `path` - Path to the database directory
    /// * `graph_name` - Name of the graph (namespace)
    pub fn new<P: AsRef<Path>>(path: P, graph_name: impl Into<String>) -> StorageResult<Self> {
        Self::open(path, graph_name, RocksDbOptions::default())
    }

    /// Open a store with explicit options
    pub fn open<P: AsRef<Path>>(
        path: P,
        graph_name: impl Into<String>,
        options: RocksDbOptions,
    ) -> StorageResult<Self> {
        let graph_name = graph_name.into();
        if graph_name.is_empty() || graph_name.contains(':') {
            return Err(StorageError::InvalidGraphName(graph_name));
        }

        let mut opts = Options::default();
        opts.create_if_missing(options.create_if_missing);

        let db = DB::open(&opts, path.as_ref())?;

        let mut write_options = WriteOptions::default();
        write_options.set_sync(options.sync_writes);

        tracing::info!(
            path = %path.as_ref().display(),
            graph = %graph_name,
            sync_writes = options.sync_writes,
            "opened rocksdb graph store"
        );

        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
            graph_name,
            write_options,
            write_lock: Mutex::new(()),
            open: AtomicBool::new(true),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StorageError::Closed)
        }
    }

    /// Take the writer lock; fails if the store was closed while waiting
    fn lock_writer(&self) -> StorageResult<MutexGuard<'_, ()>> {
        let guard = self.write_lock.lock();
        self.ensure_open()?;
        Ok(guard)
    }

    /// Make key for a vertex
    fn make_vertex_key(&self, vid: &VertexId) -> String {
        format!("v:{}:{}", self.graph_name, vid.encode())
    }

    /// Make key prefix for vertex scan
    fn make_vertex_prefix(&self) -> String {
        format!("v:{}:", self.graph_name)
    }

    /// Make key for an edge
    fn make_edge_key(&self, eid: &EdgeId) -> String {
        format!("e:{}:{}", self.graph_name, eid.encode())
    }

    /// Make key prefix for edge scan
    fn make_edge_prefix(&self) -> String {
        format!("e:{}:", self.graph_name)
    }

    /// Make key for outgoing edge index
    fn make_outgoing_key(&self, source: &VertexId, sink: &VertexId) -> String {
        format!("o:{}:{}:{}", self.graph_name, source.encode(), sink.encode())
    }

    /// Make key prefix for outgoing edges
    fn make_outgoing_prefix(&self, source: &VertexId) -> String {
        format!("o:{}:{}:", self.graph_name, source.encode())
    }

    /// Make key prefix for the whole outgoing index
    fn make_outgoing_index_prefix(&self) -> String {
        format!("o:{}:", self.graph_name)
    }

    /// Make key prefix for the whole incoming index
    fn make_incoming_index_prefix(&self) -> String {
        format!("i:{}:", self.graph_name)
    }

    /// Make key for incoming edge index
    fn make_incoming_key(&self, sink: &VertexId, source: &VertexId) -> String {
        format!("i:{}:{}:{}", self.graph_name, sink.encode(), source.encode())
    }

    /// Make key prefix for incoming edges
    fn make_incoming_prefix(&self, sink: &VertexId) -> String {
        format!("i:{}:{}:", self.graph_name, sink.encode())
    }

    /// Make key for undirected edge index
    fn make_undirected_key(&self, vid: &VertexId, other: &VertexId) -> String {
        format!("u:{}:{}:{}", self.graph_name, vid.encode(), other.encode())
    }

    /// Make key prefix for undirected edges
    fn make_undirected_prefix(&self, vid: &VertexId) -> String {
        format!("u:{}:{}:", self.graph_name, vid.encode())
    }

    /// Make key for a counter
    fn make_counter_key(&self, counter: &str) -> String {
        format!("c:{}:{}", self.graph_name, counter)
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn contains_key(&self, key: &str) -> StorageResult<bool> {
        Ok(self.db.get_pinned(key.as_bytes())?.is_some())
    }

    fn read_vertex(&self, vid: &VertexId) -> StorageResult<Option<VertexRecord>> {
        self.get_json(&self.make_vertex_key(vid))
    }

    fn read_edge(&self, eid: &EdgeId) -> StorageResult<Option<EdgeRecord>> {
        self.get_json(&self.make_edge_key(eid))
    }

    /// Visit every key under `prefix`, passing the key remainder and value
    fn scan_prefix<F>(&self, prefix: &str, mut visit: F) -> StorageResult<()>
    where
        F: FnMut(&str, &[u8]) -> StorageResult<bool>,
    {
        let iter = self.db.prefix_iterator(prefix.as_bytes());

        for item in iter {
            let (key, value) = item?;
            let key_str = std::str::from_utf8(&key)?;

            // Check if key still matches prefix
            let Some(rest) = key_str.strip_prefix(prefix) else {
                break;
            };

            if !visit(rest, &value)? {
                break;
            }
        }

        Ok(())
    }

    /// Decode the vertex ids stored after an index prefix
    fn scan_ids(&self, prefix: &str) -> StorageResult<Vec<VertexId>> {
        let mut ids = Vec::new();
        self.scan_prefix(prefix, |rest, _| {
            let id = VertexId::decode(rest).map_err(|_| StorageError::CorruptKey(format!("{}{}", prefix, rest)))?;
            ids.push(id);
            Ok(true)
        })?;
        Ok(ids)
    }

    /// Decode the distinct leading vertex ids of the index keys under `prefix`
    ///
    /// Keys sharing a leading id are adjacent, so duplicates are consecutive.
    fn scan_leading_ids(&self, prefix: &str) -> StorageResult<Vec<VertexId>> {
        let mut ids: Vec<VertexId> = Vec::new();
        self.scan_prefix(prefix, |rest, _| {
            let (id, _) = VertexId::decode_prefix(rest)
                .map_err(|_| StorageError::CorruptKey(format!("{}{}", prefix, rest)))?;
            if ids.last() != Some(&id) {
                ids.push(id);
            }
            Ok(true)
        })?;
        Ok(ids)
    }

    fn count_prefix(&self, prefix: &str) -> StorageResult<usize> {
        let mut count = 0;
        self.scan_prefix(prefix, |_, _| {
            count += 1;
            Ok(true)
        })?;
        Ok(count)
    }

    fn prefix_exists(&self, prefix: &str) -> StorageResult<bool> {
        let mut found = false;
        self.scan_prefix(prefix, |_, _| {
            found = true;
            Ok(false)
        })?;
        Ok(found)
    }

    fn read_counter(&self, counter: &str) -> StorageResult<u64> {
        let key = self.make_counter_key(counter);
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| StorageError::CorruptKey(key.clone()))?;
                Ok(u64::from_le_bytes(raw))
            }
            None => Ok(0),
        }
    }

    fn stage_counter(&self, batch: &mut WriteBatch, counter: &str, delta: i64) -> StorageResult<()> {
        if delta == 0 {
            return Ok(());
        }
        let current = self.read_counter(counter)?;
        let next = current
            .checked_add_signed(delta)
            .ok_or_else(|| StorageError::Other(format!("{} counter out of range", counter)))?;
        batch.put(self.make_counter_key(counter).as_bytes(), next.to_le_bytes());
        Ok(())
    }

    /// Apply counters and write the batch atomically
    fn commit(&self, mut mutation: Mutation) -> StorageResult<()> {
        self.stage_counter(&mut mutation.batch, VERTEX_COUNTER, mutation.vertices)?;
        self.stage_counter(&mut mutation.batch, EDGE_COUNTER, mutation.edges)?;
        self.db.write_opt(mutation.batch, &self.write_options)?;
        Ok(())
    }

    fn put_vertex(&self, m: &mut Mutation, vid: &VertexId, record: &VertexRecord) -> StorageResult<()> {
        m.batch
            .put(self.make_vertex_key(vid).as_bytes(), serde_json::to_vec(record)?);
        Ok(())
    }

    fn put_edge(&self, m: &mut Mutation, record: &EdgeRecord) -> StorageResult<()> {
        m.batch
            .put(self.make_edge_key(&record.id).as_bytes(), serde_json::to_vec(record)?);
        Ok(())
    }

    /// Existing vertex record, or a fresh one counted as a new vertex.
    /// The caller must put the returned record.
    fn load_or_create_vertex(&self, m: &mut Mutation, vid: &VertexId) -> StorageResult<VertexRecord> {
        match self.read_vertex(vid)? {
            Some(record) => Ok(record),
            None => {
                m.vertices += 1;
                Ok(VertexRecord::default())
            }
        }
    }

    /// Existing edge record, or a fresh one with endpoints and indices staged.
    /// The caller must put the returned record.
    fn load_or_create_edge(&self, m: &mut Mutation, eid: &EdgeId) -> StorageResult<EdgeRecord> {
        if let Some(record) = self.read_edge(eid)? {
            return Ok(record);
        }

        let (a, b) = eid.vertices();
        if !self.contains_key(&self.make_vertex_key(a))? {
            self.put_vertex(m, a, &VertexRecord::default())?;
            m.vertices += 1;
        }
        if a != b && !self.contains_key(&self.make_vertex_key(b))? {
            self.put_vertex(m, b, &VertexRecord::default())?;
            m.vertices += 1;
        }

        match eid {
            EdgeId::Directed(source, sink) => {
                m.batch.put(self.make_outgoing_key(source, sink).as_bytes(), b"");
                m.batch.put(self.make_incoming_key(sink, source).as_bytes(), b"");
            }
            EdgeId::Undirected(a, b) => {
                m.batch.put(self.make_undirected_key(a, b).as_bytes(), b"");
                m.batch.put(self.make_undirected_key(b, a).as_bytes(), b"");
            }
        }
        m.edges += 1;

        Ok(EdgeRecord::new(eid.clone()))
    }

    /// Stage removal of an edge known to exist
    fn stage_edge_delete(&self, m: &mut Mutation, eid: &EdgeId) {
        m.batch.delete(self.make_edge_key(eid).as_bytes());
        match eid {
            EdgeId::Directed(source, sink) => {
                m.batch.delete(self.make_outgoing_key(source, sink).as_bytes());
                m.batch.delete(self.make_incoming_key(sink, source).as_bytes());
            }
            EdgeId::Undirected(a, b) => {
                m.batch.delete(self.make_undirected_key(a, b).as_bytes());
                m.batch.delete(self.make_undirected_key(b, a).as_bytes());
            }
        }
        m.edges -= 1;
    }

    fn incident_edges(&self, vid: &VertexId) -> StorageResult<Vec<EdgeId>> {
        let mut incident = Vec::new();
        for sink in self.scan_ids(&self.make_outgoing_prefix(vid))? {
            incident.push(EdgeId::Directed(vid.clone(), sink));
        }
        for source in self.scan_ids(&self.make_incoming_prefix(vid))? {
            // Self-loops were already collected from the outgoing side
            if source != *vid {
                incident.push(EdgeId::Directed(source, vid.clone()));
            }
        }
        for other in self.scan_ids(&self.make_undirected_prefix(vid))? {
            incident.push(EdgeId::undirected(vid.clone(), other));
        }
        Ok(incident)
    }
}

#[async_trait]
impl GraphStore for RocksDbStore {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn close(&self) -> StorageResult<()> {
        if !self.open.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        // Wait for in-flight writers before flushing
        let _guard = self.write_lock.lock();
        self.db.flush()?;
        tracing::info!(path = %self.path.display(), graph = %self.graph_name, "closed rocksdb graph store");
        Ok(())
    }

    async fn count_vertices(&self) -> StorageResult<usize> {
        self.ensure_open()?;
        Ok(self.read_counter(VERTEX_COUNTER)? as usize)
    }

    async fn count_edges(&self) -> StorageResult<usize> {
        self.ensure_open()?;
        Ok(self.read_counter(EDGE_COUNTER)? as usize)
    }

    async fn vertices(&self) -> StorageResult<Vec<VertexId>> {
        self.ensure_open()?;
        self.scan_ids(&self.make_vertex_prefix())
    }

    async fn edges(&self) -> StorageResult<Vec<EdgeId>> {
        self.ensure_open()?;
        let mut edges = Vec::new();
        self.scan_prefix(&self.make_edge_prefix(), |_, value| {
            let record: EdgeRecord = serde_json::from_slice(value)?;
            edges.push(record.id);
            Ok(true)
        })?;
        Ok(edges)
    }

    async fn has_source(&self, sink: &VertexId) -> StorageResult<bool> {
        self.ensure_open()?;
        self.prefix_exists(&self.make_incoming_prefix(sink))
    }

    async fn has_sink(&self, source: &VertexId) -> StorageResult<bool> {
        self.ensure_open()?;
        self.prefix_exists(&self.make_outgoing_prefix(source))
    }

    async fn sources(&self, sink: &VertexId) -> StorageResult<Vec<VertexId>> {
        self.ensure_open()?;
        self.scan_ids(&self.make_incoming_prefix(sink))
    }

    async fn sinks(&self, source: &VertexId) -> StorageResult<Vec<VertexId>> {
        self.ensure_open()?;
        self.scan_ids(&self.make_outgoing_prefix(source))
    }

    async fn count_sources(&self, sink: &VertexId) -> StorageResult<usize> {
        self.ensure_open()?;
        self.count_prefix(&self.make_incoming_prefix(sink))
    }

    async fn count_sinks(&self, source: &VertexId) -> StorageResult<usize> {
        self.ensure_open()?;
        self.count_prefix(&self.make_outgoing_prefix(source))
    }

    async fn all_sources(&self) -> StorageResult<Vec<VertexId>> {
        self.ensure_open()?;
        self.scan_leading_ids(&self.make_outgoing_index_prefix())
    }

    async fn all_sinks(&self) -> StorageResult<Vec<VertexId>> {
        self.ensure_open()?;
        self.scan_leading_ids(&self.make_incoming_index_prefix())
    }

    async fn neighbors(&self, vid: &VertexId) -> StorageResult<Vec<VertexId>> {
        self.ensure_open()?;
        self.scan_ids(&self.make_undirected_prefix(vid))
    }

    async fn count_neighbors(&self, vid: &VertexId) -> StorageResult<usize> {
        self.ensure_open()?;
        self.count_prefix(&self.make_undirected_prefix(vid))
    }

    async fn has_vertex(&self, vid: &VertexId) -> StorageResult<bool> {
        self.ensure_open()?;
        self.contains_key(&self.make_vertex_key(vid))
    }

    async fn has_edge(&self, eid: &EdgeId) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        self.contains_key(&self.make_edge_key(eid))
    }

    async fn add_vertex(&self, vid: &VertexId) -> StorageResult<bool> {
        let _guard = self.lock_writer()?;

        if self.contains_key(&self.make_vertex_key(vid))? {
            return Ok(false);
        }

        let mut m = Mutation::default();
        self.put_vertex(&mut m, vid, &VertexRecord::default())?;
        m.vertices += 1;
        self.commit(m)?;
        Ok(true)
    }

    async fn add_edge(&self, eid: &EdgeId) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        let _guard = self.lock_writer()?;

        if self.contains_key(&self.make_edge_key(eid))? {
            return Ok(false);
        }

        let mut m = Mutation::default();
        let record = self.load_or_create_edge(&mut m, eid)?;
        self.put_edge(&mut m, &record)?;
        self.commit(m)?;
        Ok(true)
    }

    async fn discard_vertex(&self, vid: &VertexId) -> StorageResult<bool> {
        let _guard = self.lock_writer()?;

        if !self.contains_key(&self.make_vertex_key(vid))? {
            return Ok(false);
        }

        let incident = self.incident_edges(vid)?;
        tracing::debug!(vertex = %vid, edges = incident.len(), "discarding vertex with incident edges");

        let mut m = Mutation::default();
        for eid in &incident {
            self.stage_edge_delete(&mut m, eid);
        }
        m.batch.delete(self.make_vertex_key(vid).as_bytes());
        m.vertices -= 1;
        self.commit(m)?;
        Ok(true)
    }

    async fn discard_edge(&self, eid: &EdgeId) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        let _guard = self.lock_writer()?;

        if !self.contains_key(&self.make_edge_key(eid))? {
            return Ok(false);
        }

        let mut m = Mutation::default();
        self.stage_edge_delete(&mut m, eid);
        self.commit(m)?;
        Ok(true)
    }

    async fn add_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool> {
        let _guard = self.lock_writer()?;

        let mut m = Mutation::default();
        let mut record = self.load_or_create_vertex(&mut m, vid)?;
        let inserted = record.labels.insert(label.to_string());
        if inserted || m.vertices > 0 {
            self.put_vertex(&mut m, vid, &record)?;
            self.commit(m)?;
        }
        Ok(inserted)
    }

    async fn has_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool> {
        self.ensure_open()?;
        Ok(self
            .read_vertex(vid)?
            .map_or(false, |record| record.labels.contains(label)))
    }

    async fn discard_vertex_label(&self, vid: &VertexId, label: &str) -> StorageResult<bool> {
        let _guard = self.lock_writer()?;

        let Some(mut record) = self.read_vertex(vid)? else {
            return Ok(false);
        };
        if !record.labels.remove(label) {
            return Ok(false);
        }
        let mut m = Mutation::default();
        self.put_vertex(&mut m, vid, &record)?;
        self.commit(m)?;
        Ok(true)
    }

    async fn vertex_labels(&self, vid: &VertexId) -> StorageResult<Vec<Label>> {
        self.ensure_open()?;
        Ok(self
            .read_vertex(vid)?
            .map_or_else(Vec::new, |record| record.labels.into_iter().collect()))
    }

    async fn count_vertex_labels(&self, vid: &VertexId) -> StorageResult<usize> {
        self.ensure_open()?;
        Ok(self.read_vertex(vid)?.map_or(0, |record| record.labels.len()))
    }

    async fn add_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        let _guard = self.lock_writer()?;

        let mut m = Mutation::default();
        let mut record = self.load_or_create_edge(&mut m, eid)?;
        let inserted = record.labels.insert(label.to_string());
        if inserted || m.edges > 0 {
            self.put_edge(&mut m, &record)?;
            self.commit(m)?;
        }
        Ok(inserted)
    }

    async fn has_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self
            .read_edge(eid)?
            .map_or(false, |record| record.labels.contains(label)))
    }

    async fn discard_edge_label(&self, eid: &EdgeId, label: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        let _guard = self.lock_writer()?;

        let Some(mut record) = self.read_edge(eid)? else {
            return Ok(false);
        };
        if !record.labels.remove(label) {
            return Ok(false);
        }
        let mut m = Mutation::default();
        self.put_edge(&mut m, &record)?;
        self.commit(m)?;
        Ok(true)
    }

    async fn edge_labels(&self, eid: &EdgeId) -> StorageResult<Vec<Label>> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self
            .read_edge(eid)?
            .map_or_else(Vec::new, |record| record.labels.into_iter().collect()))
    }

    async fn count_edge_labels(&self, eid: &EdgeId) -> StorageResult<usize> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self.read_edge(eid)?.map_or(0, |record| record.labels.len()))
    }

    async fn get_vertex_data(&self, vid: &VertexId, key: &str) -> StorageResult<Option<DataValue>> {
        self.ensure_open()?;
        Ok(self
            .read_vertex(vid)?
            .and_then(|mut record| record.data.remove(key)))
    }

    async fn set_vertex_data(
        &self,
        vid: &VertexId,
        key: &str,
        value: DataValue,
    ) -> StorageResult<Option<DataValue>> {
        let _guard = self.lock_writer()?;

        let mut m = Mutation::default();
        let mut record = self.load_or_create_vertex(&mut m, vid)?;
        let previous = record.data.insert(key.to_string(), value);
        self.put_vertex(&mut m, vid, &record)?;
        self.commit(m)?;
        Ok(previous)
    }

    async fn has_vertex_data(&self, vid: &VertexId, key: &str) -> StorageResult<bool> {
        self.ensure_open()?;
        Ok(self
            .read_vertex(vid)?
            .map_or(false, |record| record.data.contains_key(key)))
    }

    async fn discard_vertex_data(
        &self,
        vid: &VertexId,
        key: &str,
    ) -> StorageResult<Option<DataValue>> {
        let _guard = self.lock_writer()?;

        let Some(mut record) = self.read_vertex(vid)? else {
            return Ok(None);
        };
        let removed = record.data.remove(key);
        if removed.is_some() {
            let mut m = Mutation::default();
            self.put_vertex(&mut m, vid, &record)?;
            self.commit(m)?;
        }
        Ok(removed)
    }

    async fn vertex_data_keys(&self, vid: &VertexId) -> StorageResult<Vec<String>> {
        self.ensure_open()?;
        Ok(self
            .read_vertex(vid)?
            .map_or_else(Vec::new, |record| record.data.into_keys().collect()))
    }

    async fn count_vertex_data_keys(&self, vid: &VertexId) -> StorageResult<usize> {
        self.ensure_open()?;
        Ok(self.read_vertex(vid)?.map_or(0, |record| record.data.len()))
    }

    async fn get_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<Option<DataValue>> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self
            .read_edge(eid)?
            .and_then(|mut record| record.data.remove(key)))
    }

    async fn set_edge_data(
        &self,
        eid: &EdgeId,
        key: &str,
        value: DataValue,
    ) -> StorageResult<Option<DataValue>> {
        let eid: &EdgeId = &eid.to_normalized();
        let _guard = self.lock_writer()?;

        let mut m = Mutation::default();
        let mut record = self.load_or_create_edge(&mut m, eid)?;
        let previous = record.data.insert(key.to_string(), value);
        self.put_edge(&mut m, &record)?;
        self.commit(m)?;
        Ok(previous)
    }

    async fn has_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<bool> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self
            .read_edge(eid)?
            .map_or(false, |record| record.data.contains_key(key)))
    }

    async fn discard_edge_data(&self, eid: &EdgeId, key: &str) -> StorageResult<Option<DataValue>> {
        let eid: &EdgeId = &eid.to_normalized();
        let _guard = self.lock_writer()?;

        let Some(mut record) = self.read_edge(eid)? else {
            return Ok(None);
        };
        let removed = record.data.remove(key);
        if removed.is_some() {
            let mut m = Mutation::default();
            self.put_edge(&mut m, &record)?;
            self.commit(m)?;
        }
        Ok(removed)
    }

    async fn edge_data_keys(&self, eid: &EdgeId) -> StorageResult<Vec<String>> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self
            .read_edge(eid)?
            .map_or_else(Vec::new, |record| record.data.into_keys().collect()))
    }

    async fn count_edge_data_keys(&self, eid: &EdgeId) -> StorageResult<usize> {
        let eid: &EdgeId = &eid.to_normalized();
        self.ensure_open()?;
        Ok(self.read_edge(eid)?.map_or(0, |record| record.data.len()))
    }
}
