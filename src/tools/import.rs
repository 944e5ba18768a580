/// Data import utilities
///
/// Supports importing graph data from:
/// - JSON files (a [`GraphDocument`], as written by the exporter)
/// - CSV files (vertices and edges)
///
/// Imports merge into the target store: existing elements are kept and
/// gain the imported labels and data.

use super::export::LABEL_SEPARATOR;
use super::{EdgeEntry, GraphDocument, ToolError, ToolResult, VertexEntry};
use crate::storage::{GraphStore, SharedStore, StorageResult};
use crate::types::{DataValue, EdgeId, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Import options
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Skip invalid rows instead of failing
    pub skip_errors: bool,
    /// Progress reporting interval (rows)
    pub progress_interval: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_errors: false,
            progress_interval: 10000,
        }
    }
}

/// Import statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub vertices_skipped: usize,
    pub edges_skipped: usize,
    pub errors: Vec<String>,
}

impl ImportStats {
    fn add_error(&mut self, error: String) {
        tracing::warn!(%error, "skipping row");
        self.errors.push(error);
    }

    fn merge(&mut self, other: ImportStats) {
        self.vertices_imported += other.vertices_imported;
        self.edges_imported += other.edges_imported;
        self.vertices_skipped += other.vertices_skipped;
        self.edges_skipped += other.edges_skipped;
        self.errors.extend(other.errors);
    }
}

/// CSV vertex row
#[derive(Debug, Deserialize)]
struct CsvVertex {
    id: String,
    #[serde(default)]
    labels: String,
    #[serde(default)]
    data: String,
}

/// CSV edge row
#[derive(Debug, Deserialize)]
struct CsvEdge {
    source: String,
    sink: String,
    #[serde(default = "default_directed")]
    directed: bool,
    #[serde(default)]
    labels: String,
    #[serde(default)]
    data: String,
}

fn default_directed() -> bool {
    true
}

fn split_labels(cell: &str) -> Vec<String> {
    cell.split(LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_data_cell(cell: &str) -> ToolResult<BTreeMap<String, DataValue>> {
    if cell.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    match serde_json::from_str::<DataValue>(cell)? {
        DataValue::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ToolError::InvalidFormat(format!(
            "data cell must be a JSON object, got {}",
            other
        ))),
    }
}

impl TryFrom<CsvVertex> for VertexEntry {
    type Error = ToolError;

    fn try_from(row: CsvVertex) -> ToolResult<Self> {
        Ok(VertexEntry {
            id: VertexId::parse_lenient(&row.id),
            labels: split_labels(&row.labels),
            data: parse_data_cell(&row.data)?,
        })
    }
}

impl TryFrom<CsvEdge> for EdgeEntry {
    type Error = ToolError;

    fn try_from(row: CsvEdge) -> ToolResult<Self> {
        let source = VertexId::parse_lenient(&row.source);
        let sink = VertexId::parse_lenient(&row.sink);
        let id = if row.directed {
            EdgeId::directed(source, sink)
        } else {
            EdgeId::undirected(source, sink)
        };
        Ok(EdgeEntry {
            id,
            labels: split_labels(&row.labels),
            data: parse_data_cell(&row.data)?,
        })
    }
}

async fn apply_vertex(storage: &dyn GraphStore, entry: VertexEntry) -> StorageResult<()> {
    storage.add_vertex(&entry.id).await?;
    for label in &entry.labels {
        storage.add_vertex_label(&entry.id, label).await?;
    }
    for (key, value) in entry.data {
        storage.set_vertex_data(&entry.id, &key, value).await?;
    }
    Ok(())
}

async fn apply_edge(storage: &dyn GraphStore, entry: EdgeEntry) -> StorageResult<()> {
    let id = entry.id.normalized();
    storage.add_edge(&id).await?;
    for label in &entry.labels {
        storage.add_edge_label(&id, label).await?;
    }
    for (key, value) in entry.data {
        storage.set_edge_data(&id, &key, value).await?;
    }
    Ok(())
}

/// Merge a whole document into a store
pub async fn import_document(
    storage: &dyn GraphStore,
    document: GraphDocument,
    options: &ImportOptions,
) -> ToolResult<ImportStats> {
    let mut stats = ImportStats::default();
    let interval = options.progress_interval.max(1);

    tracing::debug!(vertices = document.vertices.len(), "importing vertices");
    for (index, entry) in document.vertices.into_iter().enumerate() {
        let id = entry.id.clone();
        match apply_vertex(storage, entry).await {
            Ok(()) => {
                stats.vertices_imported += 1;
                if stats.vertices_imported % interval == 0 {
                    tracing::debug!(count = stats.vertices_imported, "imported vertices");
                }
            }
            Err(e) if options.skip_errors => {
                stats.vertices_skipped += 1;
                stats.add_error(format!("Vertex {} ({}): {}", index, id, e));
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::debug!(edges = document.edges.len(), "importing edges");
    for (index, entry) in document.edges.into_iter().enumerate() {
        let id = entry.id.clone();
        match apply_edge(storage, entry).await {
            Ok(()) => {
                stats.edges_imported += 1;
                if stats.edges_imported % interval == 0 {
                    tracing::debug!(count = stats.edges_imported, "imported edges");
                }
            }
            Err(e) if options.skip_errors => {
                stats.edges_skipped += 1;
                stats.add_error(format!("Edge {} ({}): {}", index, id, e));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(stats)
}

/// Import an entire graph from a JSON file
///
/// JSON format:
/// ```json
/// {
///   "vertices": [{"id": "alice", "labels": ["person"], "data": {"age": 30}}],
///   "edges": [{"id": {"directed": ["alice", "bob"]}, "labels": ["knows"]}]
/// }
/// ```
pub async fn import_from_json<P: AsRef<Path>>(
    storage: SharedStore,
    path: P,
    options: ImportOptions,
) -> ToolResult<ImportStats> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let document: GraphDocument = serde_json::from_reader(reader)?;

    let stats = import_document(storage.as_ref(), document, &options).await?;

    tracing::info!(
        path = %path.as_ref().display(),
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        skipped = stats.vertices_skipped + stats.edges_skipped,
        "imported graph from JSON"
    );

    Ok(stats)
}

/// Import vertices from a CSV file
///
/// CSV format (ids are JSON-encoded; bare text is taken as a string id):
/// ```csv
/// id,labels,data
/// """alice""",person|admin,"{""age"":30}"
/// 7,,
/// ```
pub async fn import_vertices_from_csv<P: AsRef<Path>>(
    storage: &dyn GraphStore,
    path: P,
    options: &ImportOptions,
) -> ToolResult<ImportStats> {
    let mut csv_reader = csv::Reader::from_path(path.as_ref())?;
    let mut stats = ImportStats::default();
    let interval = options.progress_interval.max(1);

    for (row_num, result) in csv_reader.deserialize::<CsvVertex>().enumerate() {
        let outcome = match result {
            Ok(row) => match VertexEntry::try_from(row) {
                Ok(entry) => apply_vertex(storage, entry).await.map_err(ToolError::from),
                Err(e) => Err(e),
            },
            Err(e) => Err(ToolError::CsvError(e)),
        };

        match outcome {
            Ok(()) => {
                stats.vertices_imported += 1;
                if (row_num + 1) % interval == 0 {
                    tracing::debug!(count = stats.vertices_imported, "imported vertices");
                }
            }
            Err(e) if options.skip_errors => {
                stats.vertices_skipped += 1;
                stats.add_error(format!("Row {}: {}", row_num, e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(stats)
}

/// Import edges from a CSV edge list
///
/// CSV format (`directed` defaults to `true` when the column is absent):
/// ```csv
/// source,sink,directed,labels,data
/// 1,2,true,knows,
/// 2,3,false,,"{""weight"":0.5}"
/// ```
pub async fn import_edges_from_csv<P: AsRef<Path>>(
    storage: &dyn GraphStore,
    path: P,
    options: &ImportOptions,
) -> ToolResult<ImportStats> {
    let mut csv_reader = csv::Reader::from_path(path.as_ref())?;
    let mut stats = ImportStats::default();
    let interval = options.progress_interval.max(1);

    for (row_num, result) in csv_reader.deserialize::<CsvEdge>().enumerate() {
        let outcome = match result {
            Ok(row) => match EdgeEntry::try_from(row) {
                Ok(entry) => apply_edge(storage, entry).await.map_err(ToolError::from),
                Err(e) => Err(e),
            },
            Err(e) => Err(ToolError::CsvError(e)),
        };

        match outcome {
            Ok(()) => {
                stats.edges_imported += 1;
                if (row_num + 1) % interval == 0 {
                    tracing::debug!(count = stats.edges_imported, "imported edges");
                }
            }
            Err(e) if options.skip_errors => {
                stats.edges_skipped += 1;
                stats.add_error(format!("Row {}: {}", row_num, e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(stats)
}

/// Import from CSV files: an optional vertex file, then an edge list
pub async fn import_from_csv<P: AsRef<Path>>(
    storage: SharedStore,
    vertices_path: Option<P>,
    edges_path: P,
    options: ImportOptions,
) -> ToolResult<ImportStats> {
    let mut stats = ImportStats::default();

    if let Some(vertices_path) = vertices_path {
        let vertex_stats =
            import_vertices_from_csv(storage.as_ref(), vertices_path, &options).await?;
        stats.merge(vertex_stats);
    }

    let edge_stats = import_edges_from_csv(storage.as_ref(), edges_path, &options).await?;
    stats.merge(edge_stats);

    tracing::info!(
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        skipped = stats.vertices_skipped + stats.edges_skipped,
        "imported graph from CSV"
    );

    Ok(stats)
}
