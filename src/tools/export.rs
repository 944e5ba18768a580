/// Data export utilities
///
/// Supports exporting graph data to:
/// - JSON files (a full [`GraphDocument`])
/// - CSV files (one file for vertices, one for edges; data maps as JSON cells)

use super::{EdgeEntry, GraphDocument, ToolError, ToolResult, VertexEntry};
use crate::storage::{GraphStore, SharedStore, StorageResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Separator between labels inside one CSV cell
pub const LABEL_SEPARATOR: &str = "|";

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// Include header row in CSV
    pub csv_header: bool,
    /// Progress reporting interval
    pub progress_interval: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty_json: true,
            csv_header: true,
            progress_interval: 10000,
        }
    }
}

/// Collect every vertex and edge, with labels and data, in id order
pub async fn export_document(storage: &dyn GraphStore) -> StorageResult<GraphDocument> {
    let mut vertex_ids = storage.vertices().await?;
    vertex_ids.sort();
    let mut edge_ids = storage.edges().await?;
    edge_ids.sort();

    let mut document = GraphDocument::default();

    for id in vertex_ids {
        let mut labels = storage.vertex_labels(&id).await?;
        labels.sort();
        let mut data = BTreeMap::new();
        for key in storage.vertex_data_keys(&id).await? {
            if let Some(value) = storage.get_vertex_data(&id, &key).await? {
                data.insert(key, value);
            }
        }
        document.vertices.push(VertexEntry { id, labels, data });
    }

    for id in edge_ids {
        let mut labels = storage.edge_labels(&id).await?;
        labels.sort();
        let mut data = BTreeMap::new();
        for key in storage.edge_data_keys(&id).await? {
            if let Some(value) = storage.get_edge_data(&id, &key).await? {
                data.insert(key, value);
            }
        }
        document.edges.push(EdgeEntry { id, labels, data });
    }

    Ok(document)
}

/// Export entire graph to a JSON file
pub async fn export_to_json<P: AsRef<Path>>(
    storage: SharedStore,
    path: P,
    options: ExportOptions,
) -> ToolResult<(usize, usize)> {
    let document = export_document(storage.as_ref()).await?;

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    if options.pretty_json {
        serde_json::to_writer_pretty(&mut writer, &document)?;
    } else {
        serde_json::to_writer(&mut writer, &document)?;
    }
    writer.flush()?;

    tracing::info!(
        path = %path.as_ref().display(),
        vertices = document.vertices.len(),
        edges = document.edges.len(),
        "exported graph to JSON"
    );

    Ok((document.vertices.len(), document.edges.len()))
}

/// CSV vertex row
#[derive(Debug, Serialize)]
struct CsvVertexRow {
    id: String,
    labels: String,
    data: String,
}

/// CSV edge row
#[derive(Debug, Serialize)]
struct CsvEdgeRow {
    source: String,
    sink: String,
    directed: bool,
    labels: String,
    data: String,
}

/// Join labels into one cell, rejecting labels the importer would split or trim
fn join_labels(labels: &[String]) -> ToolResult<String> {
    for label in labels {
        if label.is_empty() || label.contains(LABEL_SEPARATOR) || label.trim() != label {
            return Err(ToolError::InvalidFormat(format!(
                "label {:?} cannot be written to a CSV labels cell",
                label
            )));
        }
    }
    Ok(labels.join(LABEL_SEPARATOR))
}

fn data_cell(data: &BTreeMap<String, serde_json::Value>) -> serde_json::Result<String> {
    if data.is_empty() {
        Ok(String::new())
    } else {
        serde_json::to_string(data)
    }
}

/// Export entire graph to CSV files (separate files for vertices and edges)
///
/// Vertex ids are written in their JSON encoding so integer, string and
/// byte ids survive a round trip. Labels that are empty, contain
/// [`LABEL_SEPARATOR`] or carry surrounding whitespace fail with
/// [`ToolError::InvalidFormat`].
pub async fn export_to_csv<P: AsRef<Path>>(
    storage: SharedStore,
    vertices_path: P,
    edges_path: P,
    options: ExportOptions,
) -> ToolResult<(usize, usize)> {
    let document = export_document(storage.as_ref()).await?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(options.csv_header)
        .from_path(vertices_path.as_ref())?;
    for (count, vertex) in document.vertices.iter().enumerate() {
        writer.serialize(CsvVertexRow {
            id: vertex.id.encode(),
            labels: join_labels(&vertex.labels)?,
            data: data_cell(&vertex.data)?,
        })?;
        if (count + 1) % options.progress_interval.max(1) == 0 {
            tracing::debug!(count = count + 1, "exported vertices");
        }
    }
    writer.flush()?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(options.csv_header)
        .from_path(edges_path.as_ref())?;
    for (count, edge) in document.edges.iter().enumerate() {
        writer.serialize(CsvEdgeRow {
            source: edge.id.source().encode(),
            sink: edge.id.sink().encode(),
            directed: edge.id.is_directed(),
            labels: join_labels(&edge.labels)?,
            data: data_cell(&edge.data)?,
        })?;
        if (count + 1) % options.progress_interval.max(1) == 0 {
            tracing::debug!(count = count + 1, "exported edges");
        }
    }
    writer.flush()?;

    tracing::info!(
        vertices = document.vertices.len(),
        edges = document.edges.len(),
        "exported graph to CSV"
    );

    Ok((document.vertices.len(), document.edges.len()))
}
