/// Data import and export tools
///
/// This module provides utilities for moving graphs between stores and
/// files, and for handing a snapshot to `petgraph` algorithms.

pub mod export;
pub mod import;
pub mod snapshot;

pub use export::{export_document, export_to_csv, export_to_json, ExportFormat, ExportOptions};
pub use import::{import_document, import_from_csv, import_from_json, ImportOptions, ImportStats};
pub use snapshot::to_petgraph;

use crate::types::{DataValue, EdgeId, Label, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Import/export errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// A whole graph as a serializable document
///
/// ```json
/// {
///   "vertices": [{"id": "a", "labels": ["person"], "data": {"age": 3}}],
///   "edges": [{"id": {"directed": ["a", "b"]}, "labels": ["knows"], "data": {}}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<VertexEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexEntry {
    pub id: VertexId,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub data: BTreeMap<String, DataValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub id: EdgeId,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub data: BTreeMap<String, DataValue>,
}
