/// Vert: a graph sanity layer
///
/// One uniform graph API over pluggable storage back ends. Code written
/// against [`Graph`] runs unchanged on the in-memory store or on RocksDB.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │                      Vert                        │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Graph / VertexRef / EdgeRef  │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                  │
/// │  ┌────────────────────────────────┐              │
/// │  │   GraphStore trait             │              │
/// │  └──────┬─────────────────┬───────┘              │
/// │         ↓                 ↓                      │
/// │  ┌─────────────┐   ┌──────────────────┐          │
/// │  │ MemoryStore │   │ RocksDbStore     │          │
/// │  └─────────────┘   └──────────────────┘          │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Core data types (VertexId, EdgeId, GraphPath)
/// - `storage`: Back-end contract and the memory and RocksDB implementations
/// - `graph`: The graph session and its vertex, edge, label and data handles
/// - `algorithms`: Generic traversals (shortest path, reachability)
/// - `config`: Graph configuration from code or environment
/// - `tools`: Utilities (JSON/CSV import and export, petgraph snapshots)

pub mod types;
pub mod storage;
pub mod graph;
pub mod algorithms;
pub mod config;
pub mod tools;

// Re-export commonly used types
pub use types::{DataValue, EdgeId, GraphPath, Label, PathError, VertexId};

// Re-export graph handles
pub use graph::{Data, EdgeRef, Edges, Graph, Labels, VertexRef, Vertices};

// Re-export storage types
pub use storage::{GraphStore, MemoryStore, RocksDbStore, SharedStore, StorageError, StorageResult};

pub use config::{ConfigError, GraphConfig};

// Re-export tool types
pub use tools::{
    export_to_csv, export_to_json, import_from_csv, import_from_json, to_petgraph, ExportFormat,
    ExportOptions, ImportOptions, ImportStats, ToolError, ToolResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
