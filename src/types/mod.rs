/// Core data types for the graph store
///
/// This module defines the fundamental types used throughout the system:
/// - VertexId: opaque vertex key (integer, string or bytes)
/// - EdgeId: directed or undirected pair of vertex keys
/// - GraphPath: Sequence of vertices and edges forming a path

pub mod edge_id;
pub mod path;
pub mod vertex_id;

pub use edge_id::EdgeId;
pub use path::{GraphPath, PathError};
pub use vertex_id::VertexId;

/// Vertex and edge label
pub type Label = String;

/// Value stored in a vertex or edge data map
pub type DataValue = serde_json::Value;
