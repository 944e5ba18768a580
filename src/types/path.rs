use super::{edge_id::EdgeId, vertex_id::VertexId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for GraphPath operations
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path is empty")]
    EmptyPath,

    #[error("Path vertices and edges count mismatch: {vertices} vertices, {edges} edges")]
    CountMismatch { vertices: usize, edges: usize },

    #[error("Path discontinuity at position {pos}: edge {edge} does not connect {from} to {to}")]
    Discontinuity {
        pos: usize,
        edge: EdgeId,
        from: VertexId,
        to: VertexId,
    },
}

/// GraphPath represents a walk through the graph
///
/// A path consists of an alternating sequence of vertices and edges:
/// (v1) -[e1]- (v2) -[e2]- (v3) ... -[en]- (vn+1)
///
/// Invariants:
/// - vertices.len() = edges.len() + 1
/// - edges[i] leads from vertices[i] to vertices[i+1]; directed edges must
///   be traversed source to sink, undirected edges either way
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphPath {
    /// Vertices in the path
    pub vertices: Vec<VertexId>,

    /// Edges in the path
    pub edges: Vec<EdgeId>,
}

impl GraphPath {
    /// Create a new path with a single vertex (no edges)
    pub fn new(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
        }
    }

    /// Create a path from vertices and edges
    ///
    /// # Errors
    /// Returns an error if the path is invalid (wrong counts or discontinuous)
    pub fn from_parts(vertices: Vec<VertexId>, edges: Vec<EdgeId>) -> Result<Self, PathError> {
        let path = Self { vertices, edges };
        path.validate()?;
        Ok(path)
    }

    /// Validate the path invariants
    pub fn validate(&self) -> Result<(), PathError> {
        if self.vertices.is_empty() {
            return Err(PathError::EmptyPath);
        }

        if self.vertices.len() != self.edges.len() + 1 {
            return Err(PathError::CountMismatch {
                vertices: self.vertices.len(),
                edges: self.edges.len(),
            });
        }

        for (i, edge) in self.edges.iter().enumerate() {
            let from = &self.vertices[i];
            let to = &self.vertices[i + 1];
            if !Self::connects(edge, from, to) {
                return Err(PathError::Discontinuity {
                    pos: i,
                    edge: edge.clone(),
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        Ok(())
    }

    fn connects(edge: &EdgeId, from: &VertexId, to: &VertexId) -> bool {
        match edge {
            EdgeId::Directed(source, sink) => source == from && sink == to,
            EdgeId::Undirected(a, b) => (a == from && b == to) || (a == to && b == from),
        }
    }

    /// Append an edge and the vertex it leads to
    ///
    /// # Errors
    /// Returns an error if the edge doesn't connect to the last vertex
    pub fn push(&mut self, edge: EdgeId, vertex: VertexId) -> Result<(), PathError> {
        let last = self.end().clone();
        if !Self::connects(&edge, &last, &vertex) {
            return Err(PathError::Discontinuity {
                pos: self.edges.len(),
                edge,
                from: last,
                to: vertex,
            });
        }

        self.edges.push(edge);
        self.vertices.push(vertex);
        Ok(())
    }

    /// Number of edges in the path
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// A path with a single vertex and no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> &VertexId {
        &self.vertices[0]
    }

    pub fn end(&self) -> &VertexId {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Check if path contains a vertex (for cycle detection)
    pub fn contains_vertex(&self, vertex: &VertexId) -> bool {
        self.vertices.contains(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_vertex_path() {
        let path = GraphPath::new(VertexId::from("a"));
        assert!(path.is_empty());
        assert_eq!(path.start(), path.end());
        assert!(path.validate().is_ok());
    }

    #[test]
    fn test_push_directed_and_undirected() {
        let mut path = GraphPath::new(VertexId::from(1));
        path.push(EdgeId::directed(1, 2), VertexId::from(2)).unwrap();
        // Undirected edge stored as (2, 3) walked from 3 side is fine too
        path.push(EdgeId::undirected(3, 2), VertexId::from(3)).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path.end(), &VertexId::from(3));
        assert!(path.contains_vertex(&VertexId::from(2)));
    }

    #[test]
    fn test_push_against_direction_fails() {
        let mut path = GraphPath::new(VertexId::from(2));
        let result = path.push(EdgeId::directed(1, 2), VertexId::from(1));
        assert!(matches!(result, Err(PathError::Discontinuity { pos: 0, .. })));
    }

    #[test]
    fn test_from_parts_validation() {
        let result = GraphPath::from_parts(vec![], vec![]);
        assert!(matches!(result, Err(PathError::EmptyPath)));

        let result = GraphPath::from_parts(vec![VertexId::from(1)], vec![EdgeId::directed(1, 2)]);
        assert!(matches!(result, Err(PathError::CountMismatch { .. })));

        let ok = GraphPath::from_parts(
            vec![VertexId::from(1), VertexId::from(2)],
            vec![EdgeId::directed(1, 2)],
        );
        assert!(ok.is_ok());
    }
}
