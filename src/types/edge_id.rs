use super::vertex_id::VertexId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// EdgeId: identifies an edge by its endpoints
///
/// - `Directed(source, sink)`: ordered pair
/// - `Undirected(a, b)`: unordered pair, always stored with `a <= b`
///
/// Construct undirected ids through [`EdgeId::undirected`] so the pair is
/// normalised; both `undirected(x, y)` and `undirected(y, x)` then compare
/// and hash equal. Deserialized ids are normalised on the way in, and the
/// stores normalise every id they are handed.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "WireEdgeId")]
pub enum EdgeId {
    Directed(VertexId, VertexId),
    Undirected(VertexId, VertexId),
}

/// Serialized form of [`EdgeId`], before normalisation
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum WireEdgeId {
    Directed(VertexId, VertexId),
    Undirected(VertexId, VertexId),
}

impl From<WireEdgeId> for EdgeId {
    fn from(wire: WireEdgeId) -> Self {
        match wire {
            WireEdgeId::Directed(source, sink) => EdgeId::Directed(source, sink),
            WireEdgeId::Undirected(a, b) => EdgeId::undirected(a, b),
        }
    }
}

impl EdgeId {
    /// Create a directed edge id from `source` to `sink`
    pub fn directed(source: impl Into<VertexId>, sink: impl Into<VertexId>) -> Self {
        EdgeId::Directed(source.into(), sink.into())
    }

    /// Create a normalised undirected edge id
    pub fn undirected(a: impl Into<VertexId>, b: impl Into<VertexId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            EdgeId::Undirected(a, b)
        } else {
            EdgeId::Undirected(b, a)
        }
    }

    /// Restore the `a <= b` ordering of an undirected id built by hand
    /// (e.g. deserialized from an external file)
    pub fn normalized(self) -> Self {
        match self {
            EdgeId::Undirected(a, b) => EdgeId::undirected(a, b),
            directed => directed,
        }
    }

    /// Borrowing form of [`normalized`](Self::normalized); clones only
    /// when the endpoints are out of order
    pub fn to_normalized(&self) -> Cow<'_, EdgeId> {
        match self {
            EdgeId::Undirected(a, b) if a > b => {
                Cow::Owned(EdgeId::Undirected(b.clone(), a.clone()))
            }
            _ => Cow::Borrowed(self),
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, EdgeId::Directed(..))
    }

    /// Source vertex (the lesser endpoint for undirected edges)
    pub fn source(&self) -> &VertexId {
        match self {
            EdgeId::Directed(source, _) | EdgeId::Undirected(source, _) => source,
        }
    }

    /// Sink vertex (the greater endpoint for undirected edges)
    pub fn sink(&self) -> &VertexId {
        match self {
            EdgeId::Directed(_, sink) | EdgeId::Undirected(_, sink) => sink,
        }
    }

    /// Both endpoints in stored order
    pub fn vertices(&self) -> (&VertexId, &VertexId) {
        (self.source(), self.sink())
    }

    /// Check whether the edge touches `vid`
    pub fn is_incident(&self, vid: &VertexId) -> bool {
        self.source() == vid || self.sink() == vid
    }

    /// Given one endpoint, return the other
    pub fn opposite(&self, vid: &VertexId) -> Option<&VertexId> {
        if self.source() == vid {
            Some(self.sink())
        } else if self.sink() == vid {
            Some(self.source())
        } else {
            None
        }
    }

    /// Check if this edge is a self-loop
    pub fn is_self_loop(&self) -> bool {
        self.source() == self.sink()
    }

    /// Reverse the edge direction (undirected ids are returned unchanged)
    pub fn reverse(&self) -> Self {
        match self {
            EdgeId::Directed(source, sink) => EdgeId::Directed(sink.clone(), source.clone()),
            undirected => undirected.clone(),
        }
    }

    /// Encode the id as compact JSON, suitable for storage keys
    pub fn encode(&self) -> String {
        match self {
            EdgeId::Directed(source, sink) => format!("d:{}:{}", source.encode(), sink.encode()),
            EdgeId::Undirected(a, b) => format!("u:{}:{}", a.encode(), b.encode()),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeId::Directed(source, sink) => write!(f, "({})->({})", source, sink),
            EdgeId::Undirected(a, b) => write!(f, "({})--({})", a, b),
        }
    }
}

impl<A: Into<VertexId>, B: Into<VertexId>> From<(A, B)> for EdgeId {
    fn from((source, sink): (A, B)) -> Self {
        EdgeId::directed(source, sink)
    }
}

impl From<&EdgeId> for EdgeId {
    fn from(id: &EdgeId) -> Self {
        id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_edge_id() {
        let eid = EdgeId::directed("a", "b");
        assert!(eid.is_directed());
        assert_eq!(eid.source(), &VertexId::from("a"));
        assert_eq!(eid.sink(), &VertexId::from("b"));
        assert_ne!(eid, EdgeId::directed("b", "a"));
        assert_eq!(eid.reverse(), EdgeId::directed("b", "a"));
    }

    #[test]
    fn test_undirected_edge_id_is_symmetric() {
        let left = EdgeId::undirected("b", "a");
        let right = EdgeId::undirected("a", "b");
        assert_eq!(left, right);
        assert_eq!(left.source(), &VertexId::from("a"));
        assert!(!left.is_directed());
        assert_eq!(left.reverse(), left);
    }

    #[test]
    fn test_normalized_fixes_hand_built_ids() {
        let raw = EdgeId::Undirected(VertexId::from(9), VertexId::from(1));
        assert_eq!(raw.normalized(), EdgeId::undirected(1, 9));
    }

    #[test]
    fn test_to_normalized_borrows_ordered_ids() {
        let ordered = EdgeId::undirected(1, 9);
        assert!(matches!(ordered.to_normalized(), Cow::Borrowed(_)));
        let raw = EdgeId::Undirected(VertexId::from(9), VertexId::from(1));
        assert_eq!(raw.to_normalized().into_owned(), ordered);
        let directed = EdgeId::directed(9, 1);
        assert_eq!(directed.to_normalized().as_ref(), &directed);
    }

    #[test]
    fn test_deserialize_normalizes_undirected() {
        let restored: EdgeId = serde_json::from_str(r#"{"undirected":[2,1]}"#).unwrap();
        assert_eq!(restored, EdgeId::undirected(1, 2));
        let directed: EdgeId = serde_json::from_str(r#"{"directed":[2,1]}"#).unwrap();
        assert_eq!(directed, EdgeId::directed(2, 1));
    }

    #[test]
    fn test_opposite_and_incidence() {
        let eid = EdgeId::directed(1, 2);
        assert_eq!(eid.opposite(&VertexId::from(1)), Some(&VertexId::from(2)));
        assert_eq!(eid.opposite(&VertexId::from(3)), None);
        assert!(eid.is_incident(&VertexId::from(2)));
        assert!(EdgeId::directed(4, 4).is_self_loop());
    }

    #[test]
    fn test_tuple_conversion_is_directed() {
        let eid: EdgeId = ("x", "y").into();
        assert_eq!(eid, EdgeId::directed("x", "y"));
    }

    #[test]
    fn test_edge_id_serde() {
        let eid = EdgeId::undirected("a", 1);
        let json = serde_json::to_string(&eid).unwrap();
        assert_eq!(json, r#"{"undirected":[1,"a"]}"#);
        let restored: EdgeId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, eid);
    }

    #[test]
    fn test_edge_id_display() {
        assert_eq!(EdgeId::directed("a", "b").to_string(), "(a)->(b)");
        assert_eq!(EdgeId::undirected("b", "a").to_string(), "(a)--(b)");
    }
}
