use serde::{Deserialize, Serialize};
use std::fmt;

/// VertexId: opaque key identifying a vertex
///
/// Three key shapes are accepted:
/// - Integer keys (`i64`)
/// - String keys
/// - Raw byte keys
///
/// Ids are totally ordered (integers < strings < bytes), which lets
/// undirected edges normalise their endpoint pair.
///
/// Serialized untagged: `5`, `"alice"`, `[1, 2, 3]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexId {
    Int(i64),
    Str(String),
    Bytes(Vec<u8>),
}

impl VertexId {
    /// Encode the id as compact JSON
    ///
    /// JSON values are self-delimiting, so the encoding can be embedded in
    /// storage keys and still be split unambiguously.
    pub fn encode(&self) -> String {
        match self {
            VertexId::Int(n) => n.to_string(),
            // Strings and byte arrays cannot fail to serialize
            VertexId::Str(s) => serde_json::Value::String(s.clone()).to_string(),
            VertexId::Bytes(b) => serde_json::Value::from(b.clone()).to_string(),
        }
    }

    /// Decode an id produced by [`VertexId::encode`]
    pub fn decode(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded)
    }

    /// Decode the id at the start of `encoded`, returning it with the unread remainder
    pub fn decode_prefix(encoded: &str) -> Result<(Self, &str), serde_json::Error> {
        let mut stream = serde_json::Deserializer::from_str(encoded).into_iter::<VertexId>();
        match stream.next() {
            Some(Ok(id)) => Ok((id, &encoded[stream.byte_offset()..])),
            Some(Err(err)) => Err(err),
            None => Err(serde::de::Error::custom("missing vertex id")),
        }
    }

    /// Parse user input: valid JSON ids are decoded, anything else becomes a string key
    pub fn parse_lenient(input: &str) -> Self {
        Self::decode(input).unwrap_or_else(|_| VertexId::Str(input.to_string()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VertexId::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            VertexId::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexId::Int(n) => write!(f, "{}", n),
            VertexId::Str(s) => write!(f, "{}", s),
            VertexId::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for VertexId {
    fn from(n: i64) -> Self {
        VertexId::Int(n)
    }
}

impl From<i32> for VertexId {
    fn from(n: i32) -> Self {
        VertexId::Int(n as i64)
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        VertexId::Str(s.to_string())
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        VertexId::Str(s)
    }
}

impl From<&String> for VertexId {
    fn from(s: &String) -> Self {
        VertexId::Str(s.clone())
    }
}

impl From<Vec<u8>> for VertexId {
    fn from(b: Vec<u8>) -> Self {
        VertexId::Bytes(b)
    }
}

impl From<&[u8]> for VertexId {
    fn from(b: &[u8]) -> Self {
        VertexId::Bytes(b.to_vec())
    }
}

impl From<&VertexId> for VertexId {
    fn from(id: &VertexId) -> Self {
        id.clone()
    }
}
