/// Graph configuration
///
/// Settings can be built in code, deserialized, or read from the
/// environment (a `.env` file is loaded first if present):
///
/// | Variable                 | Field               | Default     |
/// |--------------------------|---------------------|-------------|
/// | `VERT_DB_PATH`           | `path`              | unset (in-memory) |
/// | `VERT_GRAPH_NAME`        | `graph_name`        | `default`   |
/// | `VERT_CREATE_IF_MISSING` | `create_if_missing` | `true`      |
/// | `VERT_SYNC_WRITES`       | `sync_writes`       | `false`     |

use crate::graph::DEFAULT_GRAPH_NAME;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} (expected true/false)")]
    InvalidBool { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Database directory; `None` keeps the graph in memory
    pub path: Option<PathBuf>,
    /// Namespace inside the database
    pub graph_name: String,
    pub create_if_missing: bool,
    /// fsync every write
    pub sync_writes: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: None,
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            create_if_missing: true,
            sync_writes: false,
        }
    }
}

impl GraphConfig {
    /// Configuration for a persistent graph at `path`
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            path: lookup("VERT_DB_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            graph_name: lookup("VERT_GRAPH_NAME").unwrap_or(defaults.graph_name),
            create_if_missing: parse_bool(&lookup, "VERT_CREATE_IF_MISSING", defaults.create_if_missing)?,
            sync_writes: parse_bool(&lookup, "VERT_SYNC_WRITES", defaults.sync_writes)?,
        })
    }
}

fn parse_bool<F>(lookup: &F, var: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                var: var.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GraphConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GraphConfig::default());
        assert!(config.path.is_none());
    }

    #[test]
    fn test_reads_variables() {
        let config = GraphConfig::from_lookup(lookup_from(&[
            ("VERT_DB_PATH", "/tmp/graph"),
            ("VERT_GRAPH_NAME", "social"),
            ("VERT_SYNC_WRITES", "yes"),
            ("VERT_CREATE_IF_MISSING", "0"),
        ]))
        .unwrap();

        assert_eq!(config.path, Some(PathBuf::from("/tmp/graph")));
        assert_eq!(config.graph_name, "social");
        assert!(config.sync_writes);
        assert!(!config.create_if_missing);
    }

    #[test]
    fn test_rejects_bad_bool() {
        let result = GraphConfig::from_lookup(lookup_from(&[("VERT_SYNC_WRITES", "maybe")]));
        assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GraphConfig =
            serde_json::from_str(r#"{"path": "data/g", "sync_writes": true}"#).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("data/g")));
        assert_eq!(config.graph_name, DEFAULT_GRAPH_NAME);
        assert!(config.sync_writes);
    }
}
