//! Core type definitions for the graph store

use serde::Deserialize;

pub use trellis_algorithms::{Direction, EdgeIndex, GraphKind, NodeIndex};

/// Construction options for a [`GraphStore`](super::GraphStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Directed or undirected, fixed for the lifetime of the graph
    pub kind: GraphKind,
    /// Allow more than one edge between the same pair of nodes
    pub multigraph: bool,
    /// Reject edges that would close a cycle (directed graphs only)
    pub check_cycle: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            kind: GraphKind::Directed,
            multigraph: true,
            check_cycle: false,
        }
    }
}

impl GraphConfig {
    pub fn directed() -> Self {
        Self::default()
    }

    pub fn undirected() -> Self {
        Self {
            kind: GraphKind::Undirected,
            ..Self::default()
        }
    }

    /// Directed graph that refuses edges closing a cycle
    pub fn dag() -> Self {
        Self {
            check_cycle: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_display() {
        assert_eq!(NodeIndex::new(7).to_string(), "NodeIndex(7)");
        assert_eq!(EdgeIndex::new(2).to_string(), "EdgeIndex(2)");
        assert_eq!(NodeIndex::from(3).index(), 3);
    }

    #[test]
    fn test_config_presets() {
        assert_eq!(GraphConfig::default().kind, GraphKind::Directed);
        assert!(GraphConfig::default().multigraph);
        assert_eq!(GraphConfig::undirected().kind, GraphKind::Undirected);
        assert!(GraphConfig::dag().check_cycle);
    }

    #[test]
    fn test_config_deserialize() {
        let config: GraphConfig = serde_json::from_str(r#"{"kind": "undirected", "multigraph": false}"#).unwrap();
        assert_eq!(config.kind, GraphKind::Undirected);
        assert!(!config.multigraph);
        assert!(!config.check_cycle);
    }
}
