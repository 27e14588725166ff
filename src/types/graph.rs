//! Dependency graph output types.
//!
//! The graph is the render-ready node/link list a force-directed layout
//! consumes. Node ids are repository-relative file paths; the analyzer
//! guarantees that every edge endpoint is present in the node set.

use serde::{Deserialize, Serialize};

use super::entry::basename_of;

/// One analyzed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Repository-relative file path, unique within one graph.
    pub id: String,
    /// Display label: the file's basename.
    pub label: String,
    /// File extension, used by consumers to color nodes by language.
    #[serde(rename = "type")]
    pub language: String,
}

impl DependencyNode {
    pub fn for_file(path: &str) -> Self {
        let language = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_else(|| "file".to_string());
        Self {
            id: path.to_string(),
            label: basename_of(path).to_string(),
            language,
        }
    }
}

/// A directed import edge between two analyzed files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

/// The full graph for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_for_file() {
        let node = DependencyNode::for_file("src/lib/util.js");
        assert_eq!(node.id, "src/lib/util.js");
        assert_eq!(node.label, "util.js");
        assert_eq!(node.language, "js");
    }

    #[test]
    fn test_node_without_extension() {
        let node = DependencyNode::for_file("Makefile");
        assert_eq!(node.label, "Makefile");
        assert_eq!(node.language, "file");
    }

    #[test]
    fn test_graph_serialization_shape() {
        let graph = DependencyGraph {
            nodes: vec![DependencyNode::for_file("a.js")],
            edges: vec![DependencyEdge {
                source: "a.js".to_string(),
                target: "b.js".to_string(),
            }],
        };
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["type"], "js");
        assert_eq!(json["edges"][0]["source"], "a.js");
    }
}
