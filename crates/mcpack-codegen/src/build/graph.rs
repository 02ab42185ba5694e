//! The discovered function graph.
//!
//! Nodes are stored in discovery order and indexed by [`FunctionKey`].
//! Edges are the references left in each node's rendered lines.

use mcpack_common::Identifier;

use crate::ir::{FunctionKey, Line};

/// One rendered function declaration.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub key: FunctionKey,
    /// Human-readable label used to name anonymous functions.
    pub label: String,
    /// The caller-chosen identifier for explicitly registered functions.
    pub explicit: Option<Identifier>,
    pub lines: Vec<Line>,
    pub on_load: bool,
    pub on_tick: bool,
}

impl FunctionNode {
    pub fn is_explicit(&self) -> bool {
        self.explicit.is_some()
    }
}

#[derive(Debug, Default)]
pub struct FunctionGraph {
    nodes: Vec<FunctionNode>,
}

impl FunctionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Nodes arrive in key order, so the key doubles as the
    /// index.
    pub fn add_node(&mut self, node: FunctionNode) {
        debug_assert_eq!(node.key.index(), self.nodes.len());
        self.nodes.push(node);
    }

    pub fn get(&self, key: FunctionKey) -> Option<&FunctionNode> {
        self.nodes.get(key.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionNode> {
        self.nodes.iter()
    }

    pub fn into_nodes(self) -> Vec<FunctionNode> {
        self.nodes
    }

    /// Functions referenced by `key`, deduplicated, in first-use order.
    pub fn dependencies(&self, key: FunctionKey) -> Vec<FunctionKey> {
        let mut deps = Vec::new();
        if let Some(node) = self.get(key) {
            for dep in node.lines.iter().flat_map(Line::references) {
                if !deps.contains(&dep) {
                    deps.push(dep);
                }
            }
        }
        deps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: u32, refs: &[u32]) -> FunctionNode {
        let mut line = Line::from_text("say");
        for r in refs {
            line.push_text(" ");
            line.push_ref(FunctionKey(*r));
        }
        FunctionNode {
            key: FunctionKey(key),
            label: format!("f{key}"),
            explicit: None,
            lines: vec![line],
            on_load: false,
            on_tick: false,
        }
    }

    #[test]
    fn nodes_are_indexed_by_key() {
        let mut graph = FunctionGraph::new();
        graph.add_node(node(0, &[]));
        graph.add_node(node(1, &[]));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get(FunctionKey(1)).unwrap().label, "f1");
        assert!(graph.get(FunctionKey(2)).is_none());
    }

    #[test]
    fn dependencies_are_deduplicated() {
        let mut graph = FunctionGraph::new();
        graph.add_node(node(0, &[2, 1, 2]));
        graph.add_node(node(1, &[]));
        graph.add_node(node(2, &[0]));
        assert_eq!(
            graph.dependencies(FunctionKey(0)),
            vec![FunctionKey(2), FunctionKey(1)]
        );
        assert_eq!(graph.dependencies(FunctionKey(2)), vec![FunctionKey(0)]);
        assert!(graph.dependencies(FunctionKey(1)).is_empty());
    }
}
