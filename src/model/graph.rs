//! petgraph-based directed view over a node/edge snapshot.

use std::collections::HashMap;

use petgraph::graphmap::DiGraphMap;

use super::types::{WorkflowEdge, WorkflowNode};

/// Borrowed graph view built fresh for every check.
///
/// The map collapses parallel edges, so degrees are tracked separately from
/// the raw edge list. Edges naming ids outside the node set are kept: their
/// endpoints join the graph and count towards degrees, but are never used as
/// traversal roots.
pub struct WorkflowGraph<'a> {
    pub graph: DiGraphMap<&'a str, ()>,
    roots: Vec<&'a str>,
    incoming: HashMap<&'a str, usize>,
    outgoing: HashMap<&'a str, usize>,
}

impl<'a> WorkflowGraph<'a> {
    pub fn build(nodes: &'a [WorkflowNode], edges: &'a [WorkflowEdge]) -> Self {
        let mut graph = DiGraphMap::new();
        let mut roots = Vec::with_capacity(nodes.len());
        let mut incoming = HashMap::new();
        let mut outgoing = HashMap::new();

        for node in nodes {
            graph.add_node(node.id());
            roots.push(node.id());
        }

        for edge in edges {
            graph.add_edge(edge.source.as_str(), edge.target.as_str(), ());
            *outgoing.entry(edge.source.as_str()).or_insert(0) += 1;
            *incoming.entry(edge.target.as_str()).or_insert(0) += 1;
        }

        WorkflowGraph {
            graph,
            roots,
            incoming,
            outgoing,
        }
    }

    /// Node ids in node-set order.
    pub fn roots(&self) -> &[&'a str] {
        &self.roots
    }

    pub fn successors(&self, node_id: &'a str) -> Vec<&'a str> {
        if !self.graph.contains_node(node_id) {
            return vec![];
        }
        self.graph.neighbors(node_id).collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.incoming.get(node_id).copied().unwrap_or(0)
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.outgoing.get(node_id).copied().unwrap_or(0)
    }

    /// Whether the node is the source or target of at least one edge.
    pub fn is_connected(&self, node_id: &str) -> bool {
        self.incoming_count(node_id) > 0 || self.outgoing_count(node_id) > 0
    }
}
