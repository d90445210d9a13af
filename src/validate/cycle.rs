//! Directed cycle detection.

use std::collections::HashSet;

use crate::model::{WorkflowEdge, WorkflowGraph, WorkflowNode};

/// Returns `true` if following edges from any node leads back onto the
/// current traversal path. A self-loop counts as a cycle of length one.
///
/// Every node is used as a traversal root, so disconnected components are
/// explored too. The walk keeps an explicit stack, so path length is bounded
/// by memory rather than by the call stack. Visited/on-path state is local to
/// the call.
pub fn has_cycle(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> bool {
    let graph = WorkflowGraph::build(nodes, edges);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();

    for &root in graph.roots() {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);
        let mut stack = vec![(root, graph.graph.neighbors(root))];

        while let Some((node, successors)) = stack.last_mut() {
            let node = *node;
            match successors.next() {
                Some(next) if on_path.contains(next) => return true,
                Some(next) => {
                    if visited.insert(next) {
                        on_path.insert(next);
                        stack.push((next, graph.graph.neighbors(next)));
                    }
                }
                None => {
                    on_path.remove(node);
                    stack.pop();
                }
            }
        }
    }

    false
}
