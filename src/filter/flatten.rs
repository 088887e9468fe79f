//! Filter tree flattening
//!
//! The pre-order position of a node in the flattened tree is its parameter
//! index: `parameters[i]` is bound to placeholder `@i`.

use super::node::FilterNode;

/// Flattens a filter tree in pre-order (parent before children, children in
/// their original order).
pub fn flatten(root: &FilterNode) -> Vec<&FilterNode> {
    let mut nodes = Vec::with_capacity(root.node_count());
    push_preorder(root, &mut nodes);
    nodes
}

fn push_preorder<'a>(node: &'a FilterNode, nodes: &mut Vec<&'a FilterNode>) {
    nodes.push(node);
    for child in &node.children {
        push_preorder(child, nodes);
    }
}

/// Extracts the positional parameter list from a flattened tree.
///
/// Every node owns a slot; nodes without a value contribute an empty string.
pub fn parameters(flattened: &[&FilterNode]) -> Vec<String> {
    flattened
        .iter()
        .map(|node| node.value_str().to_string())
        .collect()
}
