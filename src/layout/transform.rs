//! Subtree translation on the primary axis

use crate::tree::{FamilyTree, NodeId};

/// Shift a node and its whole effective descent by `delta` on the primary
/// axis.
///
/// Spouses are not visited: a married-in box derives its position from its
/// kin spouse, so moving the kin side moves the union. Levels are solved
/// deepest first, which guarantees every shift event touches each affected
/// node exactly once.
pub fn translate(tree: &mut FamilyTree, node: NodeId, delta: f64) {
    tree.node_mut(node).main += delta;
    for child in tree.children_of(node) {
        translate(tree, child, delta);
    }
}
