//! Per-depth collection of sibling clusters
//!
//! The solver never walks the tree itself; for every depth it asks this
//! module for the ordered clusters of cells to place. A cell is either a real
//! node or a skip cell standing in for a run of unrecorded generations. Skip
//! cells exist only for the duration of one pass and are never registered in
//! the tree.

use std::collections::HashSet;

use crate::tree::{FamilyTree, NodeId};

use super::config::LayoutConfig;
use super::span;
use super::transform::translate;

/// One unit the solver places at a level.
///
/// A `Skip` cell reports the coordinate of the real node it wraps, so a
/// depth-indexed walk sees the skipped run as empty generations while the
/// node's true position stays available for size and anchor math. `level`
/// counts how many unknown generations remain above the wrapped node at the
/// level this cell was collected for.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Node(NodeId),
    Skip { node: NodeId, level: u32, main: f64 },
}

impl Cell {
    fn skip(tree: &FamilyTree, node: NodeId, level: u32) -> Self {
        Cell::Skip {
            node,
            level,
            main: tree.node(node).main,
        }
    }

    pub(crate) fn main(&self, tree: &FamilyTree) -> f64 {
        match self {
            Cell::Node(id) => tree.node(*id).main,
            Cell::Skip { main, .. } => *main,
        }
    }

    /// Footprint along the primary axis; a skip cell occupies a bare slot.
    pub(crate) fn span(&self, tree: &FamilyTree, config: &LayoutConfig) -> f64 {
        match self {
            Cell::Node(id) => span(tree, *id, config),
            Cell::Skip { .. } => config.main_slot(),
        }
    }

    /// Pin the cell at a level coordinate. Assignments to a skip cell stay
    /// with the cell: the wrapped node was already placed at its true depth.
    pub(crate) fn place(&mut self, tree: &mut FamilyTree, main: f64, cross: f64) {
        match self {
            Cell::Node(id) => {
                let node = tree.node_mut(*id);
                node.main = main;
                node.cross = cross;
            }
            Cell::Skip { main: pos, .. } => *pos = main,
        }
    }

    /// Shift the cell together with the subtree hanging from it.
    pub(crate) fn shift(&mut self, tree: &mut FamilyTree, delta: f64) {
        match self {
            Cell::Node(id) => translate(tree, *id, delta),
            Cell::Skip { node, main, .. } => {
                *main += delta;
                translate(tree, *node, delta);
            }
        }
    }
}

/// A walk position: a real node, or a point inside a skip run.
#[derive(Debug, Clone, Copy)]
enum Walk {
    Node(NodeId),
    Skip { node: NodeId, level: u32 },
}

impl Walk {
    fn into_cell(self, tree: &FamilyTree) -> Cell {
        match self {
            Walk::Node(id) => Cell::Node(id),
            Walk::Skip { node, level } => Cell::skip(tree, node, level),
        }
    }
}

/// Collect the ordered sibling clusters `depth` generations below `start`.
///
/// Each cluster holds the cells found under one common kin ancestor, and
/// clusters follow the pre-order ancestor-visit order. The `expanded` set
/// makes sure a skip run is materialized exactly once per walk even though
/// deeper recursion revisits the same child.
pub(crate) fn collect(tree: &FamilyTree, start: NodeId, depth: u32) -> Vec<Vec<Cell>> {
    let mut expanded = HashSet::new();
    collect_from(tree, Walk::Node(start), depth, &mut expanded)
}

fn collect_from(
    tree: &FamilyTree,
    start: Walk,
    depth: u32,
    expanded: &mut HashSet<NodeId>,
) -> Vec<Vec<Cell>> {
    if depth == 0 {
        return vec![vec![start.into_cell(tree)]];
    }
    if depth == 1 {
        if let Walk::Node(id) = start {
            let skips = tree.node(id).skips();
            if skips > 0 && !expanded.contains(&id) {
                return vec![vec![Cell::skip(tree, id, skips)]];
            }
        }
        let cells: Vec<Cell> = step_children(tree, start)
            .into_iter()
            .map(|child| match child {
                Walk::Node(id) => {
                    let skips = tree.node(id).skips();
                    if skips == 0 || expanded.contains(&id) {
                        Cell::Node(id)
                    } else {
                        Cell::skip(tree, id, skips)
                    }
                }
                Walk::Skip { node, level } => Cell::skip(tree, node, level),
            })
            .collect();
        return if cells.is_empty() { vec![] } else { vec![cells] };
    }

    let mut clusters = Vec::new();
    for child in step_children(tree, start) {
        match child {
            Walk::Node(id) if tree.node(id).skips() > 0 && !expanded.contains(&id) => {
                expanded.insert(id);
                let run = Walk::Skip {
                    node: id,
                    level: tree.node(id).skips(),
                };
                clusters.extend(collect_from(tree, run, depth - 1, expanded));
            }
            other => clusters.extend(collect_from(tree, other, depth - 1, expanded)),
        }
    }
    clusters
}

/// One generation down from a walk position. Inside a skip run the only
/// child is the rest of the run, then the wrapped node itself.
fn step_children(tree: &FamilyTree, at: Walk) -> Vec<Walk> {
    match at {
        Walk::Node(id) => tree.children_of(id).into_iter().map(Walk::Node).collect(),
        Walk::Skip { node, level } if level > 1 => vec![Walk::Skip {
            node,
            level: level - 1,
        }],
        Walk::Skip { node, .. } => vec![Walk::Node(node)],
    }
}
