//! Per-level position solving
//!
//! One pass walks the generations deepest first, so every parent is placed
//! against children whose coordinates are already final. Within a level each
//! cluster is swept left to right: cells without descendants accumulate at
//! the sibling margin, cells with descendants are pinned over them, and two
//! corrective moves keep the result tight: a collision shift when a pinned
//! cell would land inside the run before it, and a cousin-space reclamation
//! that pulls earlier anchor-free clusters back against the first pinned one.

use crate::tree::{Align, FamilyTree, NodeId};

use super::collector::{collect, Cell};
use super::config::LayoutConfig;
use super::{individual_main, span};

/// Run one full layout pass.
///
/// Recomputes every coordinate from scratch; the result depends only on the
/// tree and the configuration, so rerunning on an unchanged tree is a fixed
/// point. Total for any tree upholding the graph invariants.
pub fn solve(tree: &mut FamilyTree, config: &LayoutConfig) {
    let Some(root) = tree.root() else {
        return;
    };
    for depth in (0..=tree.depth(root)).rev() {
        solve_level(tree, config, root, depth);
    }
}

fn solve_level(tree: &mut FamilyTree, config: &LayoutConfig, root: NodeId, depth: u32) {
    let cross = {
        let step = (config.cross_slot() + config.parent_margin) * f64::from(depth);
        if config.orient.reversed() {
            -step
        } else {
            step
        }
    };

    let mut clusters = collect(tree, root, depth);
    let mut cursor = 0.0;
    // collision shifts roll forward into every later cluster of the level
    let mut carried = 0.0;
    let mut anchored = false;

    for index in 0..clusters.len() {
        if carried != 0.0 {
            for cell in clusters[index].iter_mut() {
                cell.shift(tree, carried);
            }
        }
        let mut anchors: Vec<Option<f64>> = clusters[index]
            .iter()
            .map(|cell| anchor(tree, cell, config))
            .collect();
        let len = anchors.len();
        let mut start = 0;

        while start < len {
            let pinned = (start..len).find(|i| anchors[*i].is_some());
            let end = pinned.unwrap_or(len);
            let run_span: f64 = (start..end)
                .map(|i| clusters[index][i].span(tree, config))
                .sum();
            let slots = (end - start + 1) as f64;

            let mut collision = 0.0;
            let mut margin = match pinned {
                // squeeze the run into the room left before the anchor
                Some(i) if anchored => {
                    (anchors[i].unwrap_or(0.0) - run_span - cursor + config.sibling_margin) / slots
                }
                _ => config.sibling_margin,
            };
            if margin < config.sibling_margin {
                collision = (config.sibling_margin - margin) * slots;
                margin = config.sibling_margin;
            } else if start == 0 {
                // widened spacing is only kept between two pinned runs
                margin = config.sibling_margin;
            }

            if start == 0 && pinned.is_some() {
                // no cursor yet: grow the leading run leftward from its anchor
                let mut edge = anchors[end].unwrap_or(0.0);
                for i in (start..end).rev() {
                    edge -= clusters[index][i].span(tree, config) + margin;
                    clusters[index][i].place(tree, edge + collision, cross);
                }
            } else {
                cursor += margin - config.sibling_margin;
                for i in start..end {
                    clusters[index][i].place(tree, cursor, cross);
                    cursor += clusters[index][i].span(tree, config) + margin;
                }
            }

            if let Some(end) = pinned {
                let at = anchors[end].unwrap_or(0.0);
                clusters[index][end].place(tree, at, cross);
                if collision != 0.0 {
                    // push the anchor and everything after it out of the run,
                    // descendants included
                    for i in end..len {
                        clusters[index][i].shift(tree, collision);
                        if let Some(a) = anchors[i].as_mut() {
                            *a += collision;
                        }
                    }
                }
                if !anchored {
                    anchored = true;
                    if index > 0 {
                        // earlier clusters had nothing to anchor to; close
                        // them up against this one at exactly the cousin gap
                        let delta = match clusters[index - 1].last() {
                            Some(tail) => {
                                clusters[index][0].main(tree)
                                    - config.cousin_margin
                                    - tail.main(tree)
                                    - tail.span(tree, config)
                            }
                            None => 0.0,
                        };
                        for cluster in clusters[..index].iter_mut() {
                            for cell in cluster.iter_mut() {
                                cell.shift(tree, delta);
                            }
                        }
                    }
                }
                cursor = anchors[end].unwrap_or(0.0)
                    + clusters[index][end].span(tree, config)
                    + config.sibling_margin;
            }

            start = end + 1;
            carried += collision;
        }

        cursor += config.cousin_margin - config.sibling_margin;
    }
}

/// The position a cell owes to its already-placed children; `None` for a
/// cell with nothing below it.
fn anchor(tree: &FamilyTree, cell: &Cell, config: &LayoutConfig) -> Option<f64> {
    match cell {
        Cell::Node(id) => node_anchor(tree, *id, config),
        Cell::Skip { node, level, .. } => {
            // a skip run holds exactly one child: the rest of the run, or the
            // wrapped node itself on the last level
            let slot = config.main_slot();
            let (child_main, child_span, child_coord) = if *level == 1 {
                (
                    tree.node(*node).main,
                    span(tree, *node, config),
                    individual_main(tree, *node, config),
                )
            } else {
                let main = tree.node(*node).main;
                (main, slot, main)
            };
            Some(match config.align {
                Align::Left => child_main,
                Align::Right => child_main + child_span - slot,
                Align::Center => (child_coord + child_coord + slot) / 2.0 - slot / 2.0,
            })
        }
    }
}

fn node_anchor(tree: &FamilyTree, id: NodeId, config: &LayoutConfig) -> Option<f64> {
    let children = tree.children_of(id);
    let (first, last) = match (children.first(), children.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return None,
    };
    let node = tree.node(id);
    let own_span = span(tree, id, config);
    let align = node.align().unwrap_or(config.align);

    Some(match align {
        Align::Left => tree.node(first).main,
        Align::Right => tree.node(last).main + span(tree, last, config) - own_span,
        Align::Center => {
            let slot = config.main_slot();
            let spouses = node.spouses();
            let mut width = own_span;
            let mut shift = 0.0;
            // a childless spouse is discounted so the group centers over the
            // side the children actually hang from
            let childless_side = if node.is_remarried() {
                !tree.has_children(spouses[0]) || !tree.has_children(spouses[1])
            } else {
                node.is_married()
                    && !tree.has_children(spouses[0])
                    && !node.children().is_empty()
            };
            if childless_side {
                width -= slot + config.spouse_margin;
                let leading = if node.is_remarried() {
                    !tree.has_children(spouses[0])
                } else {
                    tree.node(spouses[0]).before()
                };
                if leading {
                    shift = slot + config.spouse_margin;
                }
            }
            let lo = individual_main(tree, first, config);
            let hi = individual_main(tree, last, config);
            (lo + hi + slot) / 2.0 - (shift + width / 2.0)
        }
    })
}
