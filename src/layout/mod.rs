//! Layout engine for kinship charts
//!
//! Turns a [`FamilyTree`] into finalized per-node coordinates: one
//! [`solve`] pass walks the generations deepest first and leaves every node
//! with a primary/secondary coordinate pair that [`position`] maps to
//! geometric x/y for the configured orientation.

pub mod config;
pub mod engine;
pub mod transform;

mod collector;

pub use config::{LayoutConfig, Orient};
pub use engine::solve;
pub use transform::translate;

use crate::tree::{FamilyTree, NodeId};

/// Finalized geometric position of an individual's own box.
///
/// Kin nodes carry the coordinate of their whole marriage group; the box of
/// a married node is offset inside that group, and a married-in box derives
/// its place from the kin spouse entirely.
pub fn position(tree: &FamilyTree, id: NodeId, config: &LayoutConfig) -> (f64, f64) {
    let main = individual_main(tree, id, config);
    let cross = individual_cross(tree, id);
    config.to_xy(main, cross)
}

/// Footprint of a node's marriage group along the primary axis.
pub fn span(tree: &FamilyTree, id: NodeId, config: &LayoutConfig) -> f64 {
    config.main_slot() + config.spouse_step() * tree.node(id).spouses().len() as f64
}

pub(crate) fn individual_main(tree: &FamilyTree, id: NodeId, config: &LayoutConfig) -> f64 {
    let node = tree.node(id);
    if !node.is_married() {
        node.main
    } else if node.is_kin() {
        let first = tree.node(node.spouses()[0]);
        let index = if node.is_remarried() || first.before() {
            1.0
        } else {
            0.0
        };
        node.main + config.spouse_step() * index
    } else {
        let partner = tree.node(node.spouses()[0]);
        let index = if partner.is_remarried() {
            if partner.spouses()[0] == id {
                0.0
            } else {
                2.0
            }
        } else if node.before() {
            0.0
        } else {
            1.0
        };
        partner.main + config.spouse_step() * index
    }
}

fn individual_cross(tree: &FamilyTree, id: NodeId) -> f64 {
    let node = tree.node(id);
    if node.is_married() && !node.is_kin() {
        tree.node(node.spouses()[0]).cross
    } else {
        node.cross
    }
}
