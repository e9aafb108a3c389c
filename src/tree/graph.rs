//! The kinship graph: ownership, wiring invariants, cascade removal
//!
//! All nodes live in an arena owned by [`FamilyTree`]; relationships are
//! index lists into that arena. Mutations validate up front and only then
//! wire, so a failed operation leaves no partial state behind.

use std::collections::HashMap;

use super::error::TreeError;
use super::node::{Individual, NodeId, NodeSpec};

/// A kinship graph with exactly one root (while non-empty).
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    arena: Vec<Option<Individual>>,
    index: HashMap<String, NodeId>,
    root: Option<NodeId>,
}

impl FamilyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The layout's focal anchor; `None` only for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve a textual id to its arena index.
    pub fn lookup(&self, id: &str) -> Result<NodeId, TreeError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| TreeError::UnknownId(id.to_string()))
    }

    pub fn node(&self, id: NodeId) -> &Individual {
        self.arena[id.0].as_ref().expect("node id out of date")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Individual {
        self.arena[id.0].as_mut().expect("node id out of date")
    }

    /// Live nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Individual)> {
        self.arena
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|node| (NodeId(i), node)))
    }

    /// Validate and wire a new individual.
    ///
    /// The first node ever added becomes the root; every later node must name
    /// a parent or a spouse (never both). See [`TreeError`] for the causes
    /// that can be rejected here.
    pub fn add(&mut self, spec: &NodeSpec) -> Result<NodeId, TreeError> {
        if spec.id.is_empty() {
            return Err(TreeError::MissingId);
        }
        if self.index.contains_key(&spec.id) {
            return Err(TreeError::DuplicateId(spec.id.clone()));
        }
        if !self.index.is_empty() && spec.parent.is_none() && spec.spouse.is_none() {
            return Err(TreeError::Orphan(spec.id.clone()));
        }
        let spouse = match &spec.spouse {
            Some(id) => Some(self.lookup(id)?),
            None => None,
        };
        let parent = match &spec.parent {
            Some(id) => Some(self.lookup(id)?),
            None => None,
        };
        if let Some(sp) = spouse {
            let target = self.node(sp);
            if !target.is_kin() {
                return Err(TreeError::SpouseNotKin(target.id.clone()));
            }
            if target.is_remarried() {
                return Err(TreeError::SpouseLimit(target.id.clone()));
            }
            if target.is_married() && !target.children.is_empty() {
                return Err(TreeError::SpouseHasChildren(target.id.clone()));
            }
        }
        if let Some(p) = parent {
            if self.node(p).is_remarried() {
                return Err(TreeError::ParentRemarried(self.node(p).id.clone()));
            }
        }
        if let (Some(_), Some(sp)) = (parent, spouse) {
            return Err(TreeError::ConsanguineUnion {
                id: spec.id.clone(),
                spouse: self.node(sp).id.clone(),
            });
        }

        let id = NodeId(self.arena.len());
        let mut node = Individual::from_spec(spec);
        node.is_root = self.index.is_empty();
        if let Some(p) = parent {
            if self.node(p).is_kin() {
                node.parents = vec![p];
                // A first out-of-marriage child arriving after union children
                // flips the primary spouse in front of it.
                let flip = self.node(p).children.is_empty() && self.has_children(p);
                if flip {
                    let primary = self.node(p).spouses[0];
                    self.node_mut(primary).before = true;
                }
            } else {
                let other = self.node(p).spouses[0];
                node.parents = vec![p, other];
            }
            self.node_mut(p).children.push(id);
        }
        if let Some(sp) = spouse {
            node.spouses = vec![sp];
            self.node_mut(sp).spouses.push(id);
        }
        if node.is_root {
            self.root = Some(id);
        }
        self.index.insert(spec.id.clone(), id);
        self.arena.push(Some(node));
        Ok(id)
    }

    /// Remove a node.
    ///
    /// A kin node takes its married-in spouses and its whole descendant
    /// subtree with it; a married-in node is merely detached from its kin
    /// spouse. The root is only removable with `force`.
    pub fn remove(&mut self, id: &str, force: bool) -> Result<(), TreeError> {
        let nid = self.lookup(id)?;
        if self.node(nid).is_root && !force {
            return Err(TreeError::RemoveRoot(id.to_string()));
        }
        self.remove_subtree(nid);
        Ok(())
    }

    fn remove_subtree(&mut self, nid: NodeId) {
        let parents = self.node(nid).parents.clone();
        for p in parents {
            self.node_mut(p).children.retain(|c| *c != nid);
        }
        let kin = self.node(nid).is_kin();
        let spouses = self.node(nid).spouses.clone();
        for sp in spouses {
            if !kin || self.node(sp).is_root {
                // A spouse re-marked as root survives the cascade; only the
                // union is dissolved.
                self.node_mut(sp).spouses.retain(|s| *s != nid);
                let kids = self.node(sp).children.clone();
                for c in kids {
                    self.node_mut(c).parents.retain(|p| *p != nid);
                }
            } else {
                self.remove_subtree(sp);
            }
        }
        let children = self.node(nid).children.clone();
        for c in children {
            self.remove_subtree(c);
        }
        if let Some(node) = self.arena[nid.0].take() {
            self.index.remove(&node.id);
        }
        if self.root == Some(nid) {
            self.root = None;
        }
    }

    /// Re-anchor the tree on `id`: detach it from its parent chain, mark it
    /// root, and drop the now-unreachable remainder of the old root's
    /// subtree.
    pub fn reroot(&mut self, id: &str) -> Result<(), TreeError> {
        let new = self.lookup(id)?;
        let old = match self.root {
            Some(old) if old != new => old,
            _ => return Ok(()),
        };
        let parents = self.node(new).parents.clone();
        for p in parents {
            self.node_mut(p).children.retain(|c| *c != new);
        }
        self.node_mut(new).parents.clear();
        self.node_mut(new).is_root = true;
        self.root = Some(new);
        self.node_mut(old).is_root = false;
        self.remove_subtree(old);
        Ok(())
    }

    /// All children of a node in sibling traversal order.
    ///
    /// For a married kin node the union children of each spouse interleave
    /// with its own out-of-marriage children: with the primary spouse flagged
    /// `before` the order is `[spouse0's, own, spouse1's]`, otherwise
    /// `[own, spouse0's, spouse1's]`. Every level of the solver walks
    /// siblings in exactly this order.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        let node = self.node(id);
        if !node.is_kin() || !node.is_married() {
            return node.children.clone();
        }
        let mut out = Vec::new();
        if self.node(node.spouses[0]).before {
            out.extend_from_slice(&self.node(node.spouses[0]).children);
            out.extend_from_slice(&node.children);
            for sp in &node.spouses[1..] {
                out.extend_from_slice(&self.node(*sp).children);
            }
        } else {
            out.extend_from_slice(&node.children);
            for sp in &node.spouses {
                out.extend_from_slice(&self.node(*sp).children);
            }
        }
        out
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children_of(id).is_empty()
    }

    /// Generations below a node, counting skipped ones.
    pub fn depth(&self, id: NodeId) -> u32 {
        self.children_of(id)
            .into_iter()
            .map(|c| self.depth(c) + self.node(c).skips + 1)
            .max()
            .unwrap_or(0)
    }
}
