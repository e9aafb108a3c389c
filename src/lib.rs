//! Lineage - a layout engine for kinship charts
//!
//! This library models a kinship graph (ancestors, descendants, marriages,
//! remarriages, skipped generations) and computes a collision-free 2-D
//! layout for it: after one pass every node exposes a finalized coordinate
//! pair and a footprint, enough for any renderer to draw boxes and connector
//! lines by simple offsetting.
//!
//! # Example
//!
//! ```rust
//! use lineage::{Chart, LayoutConfig, NodeSpec};
//!
//! let mut chart = Chart::new(LayoutConfig::default());
//! chart.add(&NodeSpec::new("ada").named("Ada")).unwrap();
//! chart.add(&NodeSpec::new("bea").child_of("ada")).unwrap();
//! chart.add(&NodeSpec::new("cy").child_of("ada")).unwrap();
//!
//! let placements = chart.placements();
//! assert_eq!(placements.len(), 3);
//! ```

pub mod document;
pub mod layout;
pub mod tree;

pub use document::{ChartDoc, ChartOptions, DocumentError, LinkEnd, LinkSpec};
pub use layout::{position, solve, span, LayoutConfig, Orient};
pub use tree::{Align, FamilyTree, NodeId, NodeSpec, TreeError};

use thiserror::Error;

/// Errors that can occur while building a chart
#[derive(Debug, Error)]
pub enum ChartError {
    /// Error mutating the kinship graph
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Error loading a chart document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

/// Finalized box for one rendered node.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A family tree paired with layout options.
///
/// Every structural mutation or option change triggers one full layout pass,
/// so finalized coordinates are always in step with the tree. The pass is a
/// full recomputation; rerunning it on an unchanged chart yields identical
/// coordinates.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    tree: FamilyTree,
    config: LayoutConfig,
    links: Vec<LinkSpec>,
}

impl Chart {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            tree: FamilyTree::new(),
            config,
            links: Vec::new(),
        }
    }

    /// Build a chart from a declarative document: add every individual in
    /// order, apply the exclusion list, re-root if requested, then solve
    /// once. The first invalid item aborts the build; skipping policies are a
    /// host concern.
    pub fn from_document(doc: &ChartDoc) -> Result<Self, ChartError> {
        let mut chart = Chart::new(doc.options.layout_config());
        for spec in &doc.individuals {
            chart.tree.add(spec)?;
        }
        for id in &doc.options.exclude {
            chart.tree.remove(id, false)?;
        }
        if let Some(root) = &doc.options.root {
            chart.tree.reroot(root)?;
        }
        chart.links = doc.links.clone();
        chart.prune_links();
        chart.solve();
        Ok(chart)
    }

    /// Validate and add one individual, then re-solve.
    pub fn add(&mut self, spec: &NodeSpec) -> Result<NodeId, TreeError> {
        let id = self.tree.add(spec)?;
        self.solve();
        Ok(id)
    }

    /// Remove a node (with its cascade, see
    /// [`FamilyTree::remove`]), drop links that referenced anything removed,
    /// and re-solve.
    pub fn remove(&mut self, id: &str) -> Result<(), TreeError> {
        self.tree.remove(id, false)?;
        self.prune_links();
        self.solve();
        Ok(())
    }

    /// Re-anchor the chart on another node and re-solve.
    pub fn set_root(&mut self, id: &str) -> Result<(), TreeError> {
        self.tree.reroot(id)?;
        self.prune_links();
        self.solve();
        Ok(())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the layout options and re-solve.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.solve();
    }

    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    /// Extra relationships for the renderer; never interpreted here.
    pub fn links(&self) -> &[LinkSpec] {
        &self.links
    }

    pub fn push_link(&mut self, link: LinkSpec) {
        self.links.push(link);
    }

    /// Recompute all coordinates. Idempotent on an unchanged chart.
    pub fn solve(&mut self) {
        layout::solve(&mut self.tree, &self.config);
    }

    /// Finalized boxes for every renderable node, in insertion order.
    /// Hidden nodes take part in the layout but are not reported.
    pub fn placements(&self) -> Vec<Placement> {
        self.tree
            .iter()
            .filter(|(_, node)| !node.hidden())
            .map(|(id, node)| {
                let (x, y) = layout::position(&self.tree, id, &self.config);
                Placement {
                    id: node.id().to_string(),
                    x,
                    y,
                    width: self.config.width,
                    height: self.config.height,
                }
            })
            .collect()
    }

    fn prune_links(&mut self) {
        let tree = &self.tree;
        self.links
            .retain(|link| link.ids().all(|id| tree.contains(id)));
    }
}
