//! Configuration for the layout engine

use serde::Deserialize;

use crate::tree::Align;

/// Direction in which generations advance on the page.
///
/// All solver math runs on an abstract primary (breadth) and secondary
/// (generation) axis; the orientation only decides how those map to
/// geometric x/y at output time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Orient {
    /// Generations advance along the geometric x axis.
    pub fn rotated(self) -> bool {
        matches!(self, Orient::Left | Orient::Right)
    }

    /// Generations advance toward negative coordinates.
    pub fn reversed(self) -> bool {
        matches!(self, Orient::Bottom | Orient::Right)
    }
}

/// Options for one layout pass.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Slot width of a single node box.
    pub width: f64,

    /// Slot height of a single node box.
    pub height: f64,

    /// Gap between a generation and the next.
    pub parent_margin: f64,

    /// Gap between the boxes of one marriage group.
    pub spouse_margin: f64,

    /// Minimum gap between siblings of one cluster.
    pub sibling_margin: f64,

    /// Gap between independent sibling clusters.
    pub cousin_margin: f64,

    /// Default alignment of parents over their children; nodes may override
    /// it individually.
    pub align: Align,

    pub orient: Orient,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 50.0,
            parent_margin: 80.0,
            spouse_margin: 30.0,
            sibling_margin: 30.0,
            cousin_margin: 100.0,
            align: Align::Center,
            orient: Orient::Top,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slot size of a node box.
    pub fn with_slot(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_parent_margin(mut self, margin: f64) -> Self {
        self.parent_margin = margin;
        self
    }

    pub fn with_spouse_margin(mut self, margin: f64) -> Self {
        self.spouse_margin = margin;
        self
    }

    pub fn with_sibling_margin(mut self, margin: f64) -> Self {
        self.sibling_margin = margin;
        self
    }

    pub fn with_cousin_margin(mut self, margin: f64) -> Self {
        self.cousin_margin = margin;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_orient(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }

    /// Slot length along the primary (breadth) axis.
    pub fn main_slot(&self) -> f64 {
        if self.orient.rotated() {
            self.height
        } else {
            self.width
        }
    }

    /// Slot length along the secondary (generation) axis.
    pub fn cross_slot(&self) -> f64 {
        if self.orient.rotated() {
            self.width
        } else {
            self.height
        }
    }

    /// Primary-axis stride from one box of a marriage group to the next.
    pub(crate) fn spouse_step(&self) -> f64 {
        self.main_slot() + self.spouse_margin
    }

    /// Map primary/secondary coordinates to geometric x/y.
    pub fn to_xy(&self, main: f64, cross: f64) -> (f64, f64) {
        if self.orient.rotated() {
            (cross, main)
        } else {
            (main, cross)
        }
    }
}
