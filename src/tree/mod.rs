//! Kinship graph data model
//!
//! This module owns the nodes and enforces the relationship invariants:
//! unique ids, a single root, kin versus married-in wiring, and the
//! remarriage/out-of-marriage exclusions. The layout engine reads and writes
//! coordinates through it but never bypasses its mutation API.

pub mod error;
pub mod graph;
pub mod node;

pub use error::TreeError;
pub use graph::FamilyTree;
pub use node::{Align, Individual, NodeId, NodeSpec};
