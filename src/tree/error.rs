//! Error types for graph mutation

use thiserror::Error;

/// Errors raised by [`FamilyTree`](super::FamilyTree) operations.
///
/// Validation causes are distinct variants so a host can react per cause;
/// `UnknownId` is a lookup failure rather than a validation failure.
/// Operations are all-or-nothing: a returned error means the tree is
/// unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node without an id")]
    MissingId,

    #[error("node '{0}' already exists")]
    DuplicateId(String),

    #[error("non-root node '{0}' without spouse nor parent")]
    Orphan(String),

    #[error("cannot add spouse to non-kin node '{0}'")]
    SpouseNotKin(String),

    #[error("node '{0}' cannot have more than two spouses")]
    SpouseLimit(String),

    #[error("node '{0}' cannot have two spouses and out-of-marriage children")]
    SpouseHasChildren(String),

    #[error("cannot attach another child to remarried node '{0}'")]
    ParentRemarried(String),

    #[error("cannot join '{id}' to '{spouse}' as both child and spouse; use an extra link instead")]
    ConsanguineUnion { id: String, spouse: String },

    #[error("unknown id '{0}'")]
    UnknownId(String),

    #[error("cannot remove root node '{0}'")]
    RemoveRoot(String),
}
