//! Node types for the kinship graph

use serde::Deserialize;

/// Index of a node in the tree arena.
///
/// Ids stay valid until the node they name is removed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Alignment of a parent relative to the span of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    #[default]
    Center,
}

/// A member of the family tree.
///
/// Relationship lists hold arena indices rather than references, so the
/// naturally cyclic parent/child/spouse structure stays ownership-free.
/// The `children` list records out-of-marriage children only; union children
/// live on the married-in partner they were attached through.
#[derive(Debug, Clone)]
pub struct Individual {
    pub(crate) id: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub class: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) spouses: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) skips: u32,
    pub(crate) before: bool,
    pub(crate) hidden: bool,
    pub(crate) is_root: bool,
    pub(crate) align: Option<Align>,
    /// Group coordinate on the primary (breadth) axis.
    pub(crate) main: f64,
    /// Coordinate on the secondary (generation) axis.
    pub(crate) cross: f64,
}

impl Individual {
    pub(crate) fn from_spec(spec: &NodeSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            text: spec.text.clone(),
            class: spec.class.clone(),
            url: spec.url.clone(),
            image: spec.image.clone(),
            parents: Vec::new(),
            spouses: Vec::new(),
            children: Vec::new(),
            skips: spec.skips,
            before: spec.before,
            hidden: spec.hidden,
            is_root: false,
            align: spec.align,
            main: 0.0,
            cross: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// On the blood line: the root, or anyone with a recorded parent.
    pub fn is_kin(&self) -> bool {
        self.is_root || !self.parents.is_empty()
    }

    pub fn is_married(&self) -> bool {
        !self.spouses.is_empty()
    }

    pub fn is_remarried(&self) -> bool {
        self.spouses.len() > 1
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Spouses in marriage order; the first one is the primary union.
    pub fn spouses(&self) -> &[NodeId] {
        &self.spouses
    }

    /// Out-of-marriage children only; see [`FamilyTree::children_of`] for the
    /// full interleaved list.
    ///
    /// [`FamilyTree::children_of`]: super::FamilyTree::children_of
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Unrecorded generations between this node and its parent.
    pub fn skips(&self) -> u32 {
        self.skips
    }

    pub fn before(&self) -> bool {
        self.before
    }

    /// Computation-only nodes are laid out but never surfaced to a renderer.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn align(&self) -> Option<Align> {
        self.align
    }
}

/// Declarative description of one individual, accepted by
/// [`FamilyTree::add`](super::FamilyTree::add).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub class: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub parent: Option<String>,
    pub spouse: Option<String>,
    pub align: Option<Align>,
    #[serde(default)]
    pub skips: u32,
    #[serde(default)]
    pub before: bool,
    #[serde(default, rename = "virtual")]
    pub hidden: bool,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn child_of(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn spouse_of(mut self, spouse: impl Into<String>) -> Self {
        self.spouse = Some(spouse.into());
        self
    }

    pub fn skips(mut self, skips: u32) -> Self {
        self.skips = skips;
        self
    }

    pub fn before(mut self) -> Self {
        self.before = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}
