//! TOML chart documents
//!
//! A chart document bundles the layout options, the individuals in insertion
//! order, and the extra links a renderer may draw. It is the batch
//! counterpart of the programmatic [`Chart`](crate::Chart) API.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::{LayoutConfig, Orient};
use crate::tree::{Align, NodeSpec};

/// Errors that can occur when loading or parsing chart documents
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read chart document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse chart document: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A declarative chart description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartDoc {
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(default, rename = "individual")]
    pub individuals: Vec<NodeSpec>,
    #[serde(default, rename = "link")]
    pub links: Vec<LinkSpec>,
}

impl ChartDoc {
    /// Load a chart document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a chart document from a TOML string
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(content)?)
    }
}

/// Layout options plus the build-time directives (`root`, `exclude`) that are
/// applied once before the first pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Re-root the tree on this id after all individuals are added.
    pub root: Option<String>,
    pub width: f64,
    pub height: f64,
    pub parent_margin: f64,
    pub spouse_margin: f64,
    pub sibling_margin: f64,
    pub cousin_margin: f64,
    pub align: Align,
    pub orient: Orient,
    /// Ids removed once before the first pass.
    pub exclude: Vec<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self {
            root: None,
            width: config.width,
            height: config.height,
            parent_margin: config.parent_margin,
            spouse_margin: config.spouse_margin,
            sibling_margin: config.sibling_margin,
            cousin_margin: config.cousin_margin,
            align: config.align,
            orient: config.orient,
            exclude: Vec::new(),
        }
    }
}

impl ChartOptions {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            width: self.width,
            height: self.height,
            parent_margin: self.parent_margin,
            spouse_margin: self.spouse_margin,
            sibling_margin: self.sibling_margin,
            cousin_margin: self.cousin_margin,
            align: self.align,
            orient: self.orient,
        }
    }
}

/// One endpoint of an extra link: a single node, or a couple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LinkEnd {
    Node(String),
    Couple([String; 2]),
}

impl LinkEnd {
    pub fn ids(&self) -> &[String] {
        match self {
            LinkEnd::Node(id) => std::slice::from_ref(id),
            LinkEnd::Couple(pair) => pair,
        }
    }
}

/// A relationship outside the tree structure, e.g. a consanguine union.
///
/// Links are opaque to the solver; they are carried along so a renderer can
/// place them from finalized coordinates. Links whose endpoints leave the
/// tree are dropped with them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkSpec {
    pub start: LinkEnd,
    pub end: LinkEnd,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

impl LinkSpec {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.start
            .ids()
            .iter()
            .chain(self.end.ids().iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_document() {
        let doc = ChartDoc::from_str(
            r#"
            [options]
            root = "mary"
            orient = "left"
            align = "right"
            sibling_margin = 20.0
            exclude = ["uncle"]

            [[individual]]
            id = "john"
            name = "John"

            [[individual]]
            id = "mary"
            parent = "john"
            skips = 1

            [[link]]
            start = "john"
            end = ["mary", "john"]
            kind = "descent"
            "#,
        )
        .unwrap();

        assert_eq!(doc.options.root.as_deref(), Some("mary"));
        assert_eq!(doc.options.orient, Orient::Left);
        assert_eq!(doc.options.align, Align::Right);
        assert_eq!(doc.options.sibling_margin, 20.0);
        assert_eq!(doc.options.exclude, vec!["uncle"]);
        assert_eq!(doc.individuals.len(), 2);
        assert_eq!(doc.individuals[1].skips, 1);
        assert_eq!(doc.links.len(), 1);
        assert_eq!(
            doc.links[0].end,
            LinkEnd::Couple(["mary".into(), "john".into()])
        );
        assert_eq!(
            doc.links[0].ids().collect::<Vec<_>>(),
            vec!["john", "mary", "john"]
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let doc = ChartDoc::from_str("").unwrap();
        assert!(doc.individuals.is_empty());
        assert!(doc.links.is_empty());
        assert_eq!(doc.options.width, 120.0);
        assert_eq!(doc.options.orient, Orient::Top);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = ChartDoc::from_str("[[individual]\nid = 3").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }
}
