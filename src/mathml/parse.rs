//! XML text to tree conversion
//!
//! The boundary adapter in front of the normalizer: canonicalizer output is
//! XML text, the engine wants the owned tree model. Element and attribute
//! names are taken as local names (the canonicalizer is free to prefix
//! everything with `mml:`); comments and processing instructions are
//! dropped, and whitespace-only text between elements is not materialized
//! as leaves, so pretty-printed input does not defeat the child-count
//! rules.

use crate::mathml::ast::{Element, Node, Tag};
use std::fmt;

/// Errors from the XML boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMathmlError {
    Xml(String),
}

impl fmt::Display for ParseMathmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMathmlError::Xml(msg) => write!(f, "invalid XML: {}", msg),
        }
    }
}

impl std::error::Error for ParseMathmlError {}

/// Parse an XML document into the tree model.
pub fn parse_mathml(input: &str) -> Result<Node, ParseMathmlError> {
    let doc = roxmltree::Document::parse(input)
        .map_err(|err| ParseMathmlError::Xml(err.to_string()))?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node) -> Node {
    let tag = Tag::from_name(node.tag_name().name());
    let attrs = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();
    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert(child));
        } else if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                children.push(Node::Text(text.to_string()));
            }
        }
    }
    Node::Element(Element {
        tag,
        attrs,
        children,
    })
}
