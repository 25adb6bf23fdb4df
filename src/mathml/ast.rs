//! Tree model for MathML documents
//!
//! The normalizer works on an owned tree: every node is either an element
//! with an ordered child sequence or a text leaf. There are no parent
//! back-pointers; rewrites are expressed as a node turning into zero, one,
//! or several replacement nodes, and the parent splices them into place.
//!
//! `Tag` is a closed enum over the part of the MathML vocabulary the rules
//! care about, with `Other` as the fallback for unconstrained elements.
//! Keeping the vocabulary closed makes the arity contract an exhaustive
//! match instead of a string table.

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A MathML element name.
///
/// The named variants are the tags with normalization-relevant semantics:
/// positional (fixed-arity) elements, table structure, the semantics/
/// annotation pair, and the token elements the merge rule looks at. Every
/// other element ends up in `Other` and is treated as unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Mi,
    Mn,
    Mo,
    Mtext,
    Mrow,
    Msub,
    Msup,
    Msubsup,
    Mover,
    Munder,
    Munderover,
    Mfrac,
    Mmultiscripts,
    Mprescripts,
    None,
    Mtable,
    Mtr,
    Mtd,
    Math,
    Semantics,
    Annotation,
    Other(String),
}

static KNOWN_TAGS: Lazy<HashMap<&'static str, Tag>> = Lazy::new(|| {
    HashMap::from([
        ("mi", Tag::Mi),
        ("mn", Tag::Mn),
        ("mo", Tag::Mo),
        ("mtext", Tag::Mtext),
        ("mrow", Tag::Mrow),
        ("msub", Tag::Msub),
        ("msup", Tag::Msup),
        ("msubsup", Tag::Msubsup),
        ("mover", Tag::Mover),
        ("munder", Tag::Munder),
        ("munderover", Tag::Munderover),
        ("mfrac", Tag::Mfrac),
        ("mmultiscripts", Tag::Mmultiscripts),
        ("mprescripts", Tag::Mprescripts),
        ("none", Tag::None),
        ("mtable", Tag::Mtable),
        ("mtr", Tag::Mtr),
        ("mtd", Tag::Mtd),
        ("math", Tag::Math),
        ("semantics", Tag::Semantics),
        ("annotation", Tag::Annotation),
    ])
});

impl Tag {
    /// Look up a tag by its (local) element name.
    pub fn from_name(name: &str) -> Tag {
        KNOWN_TAGS
            .get(name)
            .cloned()
            .unwrap_or_else(|| Tag::Other(name.to_string()))
    }

    /// The element name this tag serializes as.
    pub fn name(&self) -> &str {
        match self {
            Tag::Mi => "mi",
            Tag::Mn => "mn",
            Tag::Mo => "mo",
            Tag::Mtext => "mtext",
            Tag::Mrow => "mrow",
            Tag::Msub => "msub",
            Tag::Msup => "msup",
            Tag::Msubsup => "msubsup",
            Tag::Mover => "mover",
            Tag::Munder => "munder",
            Tag::Munderover => "munderover",
            Tag::Mfrac => "mfrac",
            Tag::Mmultiscripts => "mmultiscripts",
            Tag::Mprescripts => "mprescripts",
            Tag::None => "none",
            Tag::Mtable => "mtable",
            Tag::Mtr => "mtr",
            Tag::Mtd => "mtd",
            Tag::Math => "math",
            Tag::Semantics => "semantics",
            Tag::Annotation => "annotation",
            Tag::Other(name) => name,
        }
    }

    /// The exact child count this tag requires after normalization, if any.
    ///
    /// `mmultiscripts` is positional but variable-length, so it reports
    /// `None` here while still counting as positional.
    pub fn required_arity(&self) -> Option<usize> {
        match self {
            Tag::Msub | Tag::Msup | Tag::Mover | Tag::Munder | Tag::Mfrac => Some(2),
            Tag::Msubsup | Tag::Munderover => Some(3),
            _ => None,
        }
    }

    /// Whether child position encodes semantic role for this tag.
    ///
    /// Under positional parents the identifier-merge rule is disabled and
    /// empty children are preserved, since removing or merging children
    /// would shift the meaning of the remaining positions.
    pub fn is_positional(&self) -> bool {
        self.required_arity().is_some() || matches!(self, Tag::Mmultiscripts)
    }

    /// Whether this tag legitimately carries zero children.
    pub fn may_be_empty(&self) -> bool {
        matches!(self, Tag::Mtd | Tag::Mprescripts | Tag::None)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// An element node: tag, attributes, ordered children.
///
/// Attributes are carried through normalization untouched; none of the
/// rules read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: Tag,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Element {
        Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(tag: Tag, children: Vec<Node>) -> Element {
        Element {
            tag,
            attrs: Vec::new(),
            children,
        }
    }
}

/// A node in the tree: an element or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn element(tag: Tag, children: Vec<Node>) -> Node {
        Node::Element(Element::with_children(tag, children))
    }

    pub fn text(content: impl Into<String>) -> Node {
        Node::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Short description of a node for error messages.
    pub fn label(&self) -> String {
        match self {
            Node::Element(el) => format!("<{}>", el.tag),
            Node::Text(_) => "text".to_string(),
        }
    }
}
