//! MathML structural normalization
//!
//! ## Modules
//!
//! - `ast` - The owned tree model: nodes, elements, and the tag vocabulary
//! - `chars` - Character-level substitutions applied to text leaves
//! - `normalize` - The normalization engine (rule set, traversal, arity checks)
//! - `error` - Error types for the normalization engine
//! - `parse` - XML text to tree conversion
//! - `serialize` - Tree to XML conversion (compact and pretty)
//! - `canonicalize` - The external canonicalizer boundary
//! - `pipeline` - End-to-end composition used by the CLI

pub mod ast;
pub mod canonicalize;
pub mod chars;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod serialize;

// Re-export commonly used types at module root
pub use ast::{Element, Node, Tag};
pub use canonicalize::{add_namespace, Canonicalize, CanonicalizeError, MathMlCan, Passthrough};
pub use chars::normalize_characters;
pub use error::NormalizeError;
pub use normalize::normalize;
pub use parse::{parse_mathml, ParseMathmlError};
pub use pipeline::{Pipeline, PipelineError};
pub use serialize::{to_xml, to_xml_pretty};
