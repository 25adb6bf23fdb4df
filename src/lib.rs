//! # mathml-norm
//!
//! Structural normalization of MathML expression trees.
//!
//! An external semantic canonicalizer (MathMLCan) is expected to have already
//! applied equivalence rewrites such as commutative reordering and implicit
//! operator resolution. This crate cleans up the *structure* that is left:
//! it strips annotations, merges adjacent identifiers, collapses redundant
//! grouping, prunes empty table rows and columns, and validates the child
//! count of positional elements.
//!
//! The entry point for the tree pass is [`mathml::normalize()`]; the whole
//! file-to-file flow (canonicalize, parse, normalize, serialize) lives in
//! [`mathml::pipeline`].

pub mod mathml;
