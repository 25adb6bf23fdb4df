//! Error types for the normalization engine

use crate::mathml::ast::Tag;
use std::fmt;

/// Errors that can occur while normalizing a tree.
///
/// All of these are fatal: normalization either rewrites the whole tree or
/// fails without producing output. Silently padding, truncating, or
/// guessing around a violated contract would mask bugs in the upstream
/// canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A positional element's normalized child count does not match its
    /// fixed contract.
    ArityViolation {
        tag: Tag,
        expected: usize,
        actual: usize,
    },
    /// Table structure holds a child of the wrong kind, e.g. an `mtable`
    /// with a non-`mtr` child.
    Malformed {
        parent: Tag,
        expected: Tag,
        found: String,
    },
    /// Normalization removed every node, leaving nothing to occupy the
    /// root position.
    EmptyDocument,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::ArityViolation {
                tag,
                expected,
                actual,
            } => write!(
                f,
                "<{}> has an invalid number of children: expected {}, found {}",
                tag, expected, actual
            ),
            NormalizeError::Malformed {
                parent,
                expected,
                found,
            } => write!(
                f,
                "<{}> may only contain <{}> children, found {}",
                parent, expected, found
            ),
            NormalizeError::EmptyDocument => {
                write!(f, "normalization removed every node in the document")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}
