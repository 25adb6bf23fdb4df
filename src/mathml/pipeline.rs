//! End-to-end normalization pipeline
//!
//! Composes the stages the CLI drives: namespace preparation, the external
//! canonicalizer, XML parsing, the structural pass, and serialization.

use crate::mathml::ast::Node;
use crate::mathml::canonicalize::{add_namespace, Canonicalize, CanonicalizeError};
use crate::mathml::error::NormalizeError;
use crate::mathml::normalize::normalize;
use crate::mathml::parse::{parse_mathml, ParseMathmlError};
use crate::mathml::serialize::{to_xml, to_xml_pretty};
use std::fmt;

/// Errors that can occur during pipeline operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    CanonicalizeError(CanonicalizeError),
    ParseError(ParseMathmlError),
    NormalizeError(NormalizeError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::CanonicalizeError(e) => write!(f, "Canonicalizer error: {}", e),
            PipelineError::ParseError(e) => write!(f, "Parse error: {}", e),
            PipelineError::NormalizeError(e) => write!(f, "Normalization error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<CanonicalizeError> for PipelineError {
    fn from(err: CanonicalizeError) -> Self {
        PipelineError::CanonicalizeError(err)
    }
}

impl From<ParseMathmlError> for PipelineError {
    fn from(err: ParseMathmlError) -> Self {
        PipelineError::ParseError(err)
    }
}

impl From<NormalizeError> for PipelineError {
    fn from(err: NormalizeError) -> Self {
        PipelineError::NormalizeError(err)
    }
}

/// High-level pipeline for normalizing MathML markup
///
/// Combines a canonicalizer implementation with the structural pass and a
/// choice of output form.
pub struct Pipeline {
    canonicalizer: Box<dyn Canonicalize>,
    pretty: bool,
}

impl Pipeline {
    pub fn new(canonicalizer: Box<dyn Canonicalize>) -> Pipeline {
        Pipeline {
            canonicalizer,
            pretty: false,
        }
    }

    /// Select pretty-printed output from [`Pipeline::run`].
    pub fn pretty(mut self, pretty: bool) -> Pipeline {
        self.pretty = pretty;
        self
    }

    /// Canonicalize, parse, and normalize markup into a tree.
    pub fn normalize_markup(&self, markup: &str) -> Result<Node, PipelineError> {
        let canonical = self.canonicalizer.canonicalize(&add_namespace(markup))?;
        let tree = parse_mathml(&canonical)?;
        Ok(normalize(tree)?)
    }

    /// Run the whole pipeline, producing serialized XML.
    pub fn run(&self, markup: &str) -> Result<String, PipelineError> {
        let tree = self.normalize_markup(markup)?;
        Ok(if self.pretty {
            to_xml_pretty(&tree)
        } else {
            to_xml(&tree)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathml::canonicalize::Passthrough;

    #[test]
    fn passthrough_pipeline_normalizes_structure() {
        let pipeline = Pipeline::new(Box::new(Passthrough));
        let output = pipeline
            .run("<math><mrow><mi>x</mi><mi>y</mi></mrow></math>")
            .unwrap();
        assert_eq!(output, "<math><mi>xy</mi></math>");
    }

    #[test]
    fn errors_carry_the_failing_stage() {
        let pipeline = Pipeline::new(Box::new(Passthrough));
        let err = pipeline.run("<math><msub><mi>x</mi></msub></math>").unwrap_err();
        assert!(matches!(err, PipelineError::NormalizeError(_)));
        assert!(err.to_string().contains("msub"));
    }
}
