//! The external canonicalizer boundary
//!
//! Semantic canonicalization (commutative reordering, implicit operator
//! resolution) happens out of process, in the MathMLCan Java tool. This
//! module models that collaborator as the [`Canonicalize`] trait so the
//! pipeline never assumes a particular invocation mechanism, and provides
//! the jar-invoking implementation plus a passthrough for running the
//! structural pass alone.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Insert the MathML namespace declaration into raw markup.
///
/// MathMLCan rejects input whose `mml:` prefix is undeclared; real-world
/// corpus files routinely omit the declaration. Textual replacement on the
/// raw markup, before any parsing happens.
pub fn add_namespace(xml: &str) -> String {
    xml.replace(
        "<mml:math>",
        "<mml:math xmlns:mml=\"http://www.w3.org/1998/Math/MathML\">",
    )
    .replace(
        "<math",
        "<math xmlns:mml=\"http://www.w3.org/1998/Math/MathML\"",
    )
}

/// Errors from invoking the external canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizeError {
    JavaNotFound(String),
    Io(String),
    ProcessFailed { code: Option<i32>, stderr: String },
    InvalidOutput(String),
}

impl fmt::Display for CanonicalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalizeError::JavaNotFound(msg) => {
                write!(f, "could not locate a java executable: {}", msg)
            }
            CanonicalizeError::Io(msg) => write!(f, "canonicalizer I/O error: {}", msg),
            CanonicalizeError::ProcessFailed { code, stderr } => match code {
                Some(code) => write!(f, "canonicalizer exited with status {}: {}", code, stderr),
                None => write!(f, "canonicalizer was terminated by a signal: {}", stderr),
            },
            CanonicalizeError::InvalidOutput(msg) => {
                write!(f, "canonicalizer produced invalid output: {}", msg)
            }
        }
    }
}

impl std::error::Error for CanonicalizeError {}

/// The semantic canonicalization capability the pipeline depends on.
pub trait Canonicalize {
    fn canonicalize(&self, markup: &str) -> Result<String, CanonicalizeError>;
}

/// Runs the MathMLCan jar on the markup it is given.
///
/// The pipeline hands this a namespaced copy of the raw input, see
/// [`add_namespace`].
#[derive(Debug, Clone)]
pub struct MathMlCan {
    jar: PathBuf,
    config: Option<PathBuf>,
    logging_properties: Option<PathBuf>,
}

impl MathMlCan {
    pub fn new(jar: impl Into<PathBuf>) -> MathMlCan {
        MathMlCan {
            jar: jar.into(),
            config: None,
            logging_properties: None,
        }
    }

    /// Pass a MathMLCan config file through to the jar.
    pub fn with_config(mut self, config: impl Into<PathBuf>) -> MathMlCan {
        self.config = Some(config.into());
        self
    }

    /// Point the JVM at a `java.util.logging` properties file.
    pub fn with_logging_properties(mut self, properties: impl Into<PathBuf>) -> MathMlCan {
        self.logging_properties = Some(properties.into());
        self
    }
}

impl Canonicalize for MathMlCan {
    fn canonicalize(&self, markup: &str) -> Result<String, CanonicalizeError> {
        let java = which::which("java")
            .map_err(|err| CanonicalizeError::JavaNotFound(err.to_string()))?;

        // The jar reads from a file path, not stdin. The temp file is
        // removed on drop, including on the error paths.
        let mut input = tempfile::NamedTempFile::new()
            .map_err(|err| CanonicalizeError::Io(err.to_string()))?;
        writeln!(input, "{}", markup)
            .map_err(|err| CanonicalizeError::Io(err.to_string()))?;

        let mut cmd = Command::new(java);
        if let Some(properties) = &self.logging_properties {
            cmd.arg(format!(
                "-Djava.util.logging.config.file={}",
                properties.display()
            ));
        }
        cmd.arg("-jar").arg(&self.jar);
        if let Some(config) = &self.config {
            cmd.arg("-config").arg(config);
        }
        cmd.arg(input.path());

        let output = cmd
            .output()
            .map_err(|err| CanonicalizeError::Io(err.to_string()))?;
        if !output.status.success() {
            return Err(CanonicalizeError::ProcessFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        String::from_utf8(output.stdout)
            .map_err(|err| CanonicalizeError::InvalidOutput(err.to_string()))
    }
}

/// Identity canonicalizer: hands the markup back untouched.
///
/// Used to run the structural pass without a JVM, and in tests.
#[derive(Debug, Clone, Copy)]
pub struct Passthrough;

impl Canonicalize for Passthrough {
    fn canonicalize(&self, markup: &str) -> Result<String, CanonicalizeError> {
        Ok(markup.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_namespace_declares_prefixed_root() {
        assert_eq!(
            add_namespace("<mml:math><mml:mi>x</mml:mi></mml:math>"),
            "<mml:math xmlns:mml=\"http://www.w3.org/1998/Math/MathML\">\
             <mml:mi>x</mml:mi></mml:math>"
        );
    }

    #[test]
    fn add_namespace_declares_unprefixed_root() {
        assert_eq!(
            add_namespace("<math display=\"block\"/>"),
            "<math xmlns:mml=\"http://www.w3.org/1998/Math/MathML\" display=\"block\"/>"
        );
    }

    #[test]
    fn passthrough_is_identity() {
        let markup = "<math><mi>x</mi></math>";
        assert_eq!(Passthrough.canonicalize(markup).unwrap(), markup);
    }
}
