//! Error types for building a parmlib member.
//!
//! Every stage of the pipeline (loading data, rendering, writing) reports
//! failures through [`Error`]. Engine errors are classified by kind so callers
//! can tell a missing template apart from a broken one without depending on
//! minijinja directly.
//!
//! Messages describe only their own level; the underlying cause is available
//! through [`std::error::Error::source`]. Print the whole chain (for example
//! with anyhow's `{:#}`) to see both.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while building a member.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data file does not exist.
    #[error("data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    /// The data file exists but could not be read.
    #[error("failed to read data file {}", path.display())]
    DataRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data file is not valid YAML.
    #[error("failed to parse data file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The top-level YAML document is not a mapping.
    #[error("data file {} must contain a mapping at the top level, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A top-level key is not a string and cannot name a template variable.
    #[error("data file {} has a non-string top-level key: {key}", path.display())]
    NonStringKey { path: PathBuf, key: String },

    /// The template identifier did not resolve to a file.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Template syntax error, undefined variable or invalid operation.
    #[error("template error")]
    Template(#[source] minijinja::Error),

    /// The rendered member could not be written.
    #[error("failed to write member {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the underlying engine error, if this is a template failure.
    ///
    /// Useful for printing the engine's debug info (source excerpt and the
    /// failing line) next to the short message.
    pub fn template_error(&self) -> Option<&minijinja::Error> {
        match self {
            Error::Template(err) => Some(err),
            _ => None,
        }
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => Error::TemplateNotFound(
                err.detail().map_or_else(|| err.to_string(), str::to_string),
            ),
            _ => Error::Template(err),
        }
    }
}
