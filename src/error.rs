//! Error types for connalign.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for connalign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for connalign operations.
///
/// Only input-contract violations end up here. A connective without evidence
/// or a round that harvests nothing are normal outcomes and never produce an
/// `Error`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A corpus, alignment, lexicon or table file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the Pharaoh alignment file violates the input contract.
    #[error("Malformed alignment on line {line}: '{token}' ({reason})")]
    MalformedAlignment {
        line: usize,
        token: String,
        reason: String,
    },

    /// The line-aligned input files disagree on their number of lines.
    #[error(
        "Corpus files are not line-aligned: {alignment} alignment lines, {source_lines} source lines, {target_lines} target lines"
    )]
    CorpusMismatch {
        alignment: usize,
        source_lines: usize,
        target_lines: usize,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An XML connective lexicon could not be parsed.
    #[error("XML error in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// The TOML configuration file could not be parsed.
    #[error("Failed to parse {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Round parameters are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an I/O error bound to the file it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a JSON error bound to the file it happened on.
    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an XML error bound to the file it happened on.
    pub fn xml(path: impl AsRef<Path>, source: quick_xml::DeError) -> Self {
        Error::Xml {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a malformed alignment error.
    pub fn malformed_alignment(
        line: usize,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedAlignment {
            line,
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}
