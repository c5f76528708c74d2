//! Error types for manifest generation.
//!
//! Every error is fatal to the run: nothing is retried and no partial manifest
//! is ever written.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    RevisionResolution,
    Scanning,
    Hashing,
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validation => "validation",
            Stage::RevisionResolution => "revision resolution",
            Stage::Scanning => "scanning",
            Stage::Hashing => "hashing",
            Stage::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// Version-control errors
#[derive(Debug, Error)]
pub enum ScmError {
    #[error("malformed scm connection: {0}")]
    MalformedConnection(String),

    #[error("unsupported scm provider: {0}")]
    UnsupportedProvider(String),

    #[error("scm operation failed: {0}")]
    Transport(String),

    #[error("scm operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("cannot determine scm revision")]
    NoRevision,

    #[error("scm operation failed: {0}")]
    Failed(String),
}

/// Manifest generation errors
#[derive(Debug, Error)]
pub enum LavenderError {
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("source properties not empty: {}", .0.display())]
    LegacyProperties(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Scm(#[from] ScmError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot traverse {}: {reason}", path.display())]
    Traversal { path: PathBuf, reason: String },
}

impl LavenderError {
    /// Stage of the pipeline this error aborted
    pub fn stage(&self) -> Stage {
        match self {
            LavenderError::InvalidGlob { .. }
            | LavenderError::LegacyProperties(_)
            | LavenderError::Config(_) => Stage::Validation,
            LavenderError::Scm(_) => Stage::RevisionResolution,
            LavenderError::Io { stage, .. } => *stage,
            LavenderError::Traversal { .. } => Stage::Scanning,
        }
    }

    pub(crate) fn io(stage: Stage, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LavenderError::Io {
            stage,
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for LavenderError {
    fn from(err: config::ConfigError) -> Self {
        LavenderError::Config(err.to_string())
    }
}
