// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FractureError {
    #[error("node not found: {id:?}")]
    NodeNotFound { id: String },

    // `r#source` is the same identifier as `source` (not a keyword); the raw
    // form stops thiserror from inferring this node label as the error source.
    #[error("duplicate edge rejected in strict mode: {source:?} -> {target:?}")]
    DuplicateEdge { r#source: String, target: String },

    #[error("graph {graph:?} has no edges; path metrics are undefined")]
    DisconnectedGraph { graph: String },

    #[error("metric {metric:?} is undefined: {reason}")]
    UndefinedMetric {
        metric: &'static str,
        reason: String,
    },

    #[error("random attack requires a seed")]
    InvalidSeed,

    #[error("graph {graph:?} has no nodes")]
    EmptyGraph { graph: String },

    #[error("{}:{line}: malformed edge list line: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, FractureError>;

// Allow `?` on std::io::Error by converting to FractureError::Io with unknown path.
impl From<std::io::Error> for FractureError {
    fn from(source: std::io::Error) -> Self {
        FractureError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl FractureError {
    /// Attaches a concrete path to a bare I/O error.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            FractureError::Io { source, .. } => FractureError::Io {
                source,
                path: path.into(),
            },
            other => other,
        }
    }
}
