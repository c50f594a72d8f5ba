//! Error types for clusterval.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for clusterval.
pub type Result<T> = std::result::Result<T, ClustervalError>;

/// Errors returned by clusterval operations.
///
/// Undefined ratios (precision or recall against an empty cluster) are not
/// errors; the scoring functions return `None` for those.
#[derive(Debug, Error)]
pub enum ClustervalError {
    /// A constructor or operation was given an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
