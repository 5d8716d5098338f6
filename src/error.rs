use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for build-publish operations
#[derive(Error, Debug)]
pub enum BuildPublishError {
    #[error("No build tag found for variant '{variant}' using pattern '{pattern}'")]
    TagNotFound { variant: String, pattern: String },

    #[error("Cannot parse build tag '{tag}' for variant '{variant}': {reason}")]
    TagParse {
        variant: String,
        tag: String,
        reason: String,
    },

    #[error("Changelog range error: {0}")]
    ChangelogRange(String),

    #[error("Snapshot I/O error at {}: {source}", path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot format error at {}: {source}", path.display())]
    SnapshotFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in build-publish
pub type Result<T> = std::result::Result<T, BuildPublishError>;

impl BuildPublishError {
    /// Create a tag-not-found error for a variant and the pattern that was searched
    pub fn tag_not_found(variant: impl Into<String>, pattern: impl Into<String>) -> Self {
        BuildPublishError::TagNotFound {
            variant: variant.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a tag parse error with context
    pub fn tag_parse(
        variant: impl Into<String>,
        tag: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BuildPublishError::TagParse {
            variant: variant.into(),
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a changelog range error with context
    pub fn changelog_range(msg: impl Into<String>) -> Self {
        BuildPublishError::ChangelogRange(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BuildPublishError::Config(msg.into())
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        BuildPublishError::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn snapshot_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildPublishError::SnapshotIo {
            path: path.into(),
            source,
        }
    }

    pub fn snapshot_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        BuildPublishError::SnapshotFormat {
            path: path.into(),
            source,
        }
    }
}
