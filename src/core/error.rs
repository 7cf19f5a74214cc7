//! Error taxonomy for module discovery and resolution

use std::path::PathBuf;

/// Errors surfaced while discovering or resolving modules.
///
/// Discovery is fail-fast: a single broken manifest or descriptor aborts the
/// whole search, since it means the workspace itself is broken.
#[derive(Debug, thiserror::Error)]
pub enum AutolinkError {
    #[error("Failed to parse module manifest {path:?}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse package descriptor {path:?}: {source}")]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Filesystem error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Platform not supported: {0} (available: ios, android)")]
    PlatformNotSupported(String),

    #[error("Invalid ignore pattern {pattern:?}: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}

impl AutolinkError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AutolinkError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Short machine-readable code, used in verbose diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            AutolinkError::ManifestParse { .. } => "MANIFEST_PARSE",
            AutolinkError::DescriptorParse { .. } => "DESCRIPTOR_PARSE",
            AutolinkError::Filesystem { .. } => "FILESYSTEM",
            AutolinkError::PlatformNotSupported(_) => "PLATFORM_NOT_SUPPORTED",
            AutolinkError::InvalidIgnorePattern { .. } => "INVALID_IGNORE_PATTERN",
        }
    }
}

pub type Result<T> = std::result::Result<T, AutolinkError>;
