//! Archive error types.

use std::path::PathBuf;

use thiserror::Error;

/// Archive-related errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Archive path does not exist.
    #[error("plugin archive not found: {0}")]
    MissingArchive(PathBuf),

    /// Archive carries no plugin manifest.
    #[error("no plugin manifest (plugin.toml) in archive: {path}")]
    MissingManifest { path: PathBuf },

    /// Changelog document has no entry for the release version.
    #[error("changelog has no entry for version {version}")]
    MissingChangelogForVersion { version: String },

    /// Manifest exists but cannot be used.
    #[error("invalid plugin manifest: {reason}")]
    InvalidManifest { reason: String },

    /// Changelog document cannot be parsed.
    #[error("invalid changelog document: {0}")]
    InvalidChangelog(#[source] toml::de::Error),

    /// Archive cannot be read as a zip file.
    #[error("failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
