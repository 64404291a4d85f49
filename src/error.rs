// src/error.rs

//! Error types for the bootstrap library

use thiserror::Error;

/// Errors raised while bootstrapping
#[derive(Error, Debug)]
pub enum Error {
    /// An external tool could not be started
    #[error("Failed to run {tool}: {reason}")]
    ToolLaunch { tool: String, reason: String },

    /// An external tool exited unsuccessfully
    #[error("Command `{command}` failed with {status}")]
    ToolFailed {
        command: String,
        status: String,
        output: String,
    },

    /// A required tag is absent from an upstream metadata file
    #[error("Could not find <{tag}> in {path}")]
    MissingTag { tag: String, path: String },

    /// A version string does not follow the upstream convention
    #[error("Invalid version '{version}': {reason}")]
    VersionFormat { version: String, reason: String },

    /// Only .NET 8 is supported
    #[error("Unsupported runtime version '{0}' (only 8.x can be bootstrapped)")]
    UnsupportedVersion(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Patch error: {0}")]
    PatchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Result alias for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;
