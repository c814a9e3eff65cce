// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is fatal for the launch that produced it. Non-fatal
//! conditions (missing optional config files, a duplicate running instance,
//! version fallback) never surface here; they are logged as warnings.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarterpackError {
    /// A vendor plugin does not provide a capability it is required to have.
    #[error("Plugin contract violation: {0}")]
    ContractViolation(String),

    /// A configuration document exists but could not be parsed.
    #[error("Failed to parse config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A required binary or script is absent, or has the wrong type.
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// Malformed or mutually exclusive launch options.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown vendor: {0}")]
    UnknownVendor(String),

    /// The OS refused to start the process.
    #[error("Failed to launch '{program}': {source}")]
    LaunchFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StarterpackError>;
