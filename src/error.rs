//! Error types for rinstall operations.
//!
//! This module defines [`InstallError`], the error type for the failures that
//! are allowed to abort a run, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Strategy failures never become an `InstallError`; they are turned into
//!   diagnostic strings so the fallback chain can continue
//! - Ledger and outcome-log I/O uses `anyhow` and is logged, not propagated
//! - `InstallError` is reserved for configuration problems and filesystem
//!   errors that make a migration meaningless (missing library, unwritable
//!   inventory)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rinstall operations.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An environment's package library directory does not exist.
    #[error("Package library for R/{version} not found at {path}")]
    LibraryNotFound { version: String, path: PathBuf },

    /// Shell command could not be spawned.
    #[error("Could not run {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rinstall operations.
pub type Result<T> = std::result::Result<T, InstallError>;
