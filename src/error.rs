//! Error types for compatibility checks.
//!
//! This module defines [`CompatError`], the error type returned by every
//! fallible operation in the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CompatError` for domain errors a model loader needs to tell apart
//! - Use `anyhow::Error` (via `CompatError::Other`) for unexpected errors
//! - Messages name the offending compiler kind and versions

use crate::compiler::CompilerKind;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for compatibility checks.
#[derive(Debug, Error)]
pub enum CompatError {
    /// The compiler type tag is not one of the supported kinds.
    #[error("Pretrained model compiler type {kind} not recognized.")]
    UnrecognizedCompilerKind { kind: String },

    /// The host package for the compiler kind is absent.
    ///
    /// `package` names the missing compiler package when the failure comes
    /// from a version lookup rather than an artifact check.
    #[error("{}", not_installed_message(.kind, .package))]
    CompilerNotInstalled {
        kind: String,
        package: Option<String>,
    },

    /// The artifact was compiled with a newer compiler than the installed one.
    #[error(
        "Pretrained model is compiled with {kind}({declared}) newer than current compiler ({installed}), \
         which may cause runtime incompatibilities."
    )]
    IncompatibleCompilerVersion {
        kind: String,
        declared: String,
        installed: String,
    },

    /// A version string could not be parsed.
    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// A probe ran but did not produce a usable answer.
    #[error("Probe for {kind} failed: {message}")]
    ProbeFailed { kind: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Model artifact metadata is missing or malformed.
    #[error("Invalid artifact metadata: {message}")]
    ArtifactMetadata { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for compatibility checks.
pub type Result<T> = std::result::Result<T, CompatError>;

fn not_installed_message(kind: &str, package: &Option<String>) -> String {
    match package {
        Some(package) => format!("{} python package is not installed.", package),
        None => format!(
            "Pretrained model was compiled for {kind}, but {kind} is not installed."
        ),
    }
}

impl CompatError {
    /// An artifact needs `kind`, which is not installed.
    pub fn not_installed(kind: CompilerKind) -> Self {
        CompatError::CompilerNotInstalled {
            kind: kind.to_string(),
            package: None,
        }
    }

    /// The compiler package for `kind` is missing, found while looking up
    /// its version.
    pub fn package_not_installed(kind: CompilerKind) -> Self {
        CompatError::CompilerNotInstalled {
            kind: kind.to_string(),
            package: Some(kind.display_name().to_string()),
        }
    }
}
