//! Error types for textmend operations.
//!
//! This module provides the error hierarchy using `thiserror` for the
//! fallible edges of the crate: configuration, payload parsing, I/O, and
//! CLI commands. The reconstruction stages themselves are total functions
//! and never surface here.

use thiserror::Error;

/// Result type alias for textmend operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for textmend operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (pipeline or reveal options).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Completion payload errors (JSON parsing).
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Minimum chunk length below the smallest usable value.
    #[error("minimum chunk length must be at least 1, got {value}")]
    MinChunkTooSmall {
        /// Value that was rejected.
        value: usize,
    },

    /// Doubled-letter allow list entry that is not alphabetic.
    #[error("doubled-letter allow list accepts alphabetic characters only, got {ch:?}")]
    NonAlphabeticAllowListChar {
        /// Character that was rejected.
        ch: char,
    },

    /// URL scheme marker missing its `://` suffix.
    #[error("URL scheme must end with \"://\", got {scheme:?}")]
    MalformedUrlScheme {
        /// Scheme that was rejected.
        scheme: String,
    },
}

/// Completion-payload-specific errors.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Payload is not valid JSON.
    #[error("invalid completion JSON: {0}")]
    Parse(String),

    /// Repaired payload could not be re-serialized.
    #[error("failed to serialize completion JSON: {0}")]
    Serialize(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to read from standard input.
    #[error("failed to read stdin: {reason}")]
    StdinFailed {
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Unknown pipeline stage name.
    #[error("unknown stage: {name} (expected normalize, dedupe, reflow, or all)")]
    UnknownStage {
        /// Name of the unknown stage.
        name: String,
    },

    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

// Implement From traits for standard library and serde errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(PayloadError::Parse(err.to_string()))
    }
}
