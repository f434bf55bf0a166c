//! Error types for the replay binary.
//!
//! Engine rejections (a second login on the same day, fertilizing without
//! funds, ...) are part of a normal journal and are logged, not returned.
//! The variants here are the failures that stop a replay.

use std::path::PathBuf;

use grove_core::{ConfigError, EngineError};

/// Errors that abort a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Bad command-line arguments.
    #[error("usage: {0}")]
    Usage(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The journal file could not be read.
    #[error("failed to read journal {path}: {source}")]
    Io {
        /// Journal path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The journal is not valid JSON or does not match the format.
    #[error("journal parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two users share a label.
    #[error("duplicate user in journal: {0}")]
    DuplicateUser(String),

    /// Two plants share a label.
    #[error("duplicate plant label in journal: {0}")]
    DuplicatePlant(String),

    /// An entry names a user that was not declared.
    #[error("unknown user in journal: {0}")]
    UnknownUser(String),

    /// An entry names a plant that was never planted.
    #[error("unknown plant in journal: {0}")]
    UnknownPlant(String),

    /// An engine query failed while building the summary.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
