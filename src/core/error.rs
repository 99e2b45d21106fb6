//! Defines the custom error types for the reacher-batch application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for the batch checking process.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., the HTTP client).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Request(#[from] reqwest::Error),

    /// A result line could not be persisted after exhausting all write attempts.
    #[error("Output Error: failed to append to '{path}' after {attempts} attempts: {source}")]
    Sink {
        /// The per-status output file that kept failing.
        path: PathBuf,
        /// How many write attempts were made before giving up.
        attempts: u32,
        /// The final I/O error.
        source: io::Error,
    },

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
