/*!
 * Error types for the lyrivid application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while processing one audio/lyrics pair
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error when the audio file cannot be probed or decoded
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Error when the lyrics file is empty or cannot be parsed into syllables
    #[error("Malformed lyrics: {0}")]
    MalformedLyrics(String),

    /// Error when the output video cannot be encoded or written
    #[error("Encoding failed: {0}")]
    EncodingError(String),

    /// Error when an audio file has no lyrics counterpart (or vice versa)
    #[error("Missing pair: {0}")]
    MissingPair(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the render pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
