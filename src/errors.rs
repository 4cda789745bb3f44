/*!
 * Error types for the subalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while aligning a revised transcript against subtitle cues
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    /// One of the two word sequences is empty
    #[error("Cannot align empty input: {original_words} original word(s), {revised_words} revised word(s)")]
    EmptyInput {
        /// Number of words in the original sequence
        original_words: usize,
        /// Number of words in the revised sequence
        revised_words: usize,
    },

    /// The best local alignment scored zero
    #[error("No usable match found between the subtitle text and the revised text")]
    DegenerateAlignment,

    /// Segment boundaries do not partition the original word range
    #[error("Segment boundary table is inconsistent: {0}")]
    BoundaryTableInconsistency(String),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// No cue could be read from the content
    #[error("No valid subtitle entries were found in the {format} content")]
    NoEntries {
        /// Format the content was parsed as
        format: String,
    },

    /// The subtitle format could not be determined or is not supported
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the alignment engine
    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

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
