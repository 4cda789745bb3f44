use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::AppError;
use crate::subtitle_processor::SubtitleFormat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Alignment scoring parameters
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Revised text preprocessing
    #[serde(default)]
    pub text: TextConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Scoring parameters of the local alignment
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Score added when two words match
    #[serde(default = "default_match_score")]
    pub match_score: i32,

    /// Score added when two aligned words differ
    #[serde(default = "default_mismatch_penalty")]
    pub mismatch_penalty: i32,

    /// Score added when a word is aligned against nothing
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: i32,
}

impl ScoringConfig {
    /// Create scoring parameters from explicit values
    pub fn new(match_score: i32, mismatch_penalty: i32, gap_penalty: i32) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_penalty,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch_penalty: default_mismatch_penalty(),
            gap_penalty: default_gap_penalty(),
        }
    }
}

/// Preprocessing applied to the revised text before tokenization
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TextConfig {
    /// Turn straight quotes into typographic quotes
    #[serde(default = "default_true")]
    pub curl_quotes: bool,

    /// Turn double hyphens and spaced hyphens into em dashes
    #[serde(default = "default_true")]
    pub replace_dashes: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            curl_quotes: true,
            replace_dashes: true,
        }
    }
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Output format; the input format is reused when unset
    #[serde(default)]
    pub format: Option<SubtitleFormat>,

    /// Wrap cue text at this many characters per line (0 disables wrapping)
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Suffix inserted before the extension of generated files
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            max_line_length: default_max_line_length(),
            output_suffix: default_output_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_match_score() -> i32 {
    2
}

fn default_mismatch_penalty() -> i32 {
    -1
}

fn default_gap_penalty() -> i32 {
    -1
}

fn default_true() -> bool {
    true
}

fn default_max_line_length() -> usize {
    42
}

fn default_output_suffix() -> String {
    "synced".to_string()
}

/// Largest accepted magnitude for any scoring parameter
pub const MAX_SCORE_MAGNITUDE: i32 = 10_000;

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        let scoring = &self.scoring;

        // A non-positive match score can never start a local alignment
        if scoring.match_score <= 0 {
            return Err(AppError::Config(format!(
                "match_score must be positive, got {}",
                scoring.match_score
            )));
        }

        if scoring.mismatch_penalty > 0 {
            return Err(AppError::Config(format!(
                "mismatch_penalty must not be positive, got {}",
                scoring.mismatch_penalty
            )));
        }

        if scoring.gap_penalty > 0 {
            return Err(AppError::Config(format!(
                "gap_penalty must not be positive, got {}",
                scoring.gap_penalty
            )));
        }

        for (name, value) in [
            ("match_score", scoring.match_score),
            ("mismatch_penalty", scoring.mismatch_penalty),
            ("gap_penalty", scoring.gap_penalty),
        ] {
            if value.unsigned_abs() > MAX_SCORE_MAGNITUDE.unsigned_abs() {
                return Err(AppError::Config(format!(
                    "{} must be within ±{}, got {}",
                    name, MAX_SCORE_MAGNITUDE, value
                )));
            }
        }

        if self.output.output_suffix.trim().is_empty() {
            return Err(AppError::Config("output_suffix must not be empty".to_string()));
        }

        Ok(())
    }
}
