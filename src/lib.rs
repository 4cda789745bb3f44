/*!
 * # subalign - realign revised transcripts onto timed subtitles
 *
 * A Rust library that keeps the timing of an existing subtitle track and
 * replaces its text with a freely edited revision of the same transcript.
 *
 * ## Features
 *
 * - Word-level Smith-Waterman local alignment between cue text and revised text
 * - Cue-by-cue remapping that never retimes or reflows cues
 * - Recovery of rewritten opening words skipped by the local alignment
 * - SRT, SBV and WebVTT parsing and formatting with line wrapping
 * - Quote curling, dash substitution and whitespace cleanup of the revision
 * - Configurable match, mismatch and gap scores
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: the alignment core:
 *   - `alignment::normalizer`: comparison forms of words
 *   - `alignment::engine`: score and traceback matrices
 *   - `alignment::traceback`: best-path reconstruction
 *   - `alignment::remap`: projection onto cue boundaries
 *   - `alignment::prefix`: leading-word recovery
 * - `sync_service`: one realignment run with stage progress callbacks
 * - `subtitle_processor`: subtitle file handling and processing
 * - `text_utils`: revised text preprocessing
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod sync_service;
pub mod text_utils;

// Re-export main types for easier usage
pub use app_config::{Config, ScoringConfig, TextConfig};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry, SubtitleFormat};
pub use sync_service::{SyncOutcome, SyncService, SyncStage};
pub use errors::{AlignmentError, AppError, SubtitleError};
