/*!
 * Word-level local alignment between subtitle text and a revised transcript.
 *
 * The pipeline runs leaves first:
 * - `normalizer`: comparison forms of words (never used for output)
 * - `engine`: Smith-Waterman score and traceback matrices
 * - `traceback`: reconstruction of the best local alignment path
 * - `remap`: projection of the path onto cue boundaries
 * - `prefix`: reinsertion of leading revised words the alignment skipped
 *
 * Everything here is pure and synchronous. Matrices live only for the
 * duration of one call, so independent runs can happen on separate threads.
 */

pub mod normalizer;
pub mod engine;
pub mod traceback;
pub mod remap;
pub mod prefix;

// Re-export main types
pub use normalizer::{normalize, words_match, WordToken};
pub use engine::{AlignmentEngine, AlignmentMatrices, Direction, Matrix};
pub use traceback::{reconstruct, AlignmentStep, AlignmentSummary, StepKind};
pub use remap::{remap, SegmentBoundaries};
pub use prefix::{recover_prefix, PrefixRecovery};
