/*!
 * Reconstruction of the best local alignment from the traceback matrix.
 */

use super::engine::{AlignmentMatrices, Direction};
use super::normalizer::WordToken;

/// Classification of one alignment step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Both words are present and match after normalization
    Match,
    /// Both words are present but differ
    Mismatch,
    /// A revised word with no original counterpart
    GapInOriginal,
    /// An original word with no revised counterpart
    GapInRevised,
}

/// One unit of the alignment path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentStep {
    /// Index into the original word sequence
    pub original_index: Option<usize>,
    /// Index into the revised word sequence
    pub revised_index: Option<usize>,
    /// What kind of step this is
    pub kind: StepKind,
}

impl AlignmentStep {
    fn paired(original_index: usize, revised_index: usize, kind: StepKind) -> Self {
        Self {
            original_index: Some(original_index),
            revised_index: Some(revised_index),
            kind,
        }
    }

    fn original_only(original_index: usize) -> Self {
        Self {
            original_index: Some(original_index),
            revised_index: None,
            kind: StepKind::GapInRevised,
        }
    }

    fn revised_only(revised_index: usize) -> Self {
        Self {
            original_index: None,
            revised_index: Some(revised_index),
            kind: StepKind::GapInOriginal,
        }
    }
}

/// Step counts of an alignment, by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentSummary {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps_in_original: usize,
    pub gaps_in_revised: usize,
}

impl AlignmentSummary {
    pub fn from_steps(steps: &[AlignmentStep]) -> Self {
        let mut summary = Self::default();
        for step in steps {
            match step.kind {
                StepKind::Match => summary.matches += 1,
                StepKind::Mismatch => summary.mismatches += 1,
                StepKind::GapInOriginal => summary.gaps_in_original += 1,
                StepKind::GapInRevised => summary.gaps_in_revised += 1,
            }
        }
        summary
    }

    /// Total number of steps
    pub fn total(&self) -> usize {
        self.matches + self.mismatches + self.gaps_in_original + self.gaps_in_revised
    }
}

/// Walk the traceback matrix from `start` back to a zero cell
///
/// The returned steps run in increasing index order. Words outside the
/// aligned subranges are simply not part of the result.
pub fn reconstruct(
    original: &[WordToken],
    revised: &[WordToken],
    matrices: &AlignmentMatrices,
    start: (usize, usize),
) -> Vec<AlignmentStep> {
    let (mut i, mut j) = start;
    let mut steps = Vec::new();

    while i > 0 && j > 0 && matrices.scores.get(i, j) > 0 {
        match matrices.traceback.get(i, j) {
            Direction::Diagonal => {
                let kind = if original[i - 1].matches(&revised[j - 1]) {
                    StepKind::Match
                } else {
                    StepKind::Mismatch
                };
                steps.push(AlignmentStep::paired(i - 1, j - 1, kind));
                i -= 1;
                j -= 1;
            }
            Direction::Up => {
                steps.push(AlignmentStep::original_only(i - 1));
                i -= 1;
            }
            Direction::Left => {
                steps.push(AlignmentStep::revised_only(j - 1));
                j -= 1;
            }
            Direction::None => break,
        }
    }

    steps.reverse();
    steps
}
