/*!
 * Projection of an alignment path back onto subtitle cue boundaries.
 */

use std::ops::Range;

use crate::errors::AlignmentError;

use super::normalizer::WordToken;
use super::traceback::AlignmentStep;

/// Half-open ranges of original word indices, one per segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentBoundaries {
    ranges: Vec<Range<usize>>,
    total_words: usize,
}

impl SegmentBoundaries {
    /// Build contiguous boundaries from per-segment word counts
    pub fn from_word_counts(counts: &[usize]) -> Self {
        let mut ranges = Vec::with_capacity(counts.len());
        let mut start = 0;
        for &count in counts {
            ranges.push(start..start + count);
            start += count;
        }

        Self {
            ranges,
            total_words: start,
        }
    }

    /// Build boundaries from explicit ranges, checking they partition `[0, total_words)`
    pub fn new(ranges: Vec<Range<usize>>, total_words: usize) -> Result<Self, AlignmentError> {
        let boundaries = Self { ranges, total_words };
        boundaries.validate(total_words)?;
        Ok(boundaries)
    }

    /// Check that the ranges partition `[0, total_words)` in order
    pub fn validate(&self, total_words: usize) -> Result<(), AlignmentError> {
        let mut expected_start = 0;

        for (idx, range) in self.ranges.iter().enumerate() {
            if range.start != expected_start {
                return Err(AlignmentError::BoundaryTableInconsistency(format!(
                    "segment {} starts at word {}, expected {}",
                    idx, range.start, expected_start
                )));
            }
            if range.end < range.start {
                return Err(AlignmentError::BoundaryTableInconsistency(format!(
                    "segment {} ends at word {} before its start {}",
                    idx, range.end, range.start
                )));
            }
            expected_start = range.end;
        }

        if expected_start != total_words {
            return Err(AlignmentError::BoundaryTableInconsistency(format!(
                "segments cover {} word(s) but the original text has {}",
                expected_start, total_words
            )));
        }

        Ok(())
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }
}

/// Distribute the revised words of an alignment over the segments
///
/// Single forward pass over the steps. Revised words of gap-in-original steps
/// go to the segment the cursor is in. Segments that receive no word get the
/// empty string. Boundaries must already be validated.
pub fn remap(steps: &[AlignmentStep], revised: &[WordToken], boundaries: &SegmentBoundaries) -> Vec<String> {
    let ranges = boundaries.ranges();
    let mut output = vec![String::new(); ranges.len()];
    if ranges.is_empty() {
        return output;
    }

    let mut cursor = 0;
    let mut pending: Vec<&str> = Vec::new();

    for step in steps {
        if let Some(original_index) = step.original_index {
            while cursor + 1 < ranges.len() && ranges[cursor].end <= original_index {
                output[cursor] = pending.join(" ");
                pending.clear();
                cursor += 1;
            }
        }

        if let Some(revised_index) = step.revised_index {
            pending.push(revised[revised_index].text());
        }
    }

    output[cursor] = pending.join(" ");
    output
}
