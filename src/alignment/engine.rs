/*!
 * Smith-Waterman local alignment over word sequences.
 *
 * Fills a dense (n+1)x(m+1) score matrix and a parallel traceback matrix.
 * Scores never drop below zero; a zero cell starts a fresh local alignment.
 */

use crate::app_config::ScoringConfig;
use crate::errors::AlignmentError;

use super::normalizer::WordToken;

/// Predecessor that produced a cell's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Score is zero: a local alignment starts here
    #[default]
    None,
    /// Both sequences consumed one word
    Diagonal,
    /// Only the original sequence consumed a word
    Up,
    /// Only the revised sequence consumed a word
    Left,
}

/// Dense row-major grid
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Create a grid filled with `T::default()`
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![T::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at row `i`, column `j`
    pub fn get(&self, i: usize, j: usize) -> T {
        self.cells[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.cells[i * self.cols + j] = value;
    }

    /// One full row
    pub fn row(&self, i: usize) -> &[T] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }
}

/// Result of filling the dynamic programming matrices
#[derive(Debug, Clone)]
pub struct AlignmentMatrices {
    /// Scores, row = original word index + 1, column = revised word index + 1
    pub scores: Matrix<i32>,
    /// Direction that produced each score
    pub traceback: Matrix<Direction>,
    /// Highest score in the matrix
    pub best_score: i32,
    /// First cell in row-major order holding `best_score`
    pub best_position: (usize, usize),
}

/// Local alignment engine configured with scoring constants
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentEngine {
    scoring: ScoringConfig,
}

impl AlignmentEngine {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Fill the score and traceback matrices for two word sequences
    ///
    /// Ties resolve diagonal first, then up, then left. The best cell is the
    /// first maximum met in row-major order.
    pub fn align(&self, original: &[WordToken], revised: &[WordToken]) -> Result<AlignmentMatrices, AlignmentError> {
        if original.is_empty() || revised.is_empty() {
            return Err(AlignmentError::EmptyInput {
                original_words: original.len(),
                revised_words: revised.len(),
            });
        }

        let n = original.len();
        let m = revised.len();
        let ScoringConfig {
            match_score,
            mismatch_penalty,
            gap_penalty,
        } = self.scoring;

        let mut scores: Matrix<i32> = Matrix::new(n + 1, m + 1);
        let mut traceback: Matrix<Direction> = Matrix::new(n + 1, m + 1);
        let mut best_score = 0;
        let mut best_position = (0, 0);

        for i in 1..=n {
            let word1 = &original[i - 1];
            for j in 1..=m {
                let pair_score = if word1.matches(&revised[j - 1]) {
                    match_score
                } else {
                    mismatch_penalty
                };

                let diag_score = scores.get(i - 1, j - 1).saturating_add(pair_score);
                let up_score = scores.get(i - 1, j).saturating_add(gap_penalty);
                let left_score = scores.get(i, j - 1).saturating_add(gap_penalty);
                let score = 0i32.max(diag_score).max(up_score).max(left_score);

                let direction = if score == 0 {
                    Direction::None
                } else if score == diag_score {
                    Direction::Diagonal
                } else if score == up_score {
                    Direction::Up
                } else {
                    Direction::Left
                };

                scores.set(i, j, score);
                traceback.set(i, j, direction);

                if score > best_score {
                    best_score = score;
                    best_position = (i, j);
                }
            }
        }

        Ok(AlignmentMatrices {
            scores,
            traceback,
            best_score,
            best_position,
        })
    }
}
