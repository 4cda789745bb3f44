/*!
 * Sync service: one realignment run from cues and revised text to new cues.
 *
 * The service tokenizes both texts, derives the segment boundary table from
 * the cue word counts, runs the local alignment and maps the revised words
 * back onto the cues. Progress is reported through a caller-supplied
 * callback; the service itself never touches the terminal or the filesystem.
 */

use log::{debug, warn};

use crate::alignment::{
    recover_prefix, reconstruct, remap, AlignmentEngine, AlignmentSummary, SegmentBoundaries, WordToken,
};
use crate::app_config::{Config, ScoringConfig, TextConfig};
use crate::errors::AlignmentError;
use crate::subtitle_processor::SubtitleEntry;
use crate::text_utils;

/// Stages of a sync run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Tokenizing,
    Aligning,
    Reconstructing,
    Remapping,
    RecoveringPrefix,
    Done,
}

impl SyncStage {
    /// Number of stages
    pub const COUNT: u64 = 6;

    /// Zero-based position of the stage
    pub fn index(&self) -> u64 {
        match self {
            Self::Tokenizing => 0,
            Self::Aligning => 1,
            Self::Reconstructing => 2,
            Self::Remapping => 3,
            Self::RecoveringPrefix => 4,
            Self::Done => 5,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tokenizing => "Tokenizing",
            Self::Aligning => "Aligning words",
            Self::Reconstructing => "Reconstructing alignment",
            Self::Remapping => "Mapping words onto cues",
            Self::RecoveringPrefix => "Recovering skipped opening words",
            Self::Done => "Done",
        }
    }
}

/// Texts produced for each segment plus alignment statistics
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSync {
    /// One revised string per segment
    pub texts: Vec<String>,
    /// Best local alignment score
    pub best_score: i32,
    /// Step counts of the alignment
    pub summary: AlignmentSummary,
    /// Number of words put back by the prefix recovery pass
    pub recovered_prefix_words: usize,
}

impl SegmentSync {
    /// Whether no local alignment was found at all
    pub fn is_degenerate(&self) -> bool {
        self.best_score == 0
    }
}

/// Result of syncing a list of cues
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Cues with original timing and revised text
    pub entries: Vec<SubtitleEntry>,
    /// Best local alignment score
    pub best_score: i32,
    /// Step counts of the alignment
    pub summary: AlignmentSummary,
    /// Words in the original cue text
    pub original_word_count: usize,
    /// Words in the revised text
    pub revised_word_count: usize,
    /// Number of words put back by the prefix recovery pass
    pub recovered_prefix_words: usize,
}

impl SyncOutcome {
    /// Whether no local alignment was found at all
    pub fn is_degenerate(&self) -> bool {
        self.best_score == 0
    }

    /// Turn a degenerate outcome into an error
    pub fn into_result(self) -> Result<Self, AlignmentError> {
        if self.is_degenerate() {
            Err(AlignmentError::DegenerateAlignment)
        } else {
            Ok(self)
        }
    }
}

/// Realigns revised text onto subtitle cues
#[derive(Debug, Clone, Default)]
pub struct SyncService {
    engine: AlignmentEngine,
    text_config: TextConfig,
}

impl SyncService {
    pub fn new(scoring: ScoringConfig, text_config: TextConfig) -> Self {
        Self {
            engine: AlignmentEngine::new(scoring),
            text_config,
        }
    }

    /// Create a service from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.scoring, config.text.clone())
    }

    /// Sync cues with revised text
    pub fn sync(&self, entries: &[SubtitleEntry], revised_text: &str) -> Result<SyncOutcome, AlignmentError> {
        self.sync_with_progress(entries, revised_text, |_| {})
    }

    /// Sync cues with revised text, reporting each stage as it starts
    pub fn sync_with_progress<F>(
        &self,
        entries: &[SubtitleEntry],
        revised_text: &str,
        mut on_stage: F,
    ) -> Result<SyncOutcome, AlignmentError>
    where
        F: FnMut(SyncStage),
    {
        on_stage(SyncStage::Tokenizing);

        let cue_words: Vec<Vec<String>> = entries.iter().map(SubtitleEntry::words).collect();
        let counts: Vec<usize> = cue_words.iter().map(Vec::len).collect();
        let boundaries = SegmentBoundaries::from_word_counts(&counts);
        let original: Vec<WordToken> = cue_words
            .into_iter()
            .flatten()
            .map(WordToken::new)
            .collect();

        let prepared = text_utils::prepare_text(revised_text, &self.text_config);
        let revised = WordToken::from_words(text_utils::tokenize(&prepared));

        debug!(
            "Syncing {} cue(s): {} original word(s), {} revised word(s)",
            entries.len(),
            original.len(),
            revised.len()
        );

        let segments = self.sync_segments(&original, &revised, &boundaries, &mut on_stage)?;

        let synced_entries = entries
            .iter()
            .zip(segments.texts)
            .map(|(entry, text)| entry.with_text(text))
            .collect();

        on_stage(SyncStage::Done);

        Ok(SyncOutcome {
            entries: synced_entries,
            best_score: segments.best_score,
            summary: segments.summary,
            original_word_count: original.len(),
            revised_word_count: revised.len(),
            recovered_prefix_words: segments.recovered_prefix_words,
        })
    }

    /// Align pre-tokenized sequences and produce one revised string per segment
    ///
    /// A degenerate alignment is not an error here: every segment receives the
    /// empty string and `SegmentSync::is_degenerate` reports it.
    pub fn sync_segments<F>(
        &self,
        original: &[WordToken],
        revised: &[WordToken],
        boundaries: &SegmentBoundaries,
        mut on_stage: F,
    ) -> Result<SegmentSync, AlignmentError>
    where
        F: FnMut(SyncStage),
    {
        if original.is_empty() || revised.is_empty() {
            return Err(AlignmentError::EmptyInput {
                original_words: original.len(),
                revised_words: revised.len(),
            });
        }

        boundaries.validate(original.len())?;

        on_stage(SyncStage::Aligning);
        let matrices = self.engine.align(original, revised)?;

        if matrices.best_score == 0 {
            warn!("No local alignment found between the subtitle text and the revised text");
            return Ok(SegmentSync {
                texts: vec![String::new(); boundaries.len()],
                best_score: 0,
                summary: AlignmentSummary::default(),
                recovered_prefix_words: 0,
            });
        }

        on_stage(SyncStage::Reconstructing);
        let steps = reconstruct(original, revised, &matrices, matrices.best_position);
        let summary = AlignmentSummary::from_steps(&steps);

        debug!(
            "Best score {} at {:?} over {} step(s): {} match(es), {} mismatch(es), {} inserted, {} dropped",
            matrices.best_score,
            matrices.best_position,
            summary.total(),
            summary.matches,
            summary.mismatches,
            summary.gaps_in_original,
            summary.gaps_in_revised
        );

        on_stage(SyncStage::Remapping);
        let mut texts = remap(&steps, revised, boundaries);

        on_stage(SyncStage::RecoveringPrefix);
        let mut recovered_prefix_words = 0;
        if let Some(first) = texts.first_mut() {
            let recovery = recover_prefix(revised, first);
            recovered_prefix_words = recovery.prepended_words;
            if !recovery.stop_found {
                warn!(
                    "First cue shares no word with the revised text, prepended all {} revised word(s) to it",
                    recovery.prepended_words
                );
            } else if recovered_prefix_words > 0 {
                debug!("Recovered {} leading word(s) into the first cue", recovered_prefix_words);
            }
            *first = recovery.text;
        }

        Ok(SegmentSync {
            texts,
            best_score: matrices.best_score,
            summary,
            recovered_prefix_words,
        })
    }
}
