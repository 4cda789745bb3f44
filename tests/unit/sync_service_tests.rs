/*!
 * Tests for the sync service
 */

use subalign::alignment::{SegmentBoundaries, WordToken};
use subalign::app_config::{Config, ScoringConfig, TextConfig};
use subalign::errors::AlignmentError;
use subalign::sync_service::{SyncService, SyncStage};
use crate::common;

/// Test the substitution scenario end to end
#[test]
fn test_sync_withSubstitutedWord_shouldKeepItInFirstCue() {
    let entries = common::entries_from_texts(&["the quick", "brown fox"]);
    let service = SyncService::default();

    let outcome = service.sync(&entries, "the fast brown fox").unwrap();

    let texts: Vec<&str> = outcome.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["the fast", "brown fox"]);
    assert_eq!(outcome.best_score, 5);
    assert_eq!(outcome.summary.matches, 3);
    assert_eq!(outcome.summary.mismatches, 1);
    assert_eq!(outcome.recovered_prefix_words, 0);
}

/// Test prefix recovery of an extra leading word
#[test]
fn test_sync_withExtraLeadingWord_shouldRecoverItIntoFirstCue() {
    let entries = common::entries_from_texts(&["the quick", "brown fox"]);
    let service = SyncService::default();

    let outcome = service.sync(&entries, "hello the quick brown fox").unwrap();

    assert_eq!(outcome.entries[0].text, "hello the quick");
    assert_eq!(outcome.entries[1].text, "brown fox");
    assert_eq!(outcome.recovered_prefix_words, 1);
    assert_eq!(outcome.revised_word_count, 5);
    assert_eq!(outcome.original_word_count, 4);
}

/// Test that timing and numbering are carried over untouched
#[test]
fn test_sync_shouldPreserveTimingAndSequenceNumbers() {
    let entries = common::entries_from_texts(&["one two three", "four five", "six"]);
    let outcome = SyncService::default()
        .sync(&entries, "one two three four five six seven")
        .unwrap();

    assert_eq!(outcome.entries.len(), entries.len());
    for (before, after) in entries.iter().zip(&outcome.entries) {
        assert_eq!(before.seq_num, after.seq_num);
        assert_eq!(before.start_time_ms, after.start_time_ms);
        assert_eq!(before.end_time_ms, after.end_time_ms);
    }
    assert_eq!(outcome.entries[2].text, "six");
}

/// Test that inline tags do not prevent matching
#[test]
fn test_sync_withTaggedCueText_shouldMatchRevisedWords() {
    let entries = common::entries_from_texts(&["<i>Hello</i> there", "{\\an8}general Kenobi"]);
    let outcome = SyncService::default()
        .sync(&entries, "Hello there, General Kenobi!")
        .unwrap();

    assert_eq!(outcome.entries[0].text, "Hello there,");
    assert_eq!(outcome.entries[1].text, "General Kenobi!");
    assert_eq!(outcome.summary.matches, 4);
}

/// Test that the revised text is preprocessed before alignment
#[test]
fn test_sync_withStraightQuotes_shouldCurlThemInOutput() {
    let entries = common::entries_from_texts(&["I don't know", "what he said"]);
    let outcome = SyncService::default()
        .sync(&entries, "I don't know\nwhat \"he\" said")
        .unwrap();

    assert_eq!(outcome.entries[0].text, "I don’t know");
    assert_eq!(outcome.entries[1].text, "what “he” said");
}

/// Test that a cue without words gets empty text
#[test]
fn test_sync_withEmptyCue_shouldLeaveItEmpty() {
    let entries = common::entries_from_texts(&["alpha beta", "", "gamma delta"]);
    let outcome = SyncService::default()
        .sync(&entries, "alpha beta gamma delta")
        .unwrap();

    let texts: Vec<&str> = outcome.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha beta", "", "gamma delta"]);
}

/// Test a run with nothing in common
#[test]
fn test_sync_withUnrelatedText_shouldBeDegenerate() {
    let entries = common::entries_from_texts(&["alpha beta", "gamma"]);
    let outcome = SyncService::default().sync(&entries, "one two three").unwrap();

    assert!(outcome.is_degenerate());
    assert!(outcome.entries.iter().all(|e| e.text.is_empty()));
    assert_eq!(outcome.into_result().unwrap_err(), AlignmentError::DegenerateAlignment);
}

/// Test empty revised text
#[test]
fn test_sync_withEmptyRevisedText_shouldFail() {
    let entries = common::entries_from_texts(&["alpha beta"]);
    let result = SyncService::default().sync(&entries, "  \n ");
    assert_eq!(
        result.unwrap_err(),
        AlignmentError::EmptyInput {
            original_words: 2,
            revised_words: 0
        }
    );
}

/// Test progress reporting order
#[test]
fn test_syncWithProgress_shouldReportStagesInOrder() {
    let entries = common::entries_from_texts(&["the quick", "brown fox"]);
    let mut stages = Vec::new();

    SyncService::default()
        .sync_with_progress(&entries, "the quick brown fox", |stage| stages.push(stage))
        .unwrap();

    assert_eq!(
        stages,
        vec![
            SyncStage::Tokenizing,
            SyncStage::Aligning,
            SyncStage::Reconstructing,
            SyncStage::Remapping,
            SyncStage::RecoveringPrefix,
            SyncStage::Done,
        ]
    );
    assert!(stages.windows(2).all(|w| w[0].index() < w[1].index()));
    assert_eq!(SyncStage::Done.index() + 1, SyncStage::COUNT);
}

/// Test the segment level entry point with an invalid boundary table
#[test]
fn test_syncSegments_withInconsistentBoundaries_shouldFail() {
    let original = WordToken::from_words(["a", "b", "c"]);
    let revised = WordToken::from_words(["a", "b", "c"]);
    let boundaries = SegmentBoundaries::from_word_counts(&[1, 1]);

    let result = SyncService::default().sync_segments(&original, &revised, &boundaries, |_| {});
    assert!(matches!(result, Err(AlignmentError::BoundaryTableInconsistency(_))));
}

/// Test custom scoring
#[test]
fn test_sync_withHeavyGapPenalty_shouldPreferMismatches() {
    let scoring = ScoringConfig::new(2, -1, -3);
    let service = SyncService::new(scoring, TextConfig::default());
    let entries = common::entries_from_texts(&["a b c d"]);

    let outcome = service.sync(&entries, "a x c d").unwrap();
    assert_eq!(outcome.summary.gaps_in_original + outcome.summary.gaps_in_revised, 0);
    assert_eq!(outcome.entries[0].text, "a x c d");
}

/// Test service construction from configuration
#[test]
fn test_fromConfig_shouldUseConfiguredTextTransforms() {
    let mut config = Config::default();
    config.text.curl_quotes = false;
    let service = SyncService::from_config(&config);
    let entries = common::entries_from_texts(&["say it"]);

    let outcome = service.sync(&entries, "say \"it\"").unwrap();
    assert_eq!(outcome.entries[0].text, "say \"it\"");
}

/// Test a first cue that receives no aligned words
#[test]
fn test_sync_withUnmatchableFirstCue_shouldKeepLeadingRevisedWords() {
    let entries = common::entries_from_texts(&["♪ ♪", "the quick brown fox"]);
    let outcome = SyncService::default()
        .sync(&entries, "Welcome back, the quick brown fox")
        .unwrap();

    assert!(outcome.entries[0].text.starts_with("Welcome back,"));
    assert_eq!(outcome.entries[0].text, "Welcome back, the quick brown fox");
    assert_eq!(outcome.entries[1].text, "the quick brown fox");
    assert_eq!(outcome.recovered_prefix_words, 6);
}
