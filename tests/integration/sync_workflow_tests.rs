/*!
 * End-to-end tests for subtitle realignment
 */

use anyhow::Result;
use subalign::app_config::Config;
use subalign::app_controller::Controller;
use subalign::errors::AlignmentError;
use subalign::subtitle_processor::{SubtitleCollection, SubtitleFormat};
use crate::common;

const REVISED_TEXT: &str = "So this is a test subtitle. It holds multiple entries.\nFor testing purposes.";

fn texts(collection: &SubtitleCollection) -> Vec<&str> {
    collection.entries.iter().map(|e| e.text.as_str()).collect()
}

/// Test the full workflow with a plain text revision
#[tokio::test]
async fn test_sync_workflow_withRevisedText_shouldWriteRealignedSrt() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let revised_path = common::create_test_file(temp_dir.path(), "revised.txt", REVISED_TEXT)?;

    let controller = Controller::new_for_test()?;
    let output = controller.run(subtitle_path.clone(), revised_path, None, false).await?;

    let output = output.expect("output should be written");
    assert_eq!(output, temp_dir.path().join("test.synced.srt"));

    let original = SubtitleCollection::from_file(&subtitle_path, None)?;
    let synced = SubtitleCollection::from_file(&output, None)?;

    assert_eq!(
        texts(&synced),
        vec!["So this is a test subtitle.", "It holds multiple entries.", "For testing purposes."]
    );
    for (before, after) in original.entries.iter().zip(&synced.entries) {
        assert_eq!(before.start_time_ms, after.start_time_ms);
        assert_eq!(before.end_time_ms, after.end_time_ms);
    }
    Ok(())
}

/// Test writing a different container than the input
#[tokio::test]
async fn test_sync_workflow_withVttOutputFormat_shouldWriteVtt() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let revised_path = common::create_test_file(temp_dir.path(), "revised.txt", REVISED_TEXT)?;

    let mut config = Config::default();
    config.output.format = Some(SubtitleFormat::Vtt);
    let controller = Controller::with_config(config)?;

    let output = controller
        .run(subtitle_path, revised_path, None, false)
        .await?
        .expect("output should be written");

    assert_eq!(output, temp_dir.path().join("test.synced.vtt"));
    let content = std::fs::read_to_string(&output)?;
    assert!(content.starts_with("WEBVTT\n\n00:00:01.000 --> 00:00:04.000\n"));

    let synced = SubtitleCollection::from_file(&output, None)?;
    assert_eq!(synced.format, SubtitleFormat::Vtt);
    assert_eq!(synced.entries.len(), 3);
    Ok(())
}

/// Test a revision supplied as another subtitle file
#[tokio::test]
async fn test_sync_workflow_withSubtitleRevision_shouldUseItsText() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let revised_path = common::create_test_file(
        temp_dir.path(),
        "revised.sbv",
        "0:00:00.000,0:00:02.000\nSo this is a test\n\n0:00:02.000,0:00:09.000\nsubtitle. It holds multiple entries. For testing purposes.\n",
    )?;
    let output_path = temp_dir.path().join("explicit.srt");

    let controller = Controller::new_for_test()?;
    let output = controller
        .run(subtitle_path, revised_path, Some(output_path.clone()), false)
        .await?;
    assert_eq!(output, Some(output_path.clone()));

    let synced = SubtitleCollection::from_file(&output_path, None)?;
    assert_eq!(
        texts(&synced),
        vec!["So this is a test subtitle.", "It holds multiple entries.", "For testing purposes."]
    );
    Ok(())
}

/// Test a revision with nothing in common with the subtitles
#[tokio::test]
async fn test_sync_workflow_withUnrelatedRevision_shouldReportNoMatch() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let revised_path =
        common::create_test_file(temp_dir.path(), "revised.txt", "Completely unrelated words here")?;

    let controller = Controller::new_for_test()?;
    let result = controller.run(subtitle_path, revised_path, None, false).await;

    let error = result.expect_err("unrelated text should not align");
    assert_eq!(
        error.downcast_ref::<AlignmentError>(),
        Some(&AlignmentError::DegenerateAlignment)
    );
    assert!(!temp_dir.path().join("test.synced.srt").exists());
    Ok(())
}

/// Test an empty revision file
#[tokio::test]
async fn test_sync_workflow_withEmptyRevision_shouldFail() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let revised_path = common::create_test_file(temp_dir.path(), "revised.txt", "\n\n")?;

    let controller = Controller::new_for_test()?;
    let result = controller.run(subtitle_path, revised_path, None, false).await;

    let error = result.expect_err("empty revision should fail");
    assert!(matches!(
        error.downcast_ref::<AlignmentError>(),
        Some(AlignmentError::EmptyInput { revised_words: 0, .. })
    ));
    Ok(())
}
