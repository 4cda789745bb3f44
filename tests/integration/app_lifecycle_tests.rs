/*!
 * Integration tests for application lifecycle
 */

use std::path::Path;
use anyhow::Result;
use subalign::app_config::{Config, ScoringConfig};
use subalign::app_controller::Controller;
use subalign::subtitle_processor::SubtitleFormat;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().scoring, ScoringConfig::default());
    Ok(())
}

/// Test the controller with an invalid configuration
#[test]
fn test_controller_withInvalidScoring_shouldRefuseToStart() {
    let mut config = Config::default();
    config.scoring.match_score = 0;

    assert!(Controller::with_config(config).is_err());
}

/// Test default output naming
#[test]
fn test_default_output_path_shouldFollowInputName() -> Result<()> {
    let mut config = Config::default();
    config.output.output_suffix = "edited".to_string();
    let controller = Controller::with_config(config)?;

    let path = controller.default_output_path(Path::new("/media/show/ep1.srt"), SubtitleFormat::Sbv);
    assert_eq!(path, Path::new("/media/show/ep1.edited.sbv"));
    Ok(())
}

/// Test that an existing output is only replaced when forced
#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let revised_path = common::create_test_file(
        temp_dir.path(),
        "revised.txt",
        "This is a test subtitle. It contains multiple entries. For testing purposes.",
    )?;
    let output_path = temp_dir.path().join("test.synced.srt");

    let controller = Controller::new_for_test()?;

    let first = tokio_test::block_on(controller.run(subtitle_path.clone(), revised_path.clone(), None, false))?;
    assert_eq!(first, Some(output_path.clone()));

    std::fs::write(&output_path, "stale")?;

    let second = tokio_test::block_on(controller.run(subtitle_path.clone(), revised_path.clone(), None, false))?;
    assert_eq!(second, None);
    assert_eq!(std::fs::read_to_string(&output_path)?, "stale");

    let third = tokio_test::block_on(controller.run(subtitle_path, revised_path, None, true))?;
    assert_eq!(third, Some(output_path.clone()));
    assert!(std::fs::read_to_string(&output_path)?.starts_with("1\n00:00:01,000 --> 00:00:04,000\n"));
    Ok(())
}

/// Test missing input files
#[tokio::test]
async fn test_run_withMissingInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let subtitle_path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;
    let controller = Controller::new_for_test()?;

    let missing = temp_dir.path().join("missing.txt");
    assert!(controller.run(subtitle_path.clone(), missing.clone(), None, false).await.is_err());
    assert!(controller.run(missing, subtitle_path, None, false).await.is_err());
    Ok(())
}

/// Test a plain text file given as the subtitle input
#[tokio::test]
async fn test_run_withTextAsSubtitleInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text_path = common::create_test_file(temp_dir.path(), "notes.txt", "Just words.")?;
    let controller = Controller::new_for_test()?;

    let result = controller.run(text_path.clone(), text_path, None, false).await;
    assert!(result.is_err());
    Ok(())
}
