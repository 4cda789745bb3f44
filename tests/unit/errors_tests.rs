/*!
 * Tests for error types and conversions
 */

use std::io;
use subalign::errors::{AlignmentError, AppError, SubtitleError};

/// Test alignment error messages
#[test]
fn test_alignment_error_display_shouldDescribeProblem() {
    let error = AlignmentError::EmptyInput {
        original_words: 0,
        revised_words: 3,
    };
    assert_eq!(
        error.to_string(),
        "Cannot align empty input: 0 original word(s), 3 revised word(s)"
    );

    let error = AlignmentError::BoundaryTableInconsistency("gap".to_string());
    assert!(error.to_string().contains("gap"));
}

/// Test wrapping into the application error
#[test]
fn test_app_error_from_domainErrors_shouldWrap() {
    let app: AppError = AlignmentError::DegenerateAlignment.into();
    assert!(matches!(app, AppError::Alignment(AlignmentError::DegenerateAlignment)));
    assert!(app.to_string().starts_with("Alignment error:"));

    let app: AppError = SubtitleError::InvalidTimestamp("xx".to_string()).into();
    assert!(matches!(app, AppError::Subtitle(_)));
    assert_eq!(app.to_string(), "Subtitle error: Invalid timestamp 'xx'");
}

/// Test conversions from foreign errors
#[test]
fn test_app_error_from_ioAndAnyhow_shouldConvert() {
    let app: AppError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(app, AppError::File(ref msg) if msg.contains("missing")));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app, AppError::Unknown(ref msg) if msg == "boom"));
}

/// Test that domain errors flow through anyhow
#[test]
fn test_domain_errors_withAnyhow_shouldDowncast() {
    let error: anyhow::Error = AlignmentError::DegenerateAlignment.into();
    assert_eq!(
        error.downcast_ref::<AlignmentError>(),
        Some(&AlignmentError::DegenerateAlignment)
    );
}
