/*!
 * Tests for error types and their messages
 */

use std::path::PathBuf;
use vidsum::errors::{AppError, MediaError, NonConvergenceReason, SubtitleError, SummaryError, WorkerError};

/// Test non-convergence messages carry the loop state
#[test]
fn test_non_convergence_display_shouldIncludeState() {
    let err = SummaryError::NonConvergence {
        reason: NonConvergenceReason::Saturated,
        budget: 12,
        total: 40.5,
        target: 60.0,
    };
    let message = err.to_string();

    assert!(message.contains("budget 12"));
    assert!(message.contains("40.500s"));
    assert!(message.contains("60.000s"));
}

/// Test every non-convergence reason has a distinct description
#[test]
fn test_non_convergence_reason_display_shouldBeDistinct() {
    let reasons = [
        NonConvergenceReason::BudgetFloor,
        NonConvergenceReason::Saturated,
        NonConvergenceReason::NonMonotonic,
        NonConvergenceReason::IterationLimit,
    ];
    let mut texts: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), reasons.len());
}

/// Test conversions into the application error
#[test]
fn test_app_error_from_withDomainErrors_shouldWrap() {
    let subtitle: AppError = SubtitleError::Empty(PathBuf::from("a.srt")).into();
    assert!(matches!(subtitle, AppError::Subtitle(_)));

    let summary: AppError = SummaryError::DivisionByZero.into();
    assert!(matches!(summary, AppError::Summary(_)));

    let media: AppError = MediaError::NothingToRender.into();
    assert!(matches!(media, AppError::Media(_)));

    let worker: AppError = WorkerError::Join("cancelled".to_string()).into();
    assert!(matches!(worker, AppError::Worker(_)));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io, AppError::File(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(other.to_string(), "Unknown error: boom");
}

/// Test the media error messages name the tool
#[test]
fn test_media_error_display_shouldNameTool() {
    let err = MediaError::Timeout { tool: "ffmpeg".to_string(), secs: 5 };
    assert_eq!(err.to_string(), "ffmpeg timed out after 5 seconds");
}
