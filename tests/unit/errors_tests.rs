/*!
 * Tests for custom error types
 */

use lyrivid::errors::{AppError, PipelineError};

/// Test pipeline error display messages
#[test]
fn test_pipeline_error_display_shouldNameTheFailure() {
    let error = PipelineError::UnsupportedFormat("song.xyz: no decoder".to_string());
    assert_eq!(error.to_string(), "Unsupported audio format: song.xyz: no decoder");

    let error = PipelineError::MalformedLyrics("no syllables found".to_string());
    assert_eq!(error.to_string(), "Malformed lyrics: no syllables found");

    let error = PipelineError::EncodingError("libx264 missing".to_string());
    assert_eq!(error.to_string(), "Encoding failed: libx264 missing");

    let error = PipelineError::MissingPair("no lyrics for song.m4a".to_string());
    assert_eq!(error.to_string(), "Missing pair: no lyrics for song.m4a");
}

/// Test pipeline errors wrap into the application error
#[test]
fn test_app_error_fromPipelineError_shouldWrap() {
    let error: AppError = PipelineError::MissingPair("song.m4a".to_string()).into();

    assert!(matches!(error, AppError::Pipeline(PipelineError::MissingPair(_))));
    assert!(error.to_string().contains("Missing pair"));
}

/// Test IO errors map to the file variant
#[test]
fn test_app_error_fromIoError_shouldMapToFile() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io_error.into();

    assert!(matches!(error, AppError::File(_)));
}

/// Test anyhow errors map to the unknown variant
#[test]
fn test_app_error_fromAnyhow_shouldMapToUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();

    assert!(matches!(error, AppError::Unknown(_)));
    assert!(error.to_string().contains("something odd"));
}

/// Test pipeline errors convert through anyhow with their message intact
#[test]
fn test_pipeline_error_throughAnyhow_shouldKeepMessage() {
    let result: anyhow::Result<()> =
        Err(PipelineError::UnsupportedFormat("song.xyz".to_string()).into());

    let message = result.unwrap_err().to_string();
    assert!(message.contains("Unsupported audio format"));
}
