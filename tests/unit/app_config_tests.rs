/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use vidsum::app_config::{Config, LogLevel};
use vidsum::language_utils::SummaryLanguage;
use crate::common;

/// Test the default values
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.language, "english");
    assert_eq!(config.summary.target_duration_secs, 60.0);
    assert_eq!(config.summary.max_iterations, 200);
    assert_eq!(config.summary.reduction_ratio, 1.0);
    assert_eq!(config.summary.min_dimensions, 3);
    assert_eq!(config.video.ffmpeg_path, "ffmpeg");
    assert_eq!(config.video.output_suffix, "_1");
    assert_eq!(config.download.ytdlp_path, "yt-dlp");
    assert_eq!(config.download.subtitle_languages, vec!["en-GB".to_string()]);
    assert!(config.worker.isolate);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
    assert_eq!(config.summary.policy().max_iterations, 200);
}

/// Test that every missing field falls back to its default
#[test]
fn test_deserialize_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

/// Test partial sections
#[test]
fn test_deserialize_withPartialSections_shouldMergeDefaults() {
    let json = r#"{
        "language": "de",
        "summary": { "target_duration_secs": 90 },
        "video": { "video_codec": "libx265" },
        "log_level": "debug"
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.summary.target_duration_secs, 90.0);
    assert_eq!(config.summary.max_iterations, 200);
    assert_eq!(config.video.video_codec, "libx265");
    assert_eq!(config.video.audio_codec, "aac");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.summary_language().unwrap(), SummaryLanguage::German);
}

/// Test validation failures
#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let cases: [fn(&mut Config); 13] = [
        |c: &mut Config| c.language = "klingon".to_string(),
        |c: &mut Config| c.summary.target_duration_secs = 0.0,
        |c: &mut Config| c.summary.target_duration_secs = f64::NAN,
        |c: &mut Config| c.summary.max_iterations = 0,
        |c: &mut Config| c.summary.reduction_ratio = 1.5,
        |c: &mut Config| c.summary.reduction_ratio = 0.0,
        |c: &mut Config| c.summary.min_dimensions = 0,
        |c: &mut Config| c.video.ffmpeg_path = " ".to_string(),
        |c: &mut Config| c.video.audio_codec = String::new(),
        |c: &mut Config| c.video.output_suffix = String::new(),
        |c: &mut Config| c.video.timeout_secs = 0,
        |c: &mut Config| c.download.subtitle_languages.clear(),
        |c: &mut Config| c.worker.max_workers = 0,
    ];

    for (i, mutate) in cases.into_iter().enumerate() {
        let mut config = Config::default();
        mutate(&mut config);
        assert!(config.validate().is_err(), "case {} should fail validation", i);
    }
}

/// Test that a missing file is created with defaults, then loaded back
#[test]
fn test_load_or_create_withMissingFile_shouldCreateThenLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let (created, was_created) = Config::load_or_create(&path)?;
    assert!(was_created);
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let (loaded, was_created) = Config::load_or_create(&path)?;
    assert!(!was_created);
    assert_eq!(loaded, created);
    Ok(())
}

/// Test that a malformed file is an error, not silently replaced
#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path)?, "{ not json");
    Ok(())
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMap() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
