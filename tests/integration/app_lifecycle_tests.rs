/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use vidsum::app_config::Config;
use vidsum::app_controller::Controller;
use vidsum::language_utils::SummaryLanguage;
use crate::common;

/// Test config creation, edit, reload and controller start-up
#[test]
fn test_lifecycle_withEditedConfig_shouldDriveController() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let (config, created) = Config::load_or_create(&config_path)?;
    assert!(created);
    config.validate()?;

    let mut edited = config.clone();
    edited.language = "es".to_string();
    edited.summary.target_duration_secs = 9.0;
    std::fs::write(&config_path, serde_json::to_string_pretty(&edited)?)?;

    let (reloaded, created) = Config::load_or_create(&config_path)?;
    assert!(!created);
    reloaded.validate()?;

    let controller = Controller::with_config(reloaded)?.with_config_path(&config_path);
    assert_eq!(controller.language(), SummaryLanguage::Spanish);
    assert_eq!(controller.config().summary.target_duration_secs, 9.0);
    Ok(())
}

/// Test the regions path end to end through the controller
#[test]
fn test_lifecycle_findRegions_withWholeTrackTarget_shouldSelectEverything() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let subtitles = common::create_test_subtitle(temp_dir.path(), "talk.srt")?;

    let mut config = Config::default();
    config.summary.target_duration_secs = 11.0;
    let controller = Controller::with_config(config)?;

    let converged = controller.find_regions(&subtitles)?;
    assert_eq!(converged.budget, 3);
    assert_eq!(converged.total_duration, 11.0);
    Ok(())
}

/// Test an async controller entry point from a synchronous test
#[test]
fn test_lifecycle_runFolder_withMissingDirectory_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let result = tokio_test::block_on(async {
        controller.run_folder(std::path::Path::new("/no/such/folder"), false).await
    });
    assert!(result.is_err());
    Ok(())
}
