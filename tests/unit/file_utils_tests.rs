/*!
 * Tests for file utility functionality
 */

use std::path::PathBuf;
use anyhow::Result;
use vidsum::file_utils::{FileManager, FileType};
use crate::common;

/// Test the summary output naming
#[test]
fn test_summary_output_path_withExtension_shouldAppendSuffixBeforeExtension() {
    let output = FileManager::summary_output_path("/videos/talk.mp4", "_1");
    assert_eq!(output, PathBuf::from("/videos/talk_1.mp4"));

    let bare = FileManager::summary_output_path("clip", "_short");
    assert_eq!(bare, PathBuf::from("clip_short"));
}

/// Test that the plain subtitle name wins over language-tagged ones
#[test]
fn test_find_subtitle_for_video_withSeveralCandidates_shouldPreferPlainSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "talk.mp4", "")?;
    common::create_test_file(temp_dir.path(), "talk.en.srt", "x")?;
    common::create_test_file(temp_dir.path(), "talk.vtt", "x")?;
    let plain = common::create_test_file(temp_dir.path(), "talk.srt", "x")?;

    assert_eq!(FileManager::find_subtitle_for_video(&video), Some(plain));
    Ok(())
}

/// Test language-tagged subtitles as written by yt-dlp
#[test]
fn test_find_subtitle_for_video_withLanguageTag_shouldFindIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "talk.mkv", "")?;
    let vtt = common::create_test_file(temp_dir.path(), "talk.en-GB.vtt", "x")?;
    let srt = common::create_test_file(temp_dir.path(), "talk.en-GB.srt", "x")?;
    common::create_test_file(temp_dir.path(), "other.srt", "x")?;

    assert_eq!(FileManager::find_subtitle_for_video(&video), Some(srt));
    std::fs::remove_file(temp_dir.path().join("talk.en-GB.srt"))?;
    assert_eq!(FileManager::find_subtitle_for_video(&video), Some(vtt));
    Ok(())
}

/// Test a video without subtitles
#[test]
fn test_find_subtitle_for_video_withoutSubtitles_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "silent.mp4", "")?;
    assert_eq!(FileManager::find_subtitle_for_video(&video), None);
    Ok(())
}

/// Test recursive video discovery
#[test]
fn test_find_videos_withNestedDirectories_shouldReturnSortedVideos() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    FileManager::ensure_dir(&nested)?;

    let b = common::create_test_file(temp_dir.path(), "b.MKV", "")?;
    let a = common::create_test_file(&nested, "a.mp4", "")?;
    common::create_test_file(temp_dir.path(), "b.srt", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;

    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(FileManager::find_videos(temp_dir.path())?, expected);
    Ok(())
}

/// Test file type detection by extension and by content
#[test]
fn test_detect_file_type_withVariousFiles_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    let video = common::create_test_file(temp_dir.path(), "a.webm", "")?;
    let disguised = common::create_test_file(temp_dir.path(), "captions.txt", "1\n00:00:01,000 --> 00:00:02,000\nHi\n")?;
    let notes = common::create_test_file(temp_dir.path(), "notes.txt", "nothing timed here")?;

    assert_eq!(FileManager::detect_file_type(&srt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&video)?, FileType::Video);
    assert_eq!(FileManager::detect_file_type(&disguised)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&notes)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.mp4")).is_err());
    Ok(())
}

/// Test writing into a directory that does not exist yet
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("deep").join("file.txt");

    FileManager::write_to_file(&path, "content")?;
    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(path.parent().unwrap()));
    assert_eq!(FileManager::read_to_string(&path)?, "content");
    Ok(())
}
