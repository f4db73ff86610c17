/*!
 * Integration tests from subtitle file to converged summary regions
 */

use anyhow::Result;
use vidsum::language_utils::SummaryLanguage;
use vidsum::subtitle_processor::SubtitleCollection;
use vidsum::summarizer::LsaSummarizer;
use vidsum::summary::{ConvergencePolicy, DurationController, SummarizationAdapter, find_summary_regions};
use crate::common;

/// Test load, converge and region ordering on a realistic transcript
#[test]
fn test_workflow_withLectureFile_shouldSelectTargetDuration() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_lecture_subtitle(temp_dir.path(), "lecture.srt")?;
    let collection = SubtitleCollection::load(&path)?;

    let result = find_summary_regions(&collection.entries, 16.0, SummaryLanguage::English, ConvergencePolicy::default())?;

    // avg 3s: 5 sentences give 15s, 6 give 18s
    assert_eq!(result.budget, 6);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.total_duration, 18.0);

    // LSA emits in document order, so the ranges come out sorted and distinct
    let starts: Vec<f64> = result.regions.iter().map(|r| r.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    assert_eq!(starts, sorted);
    Ok(())
}

/// Test that bracketed cues are counted in the average but never selected
#[test]
fn test_workflow_withNonSpeechCues_shouldNeverSelectThem() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let mut lines: Vec<&str> = common::LECTURE_LINES.to_vec();
    lines.insert(0, "[Music]");
    lines.insert(5, "[Applause]");
    let path = common::create_test_file(temp_dir.path(), "mixed.srt", &common::srt_from_lines(&lines, 2))?;
    let collection = SubtitleCollection::load(&path)?;
    assert_eq!(collection.speech_entry_count(), 10);

    let summarizer = LsaSummarizer::new(SummaryLanguage::English);
    let adapter = SummarizationAdapter::new(&summarizer, &collection.entries);
    let result = DurationController::new(adapter, ConvergencePolicy::default()).converge(10.0)?;

    assert_eq!(result.total_duration, 10.0);
    for region in &result.regions {
        assert_ne!(region.start, 0.0, "[Music] was selected");
        assert_ne!(region.start, 10.0, "[Applause] was selected");
    }
    Ok(())
}

/// Test the JSON shape printed by the regions command
#[test]
fn test_workflow_regionsJson_shouldSerializeRangesAsArray() -> Result<()> {
    let entries = common::uniform_entries(6, 2);
    let result = find_summary_regions(&entries, 4.0, SummaryLanguage::English, ConvergencePolicy::default())?;

    let json: serde_json::Value = serde_json::to_value(&result)?;
    assert_eq!(json["budget"], 2);
    assert_eq!(json["target_duration"], 4.0);
    let regions = json["regions"].as_array().expect("regions is an array");
    assert_eq!(regions.len(), 2);
    assert!(regions[0]["start"].is_number());
    assert!(regions[0]["end"].is_number());
    Ok(())
}

/// Test a WebVTT track in another language
#[test]
fn test_workflow_withGermanVtt_shouldConverge() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "WEBVTT\n\n\
        00:00.000 --> 00:04.000\nDer Speicher wird vom Compiler geprüft.\n\n\
        00:04.000 --> 00:08.000\nDie Eigentümerschaft regelt den Speicher.\n\n\
        00:08.000 --> 00:12.000\nJeder Wert hat genau einen Eigentümer.\n\n\
        00:12.000 --> 00:16.000\nReferenzen dürfen ihre Daten nicht überleben.\n";
    let path = common::create_test_file(temp_dir.path(), "vortrag.vtt", content)?;
    let collection = SubtitleCollection::load(&path)?;

    let result = find_summary_regions(&collection.entries, 8.0, SummaryLanguage::German, ConvergencePolicy::default())?;
    assert_eq!(result.budget, 2);
    assert_eq!(result.total_duration, 8.0);
    Ok(())
}
