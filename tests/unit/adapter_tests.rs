/*!
 * Tests for the summarization adapter
 */

use vidsum::errors::SummaryError;
use vidsum::language_utils::SummaryLanguage;
use vidsum::subtitle_processor::SubtitleEntry;
use vidsum::summarizer::mock::MockSummarizer;
use vidsum::summary::{SummarizationAdapter, TimeRange, summarize};
use crate::common;

/// Test that exactly n regions come back, each from a distinct entry
#[test]
fn test_summarize_withInOrderMock_shouldReturnExactlyN() {
    let entries = common::uniform_entries(5, 2);
    let mock = MockSummarizer::in_order();
    let adapter = SummarizationAdapter::new(&mock, &entries);

    let regions = adapter.summarize(3).unwrap();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions.as_slice(), &[
        TimeRange { start: 0.0, end: 2.0 },
        TimeRange { start: 2.0, end: 4.0 },
        TimeRange { start: 4.0, end: 6.0 },
    ]);
    assert_eq!(mock.calls(), 1);
}

/// Test that regions follow summarizer emission order, not time order
#[test]
fn test_summarize_withRankedMock_shouldKeepEmissionOrder() {
    let entries = common::uniform_entries(4, 1);
    let mock = MockSummarizer::ranked(vec![3, 0, 2, 1]);
    let adapter = SummarizationAdapter::new(&mock, &entries);

    let regions = adapter.summarize(2).unwrap();
    assert_eq!(regions.as_slice(), &[
        TimeRange { start: 3.0, end: 4.0 },
        TimeRange { start: 0.0, end: 1.0 },
    ]);
}

/// Test that sentence positions map back through the index tag when non-speech entries are skipped
#[test]
fn test_summarize_withNonSpeechGaps_shouldMapToOriginalEntries() {
    let entries = vec![
        SubtitleEntry::from_millis(0, 0, 1000, "[Music]"),
        SubtitleEntry::from_millis(1, 1000, 3000, "First words"),
        SubtitleEntry::from_millis(2, 3000, 4000, "[Laughter]"),
        SubtitleEntry::from_millis(3, 4000, 7000, "Second words"),
    ];
    let mock = MockSummarizer::in_order();
    let adapter = SummarizationAdapter::new(&mock, &entries);

    assert_eq!(adapter.sentence_count(), 2);
    let regions = adapter.summarize(2).unwrap();
    assert_eq!(regions.as_slice(), &[
        TimeRange { start: 1.0, end: 3.0 },
        TimeRange { start: 4.0, end: 7.0 },
    ]);
}

/// Test that untagged output fails without partial regions
#[test]
fn test_summarize_withUntaggedOutput_shouldReturnIndexRecovery() {
    let entries = common::uniform_entries(3, 1);
    let mock = MockSummarizer::untagged();
    let adapter = SummarizationAdapter::new(&mock, &entries);

    match adapter.summarize(2) {
        Err(SummaryError::IndexRecovery { sentence }) => assert!(sentence.starts_with("Line number 0")),
        other => panic!("expected IndexRecovery, got {:?}", other),
    }
}

/// Test an index beyond the loaded entries
#[test]
fn test_summarize_withUnknownIndex_shouldReturnIndexOutOfRange() {
    let entries = common::uniform_entries(3, 1);
    let mock = MockSummarizer::foreign_tag(99);
    let adapter = SummarizationAdapter::new(&mock, &entries);

    assert!(matches!(adapter.summarize(1), Err(SummaryError::IndexOutOfRange { index: 99, len: 3 })));
}

/// Test an index that exists but was never framed
#[test]
fn test_summarize_withNonSpeechIndex_shouldReturnIndexRecovery() {
    let entries = vec![
        SubtitleEntry::from_millis(0, 0, 1000, "Words"),
        SubtitleEntry::from_millis(1, 1000, 2000, "[Music]"),
    ];
    let mock = MockSummarizer::foreign_tag(1);
    let adapter = SummarizationAdapter::new(&mock, &entries);

    assert!(matches!(adapter.summarize(1), Err(SummaryError::IndexRecovery { .. })));
}

/// Test strict tag matching
#[test]
fn test_recover_index_withMalformedTags_shouldReject() {
    let entries = common::uniform_entries(20, 1);
    let mock = MockSummarizer::in_order();
    let adapter = SummarizationAdapter::new(&mock, &entries);

    assert_eq!(adapter.recover_index("(12) text").unwrap(), 12);
    assert!(adapter.recover_index("text (12) later").is_err());
    assert!(adapter.recover_index("(12)text").is_err());
    assert!(adapter.recover_index("[12] text").is_err());
    assert!(adapter.recover_index("(-1) text").is_err());
}

/// Test the convenience function with the built-in summarizer
#[test]
fn test_summarize_function_withLsa_shouldReturnRegions() {
    let entries = common::uniform_entries(6, 2);
    let regions = summarize(&entries, 4, SummaryLanguage::English).unwrap();

    assert_eq!(regions.len(), 4);
    assert_eq!(regions.total_duration(), 8.0);
}
