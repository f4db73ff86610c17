use once_cell::sync::Lazy;
use regex::Regex;
use log::trace;

use crate::errors::SummaryError;
use crate::language_utils::SummaryLanguage;
use crate::subtitle_processor::SubtitleEntry;
use crate::summarizer::{LsaSummarizer, Summarizer};
use super::framer::{AnnotatedText, frame_entries};
use super::time_range::{SummaryRegions, TimeRange};

// @const: Index tag at the very start of a framed sentence
static INDEX_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\((\d+)\)(?:\s|$)").expect("index tag regex is valid")
});

/// Runs a summarizer over framed subtitles and maps its picks back to time
pub struct SummarizationAdapter<'a> {
    summarizer: &'a dyn Summarizer,
    entries: &'a [SubtitleEntry],
    annotated: AnnotatedText,
}

impl<'a> SummarizationAdapter<'a> {
    pub fn new(summarizer: &'a dyn Summarizer, entries: &'a [SubtitleEntry]) -> Self {
        SummarizationAdapter {
            summarizer,
            entries,
            annotated: frame_entries(entries),
        }
    }

    pub fn entries(&self) -> &[SubtitleEntry] {
        self.entries
    }

    pub fn annotated(&self) -> &AnnotatedText {
        &self.annotated
    }

    /// Number of sentences the summarizer can choose from
    pub fn sentence_count(&self) -> usize {
        self.annotated.len()
    }

    pub fn summarizer_name(&self) -> &'static str {
        self.summarizer.name()
    }

    /// Select `sentence_count` sentences and return their time ranges in emission order
    pub fn summarize(&self, sentence_count: usize) -> Result<SummaryRegions, SummaryError> {
        let picked = self.summarizer.summarize(self.annotated.as_str(), sentence_count)?;

        picked
            .iter()
            .map(|sentence| {
                let index = self.recover_index(sentence)?;
                trace!("Selected entry {}: {}", index, sentence);
                Ok(TimeRange::from_entry(&self.entries[index]))
            })
            .collect()
    }

    /// Read the entry index back from a sentence's leading tag
    pub fn recover_index(&self, sentence: &str) -> Result<usize, SummaryError> {
        let index = INDEX_TAG
            .captures(sentence.trim_start())
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .ok_or_else(|| SummaryError::IndexRecovery {
                sentence: sentence.to_string(),
            })?;

        if index >= self.entries.len() {
            return Err(SummaryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        if !self.annotated.contains_index(index) {
            return Err(SummaryError::IndexRecovery {
                sentence: sentence.to_string(),
            });
        }

        Ok(index)
    }
}

/// Summarize with the built-in LSA summarizer for `language`
pub fn summarize(
    entries: &[SubtitleEntry],
    sentence_count: usize,
    language: SummaryLanguage,
) -> Result<SummaryRegions, SummaryError> {
    let summarizer = LsaSummarizer::new(language);
    SummarizationAdapter::new(&summarizer, entries).summarize(sentence_count)
}
