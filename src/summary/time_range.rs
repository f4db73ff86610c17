use serde::{Deserialize, Serialize};

use crate::subtitle_processor::SubtitleEntry;

// @struct: Interval of video time in fractional seconds, end >= start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Map a subtitle entry to its time range
    pub fn from_entry(entry: &SubtitleEntry) -> Self {
        TimeRange {
            start: entry.start_seconds(),
            end: entry.end_seconds(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl From<&SubtitleEntry> for TimeRange {
    fn from(entry: &SubtitleEntry) -> Self {
        Self::from_entry(entry)
    }
}

/// Sum of range durations; overlaps are counted twice
pub fn total_duration<'a, I>(ranges: I) -> f64
where
    I: IntoIterator<Item = &'a TimeRange>,
{
    ranges.into_iter().map(TimeRange::duration).sum()
}

/// Selected ranges in the order the summarizer emitted their sentences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryRegions(Vec<TimeRange>);

impl SummaryRegions {
    pub fn new(ranges: Vec<TimeRange>) -> Self {
        SummaryRegions(ranges)
    }

    pub fn total_duration(&self) -> f64 {
        total_duration(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeRange> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TimeRange] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<TimeRange> {
        self.0
    }
}

impl FromIterator<TimeRange> for SummaryRegions {
    fn from_iter<T: IntoIterator<Item = TimeRange>>(iter: T) -> Self {
        SummaryRegions(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SummaryRegions {
    type Item = &'a TimeRange;
    type IntoIter = std::slice::Iter<'a, TimeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
