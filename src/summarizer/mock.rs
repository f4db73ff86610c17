/*!
 * Mock summarizer implementations for testing.
 *
 * - `MockSummarizer::in_order()` - Returns the first n sentences
 * - `MockSummarizer::ranked(order)` - Returns the top n of a fixed ranking, in ranking order
 * - `MockSummarizer::scripted(f)` - Returns whatever sentence positions `f(n)` lists
 * - `MockSummarizer::untagged()` - Returns sentences with their index tag stripped
 * - `MockSummarizer::foreign_tag(i)` - Returns a sentence tagged with an unknown index
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SummaryError;
use super::Summarizer;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(\d+\) ").expect("tag regex is valid"));

/// Behavior mode for the mock summarizer
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// First n sentences in document order
    InOrder,
    /// First n positions of this ranking, emitted in ranking order
    Ranked(Vec<usize>),
    /// Sentence positions chosen per budget
    Scripted(fn(usize) -> Vec<usize>),
    /// First n sentences without their index tag
    Untagged,
    /// A single sentence carrying this index tag
    ForeignTag(usize),
}

/// Mock summarizer for testing the adapter and the convergence loop
#[derive(Debug)]
pub struct MockSummarizer {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn in_order() -> Self {
        Self::new(MockBehavior::InOrder)
    }

    pub fn ranked(order: Vec<usize>) -> Self {
        Self::new(MockBehavior::Ranked(order))
    }

    pub fn scripted(script: fn(usize) -> Vec<usize>) -> Self {
        Self::new(MockBehavior::Scripted(script))
    }

    pub fn untagged() -> Self {
        Self::new(MockBehavior::Untagged)
    }

    pub fn foreign_tag(index: usize) -> Self {
        Self::new(MockBehavior::ForeignTag(index))
    }

    /// Number of times `summarize` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    // Framed text always ends sentences with ". "
    fn split(text: &str) -> Vec<String> {
        text.split(". ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('.').to_string())
            .collect()
    }
}

impl Summarizer for MockSummarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<Vec<String>, SummaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let sentences = Self::split(text);

        let pick = |positions: &[usize]| -> Vec<String> {
            positions
                .iter()
                .filter_map(|&p| sentences.get(p).cloned())
                .collect()
        };

        let picked = match &self.behavior {
            MockBehavior::InOrder => sentences.iter().take(sentence_count).cloned().collect(),
            MockBehavior::Ranked(order) => {
                let top: Vec<usize> = order.iter().take(sentence_count).copied().collect();
                pick(&top)
            }
            MockBehavior::Scripted(script) => pick(&script(sentence_count)),
            MockBehavior::Untagged => sentences
                .iter()
                .take(sentence_count)
                .map(|s| TAG.replace(s, "").into_owned())
                .collect(),
            MockBehavior::ForeignTag(index) => vec![format!("({}) invented sentence", index)],
        };

        Ok(picked)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
