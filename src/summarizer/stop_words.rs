use once_cell::sync::Lazy;

use crate::language_utils::SummaryLanguage;

// @module: Bundled stop-word lists, one word per line

fn parse(list: &'static str) -> Vec<&'static str> {
    list.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

static ENGLISH: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/english.txt")));
static FRENCH: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/french.txt")));
static GERMAN: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/german.txt")));
static SPANISH: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/spanish.txt")));
static ITALIAN: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/italian.txt")));
static PORTUGUESE: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/portuguese.txt")));
static DUTCH: Lazy<Vec<&'static str>> = Lazy::new(|| parse(include_str!("stop_words/dutch.txt")));

/// Stop words for a language; empty for languages without a bundled list
pub fn for_language(language: SummaryLanguage) -> &'static [&'static str] {
    match language {
        SummaryLanguage::English => ENGLISH.as_slice(),
        SummaryLanguage::French => FRENCH.as_slice(),
        SummaryLanguage::German => GERMAN.as_slice(),
        SummaryLanguage::Spanish => SPANISH.as_slice(),
        SummaryLanguage::Italian => ITALIAN.as_slice(),
        SummaryLanguage::Portuguese => PORTUGUESE.as_slice(),
        SummaryLanguage::Dutch => DUTCH.as_slice(),
        _ => &[],
    }
}
