use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::Stemmer;

use crate::language_utils::SummaryLanguage;
use super::stop_words;

// @module: Sentence/word segmentation, stemming and stop-word filtering

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence boundary regex is valid")
});

static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w']+").expect("word regex is valid")
});

// @struct: Language-specific text tokenizer
pub struct Tokenizer {
    language: SummaryLanguage,
    stemmer: Stemmer,
    stop_words: HashSet<&'static str>,
}

impl Tokenizer {
    pub fn new(language: SummaryLanguage) -> Self {
        Tokenizer {
            language,
            stemmer: Stemmer::create(language.stemmer_algorithm()),
            stop_words: stop_words::for_language(language).iter().copied().collect(),
        }
    }

    pub fn language(&self) -> SummaryLanguage {
        self.language
    }

    /// Split text into trimmed, non-empty sentences without their terminators
    pub fn sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_BOUNDARY
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Lowercased word tokens; purely numeric tokens are dropped
    pub fn words(&self, sentence: &str) -> Vec<String> {
        WORD.find_iter(sentence)
            .map(|m| m.as_str().trim_matches('\'').to_lowercase())
            .filter(|w| !w.is_empty() && !w.chars().all(|c| c.is_ascii_digit()))
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    /// Stemmed content words of a sentence, in order, duplicates kept
    pub fn content_terms(&self, sentence: &str) -> Vec<String> {
        self.words(sentence)
            .into_iter()
            .filter(|w| !self.is_stop_word(w))
            .map(|w| self.stem(&w))
            .collect()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("language", &self.language)
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}
