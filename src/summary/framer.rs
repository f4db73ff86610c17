use std::collections::HashMap;

use crate::subtitle_processor::SubtitleEntry;

// @module: Annotated text framing

// @struct: One framed sentence and the entry it came from
#[derive(Debug, Clone, PartialEq)]
pub struct FramedSentence {
    pub index: usize,
    /// "(<index>) <cleaned text>", without the terminator
    pub sentence: String,
}

/// Text handed to the summarizer, plus the index side channel
#[derive(Debug, Clone, Default)]
pub struct AnnotatedText {
    text: String,
    sentences: Vec<FramedSentence>,
    positions: HashMap<usize, usize>,
}

impl AnnotatedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[FramedSentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Whether an entry index was framed (non-speech entries never are)
    pub fn contains_index(&self, index: usize) -> bool {
        self.positions.contains_key(&index)
    }

    pub fn sentence_for(&self, index: usize) -> Option<&FramedSentence> {
        self.positions.get(&index).map(|&pos| &self.sentences[pos])
    }
}

/// Strip what would confuse sentence segmentation: line breaks, ellipses and
/// every `.`, `?` or `!`
///
/// Lines are joined with a single space rather than concatenated, so
/// "end of\nline" stays two words instead of becoming "end ofline".
pub fn clean_text(text: &str) -> String {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    joined
        .trim_matches('.')
        .chars()
        .filter(|c| !matches!(c, '.' | '?' | '!'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Frame entries as "(<index>) <text>. " fragments, skipping non-speech entries
pub fn frame_entries(entries: &[SubtitleEntry]) -> AnnotatedText {
    let mut framed = AnnotatedText::default();

    for entry in entries {
        if entry.is_non_speech() {
            continue;
        }

        let cleaned = clean_text(&entry.text);
        // "..." alone cleans to nothing and would leave a bare tag
        if cleaned.is_empty() {
            continue;
        }

        let sentence = format!("({}) {}", entry.index, cleaned);
        framed.text.push_str(&sentence);
        framed.text.push_str(". ");

        framed.positions.insert(entry.index, framed.sentences.len());
        framed.sentences.push(FramedSentence {
            index: entry.index,
            sentence,
        });
    }

    framed
}
