/*!
 * Statistical summarizers.
 *
 * A summarizer receives plain text and returns the sentences it ranks highest.
 * The rest of the pipeline treats it as an opaque ranking oracle:
 * - `lsa`: latent semantic analysis ranking (default)
 * - `mock`: scripted behaviors for tests
 *
 * Tokenization, stemming and stop-words are shared through `tokenizer`.
 */

use std::fmt::Debug;

use crate::errors::SummaryError;

/// Common trait for extractive summarizers
///
/// Implementations must return sentences verbatim as they appear in the input
/// (minus the sentence terminator), so callers can trace them back to their source.
pub trait Summarizer: Send + Sync + Debug {
    /// Select up to `sentence_count` top-ranked sentences from `text`
    ///
    /// # Arguments
    /// * `text` - Input text, sentences terminated by `.`, `?` or `!`
    /// * `sentence_count` - Number of sentences to extract
    ///
    /// # Returns
    /// * `Result<Vec<String>, SummaryError>` - Selected sentences in emission order
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<Vec<String>, SummaryError>;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

pub mod tokenizer;
pub mod stop_words;
pub mod lsa;
pub mod mock;

pub use lsa::LsaSummarizer;
pub use tokenizer::Tokenizer;
