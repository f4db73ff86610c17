/*!
 * Latent semantic analysis summarizer.
 *
 * Sentences are columns of a term/sentence matrix of smoothed term frequencies.
 * A sentence's rating is the length of its projection onto the leading singular
 * dimensions, weighted by the squared singular values:
 *
 *   rating(j) = sqrt( sum_i sigma_i^2 * v_ij^2 )   for i < dimensions
 *
 * The top-rated sentences are emitted in document order.
 */

use std::collections::HashMap;

use log::debug;

use crate::errors::SummaryError;
use crate::language_utils::SummaryLanguage;
use super::{Summarizer, Tokenizer};

// @const: Weight given to any term present in a sentence, before frequency scaling
const SMOOTHING: f64 = 0.4;

// @const: Lower bound on the number of singular dimensions kept
pub const DEFAULT_MIN_DIMENSIONS: usize = 3;

// @const: Fraction of singular dimensions kept
pub const DEFAULT_REDUCTION_RATIO: f64 = 1.0;

const POWER_ITERATIONS: usize = 200;
const POWER_TOLERANCE: f64 = 1e-10;

/// Sparse column: (term id, weight)
type Column = Vec<(usize, f64)>;

#[derive(Debug)]
pub struct LsaSummarizer {
    tokenizer: Tokenizer,
    reduction_ratio: f64,
    min_dimensions: usize,
}

impl LsaSummarizer {
    pub fn new(language: SummaryLanguage) -> Self {
        LsaSummarizer {
            tokenizer: Tokenizer::new(language),
            reduction_ratio: DEFAULT_REDUCTION_RATIO,
            min_dimensions: DEFAULT_MIN_DIMENSIONS,
        }
    }

    /// Keep only `ratio` of the singular dimensions (at least `min_dimensions`)
    pub fn with_reduction(mut self, ratio: f64, min_dimensions: usize) -> Self {
        self.reduction_ratio = ratio.clamp(0.0, 1.0);
        self.min_dimensions = min_dimensions.max(1);
        self
    }

    pub fn language(&self) -> SummaryLanguage {
        self.tokenizer.language()
    }

    /// Rate every sentence; an empty vector means no sentence has a content word
    pub fn rate_sentences(&self, sentences: &[String]) -> Vec<f64> {
        let (columns, term_count) = self.build_matrix(sentences);
        if term_count == 0 {
            return Vec::new();
        }

        let rank = term_count.min(sentences.len());
        let dimensions = self.min_dimensions.max((rank as f64 * self.reduction_ratio) as usize);

        if dimensions >= rank {
            // All singular dimensions kept: the rating equals the column norm
            return columns
                .iter()
                .map(|col| col.iter().map(|(_, w)| w * w).sum::<f64>().sqrt())
                .collect();
        }

        let pairs = top_eigenpairs(&columns, term_count, dimensions);
        (0..sentences.len())
            .map(|j| {
                pairs
                    .iter()
                    .map(|(sigma_sq, v)| sigma_sq * v[j] * v[j])
                    .sum::<f64>()
                    .sqrt()
            })
            .collect()
    }

    /// Term/sentence matrix with smoothed, per-sentence normalized frequencies
    fn build_matrix(&self, sentences: &[String]) -> (Vec<Column>, usize) {
        let mut dictionary: HashMap<String, usize> = HashMap::new();
        let mut columns = Vec::with_capacity(sentences.len());

        for sentence in sentences {
            let mut counts: HashMap<usize, f64> = HashMap::new();
            for term in self.tokenizer.content_terms(sentence) {
                let next_id = dictionary.len();
                let id = *dictionary.entry(term).or_insert(next_id);
                *counts.entry(id).or_insert(0.0) += 1.0;
            }

            let max = counts.values().cloned().fold(0.0, f64::max);
            let mut column: Column = counts
                .into_iter()
                .map(|(id, count)| (id, SMOOTHING + (1.0 - SMOOTHING) * count / max))
                .collect();
            column.sort_by_key(|(id, _)| *id);
            columns.push(column);
        }

        (columns, dictionary.len())
    }
}

impl Summarizer for LsaSummarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<Vec<String>, SummaryError> {
        let sentences = self.tokenizer.sentences(text);
        let ratings = self.rate_sentences(&sentences);

        if ratings.is_empty() {
            debug!("LSA: no content words in {} sentences", sentences.len());
            return Ok(Vec::new());
        }

        let mut order: Vec<usize> = (0..sentences.len()).collect();
        // Stable sort: equal ratings keep document order
        order.sort_by(|a, b| ratings[*b].total_cmp(&ratings[*a]));
        order.truncate(sentence_count);
        order.sort_unstable();

        Ok(order.into_iter().map(|i| sentences[i].clone()).collect())
    }

    fn name(&self) -> &'static str {
        "lsa"
    }
}

/// Leading eigenpairs (sigma^2, right singular vector) of A^T A by power iteration
/// with deflation, without materializing A^T A
fn top_eigenpairs(columns: &[Column], term_count: usize, k: usize) -> Vec<(f64, Vec<f64>)> {
    let n = columns.len();
    let apply = |v: &[f64]| -> Vec<f64> {
        let mut u = vec![0.0; term_count];
        for (j, col) in columns.iter().enumerate() {
            for &(t, w) in col {
                u[t] += w * v[j];
            }
        }
        columns
            .iter()
            .map(|col| col.iter().map(|&(t, w)| w * u[t]).sum())
            .collect()
    };

    let mut found: Vec<(f64, Vec<f64>)> = Vec::with_capacity(k);
    for _ in 0..k {
        let mut v: Vec<f64> = (0..n).map(|j| 0.5 + ((j * 7919) % 101) as f64 / 101.0).collect();
        orthogonalize(&mut v, &found);
        if normalize(&mut v) == 0.0 {
            break;
        }

        for _ in 0..POWER_ITERATIONS {
            let mut w = apply(&v);
            orthogonalize(&mut w, &found);
            if normalize(&mut w) == 0.0 {
                v = w;
                break;
            }
            let delta: f64 = w.iter().zip(&v).map(|(a, b)| (a - b).abs()).sum();
            v = w;
            if delta < POWER_TOLERANCE {
                break;
            }
        }

        let av = apply(&v);
        let sigma_sq: f64 = v.iter().zip(&av).map(|(a, b)| a * b).sum();
        found.push((sigma_sq.max(0.0), v));
    }

    found
}

fn orthogonalize(v: &mut [f64], basis: &[(f64, Vec<f64>)]) {
    for (_, b) in basis {
        let dot: f64 = v.iter().zip(b).map(|(x, y)| x * y).sum();
        for (x, y) in v.iter_mut().zip(b) {
            *x -= dot * y;
        }
    }
}

fn normalize(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        v.iter_mut().for_each(|x| *x /= norm);
        norm
    } else {
        v.iter_mut().for_each(|x| *x = 0.0);
        0.0
    }
}
