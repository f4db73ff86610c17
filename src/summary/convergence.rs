/*!
 * Duration convergence.
 *
 * Starting from an estimate based on the average entry duration, the sentence
 * budget moves by one in a single direction until the selected duration meets
 * or crosses the target. The first budget that crosses wins, even when a
 * neighbour would be closer to the target.
 */

use log::{debug, info};
use serde::Serialize;

use crate::errors::{NonConvergenceReason, SummaryError};
use crate::language_utils::SummaryLanguage;
use crate::subtitle_processor::SubtitleEntry;
use crate::summarizer::LsaSummarizer;
use super::adapter::SummarizationAdapter;
use super::time_range::{SummaryRegions, TimeRange, total_duration};

// @const: Default cap on budget adjustments
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Limits applied to the adjustment loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergencePolicy {
    /// Maximum number of budget adjustments after the initial estimate
    pub max_iterations: usize,
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Final state of a convergence run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergedSummary {
    /// Budget the loop stopped at
    pub budget: usize,
    /// Number of adjustments made after the initial estimate
    pub iterations: usize,
    /// Selected duration in seconds
    pub total_duration: f64,
    /// Requested duration in seconds
    pub target_duration: f64,
    /// Selected ranges, in summarizer emission order
    pub regions: SummaryRegions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Drives a `SummarizationAdapter` towards a target duration
pub struct DurationController<'a> {
    adapter: SummarizationAdapter<'a>,
    policy: ConvergencePolicy,
}

impl<'a> DurationController<'a> {
    pub fn new(adapter: SummarizationAdapter<'a>, policy: ConvergencePolicy) -> Self {
        DurationController { adapter, policy }
    }

    pub fn adapter(&self) -> &SummarizationAdapter<'a> {
        &self.adapter
    }

    /// Mean duration over every loaded entry, non-speech entries included
    pub fn average_entry_duration(&self) -> Result<f64, SummaryError> {
        let entries = self.adapter.entries();
        if entries.is_empty() || self.adapter.sentence_count() == 0 {
            return Err(SummaryError::DivisionByZero);
        }

        let total = total_duration(&entries.iter().map(TimeRange::from_entry).collect::<Vec<_>>());
        let average = total / entries.len() as f64;
        if average <= 0.0 || !average.is_finite() {
            return Err(SummaryError::DivisionByZero);
        }

        Ok(average)
    }

    /// `floor(target / average)`, clamped to `1..=sentence_count`
    ///
    /// The average includes non-speech entries, so the estimate can exceed the
    /// number of framed sentences; budgets above that count select the same text.
    pub fn initial_budget(&self, target: f64) -> Result<usize, SummaryError> {
        Self::check_target(target)?;
        let average = self.average_entry_duration()?;
        let estimate = (target / average).floor() as usize;
        Ok(estimate.clamp(1, self.adapter.sentence_count()))
    }

    pub fn converge(&self, target: f64) -> Result<ConvergedSummary, SummaryError> {
        self.converge_with_progress(target, |_, _| {})
    }

    /// Like `converge`, calling `on_step(budget, total)` after every summarizer run
    pub fn converge_with_progress<F>(&self, target: f64, mut on_step: F) -> Result<ConvergedSummary, SummaryError>
    where
        F: FnMut(usize, f64),
    {
        let mut budget = self.initial_budget(target)?;
        let mut regions = self.adapter.summarize(budget)?;
        let mut total = regions.total_duration();
        on_step(budget, total);

        debug!(
            "Initial budget {} selects {:.3}s of {:.3}s target ({} sentences available)",
            budget, total, target, self.adapter.sentence_count()
        );

        let direction = if total < target {
            Direction::Up
        } else {
            Direction::Down
        };

        let mut iterations = 0;
        while Self::needs_adjustment(direction, total, target) {
            let fail = |reason| SummaryError::NonConvergence { reason, budget, total, target };

            if iterations >= self.policy.max_iterations {
                return Err(fail(NonConvergenceReason::IterationLimit));
            }

            budget = match direction {
                Direction::Up if budget >= self.adapter.sentence_count() => {
                    return Err(fail(NonConvergenceReason::Saturated));
                }
                Direction::Up => budget + 1,
                Direction::Down if budget <= 1 => {
                    return Err(fail(NonConvergenceReason::BudgetFloor));
                }
                Direction::Down => budget - 1,
            };
            iterations += 1;

            let previous = total;
            regions = self.adapter.summarize(budget)?;
            total = regions.total_duration();
            on_step(budget, total);
            debug!("Budget {} selects {:.3}s (target {:.3}s)", budget, total, target);

            let moved_backwards = match direction {
                Direction::Up => total < previous,
                Direction::Down => total > previous,
            };
            if moved_backwards {
                return Err(SummaryError::NonConvergence {
                    reason: NonConvergenceReason::NonMonotonic,
                    budget,
                    total,
                    target,
                });
            }
        }

        info!(
            "Selected {} subtitle ranges, {:.1}s for a {:.1}s target",
            regions.len(), total, target
        );

        Ok(ConvergedSummary {
            budget,
            iterations,
            total_duration: total,
            target_duration: target,
            regions,
        })
    }

    fn needs_adjustment(direction: Direction, total: f64, target: f64) -> bool {
        match direction {
            Direction::Up => total < target,
            Direction::Down => total > target,
        }
    }

    fn check_target(target: f64) -> Result<(), SummaryError> {
        if target.is_finite() && target > 0.0 {
            Ok(())
        } else {
            Err(SummaryError::InvalidTarget(target))
        }
    }
}

/// Converge with the built-in LSA summarizer
pub fn find_summary_regions(
    entries: &[SubtitleEntry],
    target: f64,
    language: SummaryLanguage,
    policy: ConvergencePolicy,
) -> Result<ConvergedSummary, SummaryError> {
    let summarizer = LsaSummarizer::new(language);
    let adapter = SummarizationAdapter::new(&summarizer, entries);
    DurationController::new(adapter, policy).converge(target)
}
