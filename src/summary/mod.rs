/*!
 * Subtitle-driven summarization core.
 *
 * - `framer`: subtitle entries to index-tagged text
 * - `time_range`: entries to fractional-second intervals
 * - `adapter`: runs a summarizer and maps its sentences back to time ranges
 * - `convergence`: adjusts the sentence budget until the selected duration meets a target
 *
 * Everything here is synchronous and free of I/O.
 */

pub mod framer;
pub mod time_range;
pub mod adapter;
pub mod convergence;

pub use framer::{AnnotatedText, FramedSentence, frame_entries};
pub use time_range::{SummaryRegions, TimeRange, total_duration};
pub use adapter::{SummarizationAdapter, summarize};
pub use convergence::{ConvergedSummary, ConvergencePolicy, DurationController, find_summary_regions};
