/*!
 * Error types for the vidsum application.
 *
 * This module contains custom error types for the different stages of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a subtitle track
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The subtitle file does not exist
    #[error("Subtitle file not found: {0}")]
    NotFound(PathBuf),

    /// The subtitle file exists but could not be read
    #[error("Failed to read subtitle file {path}: {source}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The content could not be decoded or parsed as timed text
    #[error("Unparsable subtitle file {path}: {reason}")]
    Unparsable {
        /// Path of the file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The file parsed but yielded no entries
    #[error("Subtitle file contains no entries: {0}")]
    Empty(PathBuf),

    /// A download produced a video without any subtitle track
    #[error("No subtitle track available for {source_name}. Please provide the url of a video with subtitles")]
    NoSubtitleTrack {
        /// URL or file the track was expected for
        source_name: String,
    },
}

/// Why the duration convergence loop gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonConvergenceReason {
    /// Decrementing the sentence budget would reach zero
    BudgetFloor,
    /// Every framed sentence is already selected and the target is still not reached
    Saturated,
    /// A step moved the selected duration away from the target
    NonMonotonic,
    /// The configured maximum number of adjustments was exceeded
    IterationLimit,
}

impl fmt::Display for NonConvergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::BudgetFloor => "sentence budget cannot go below one",
            Self::Saturated => "all sentences are already selected",
            Self::NonMonotonic => "selected duration is not monotonic in the sentence budget",
            Self::IterationLimit => "iteration limit reached",
        };
        f.write_str(text)
    }
}

/// Errors produced by the summarization core
#[derive(Error, Debug)]
pub enum SummaryError {
    /// No entries (or no speech entries) to average over
    #[error("Cannot compute average subtitle duration: no usable subtitle entries")]
    DivisionByZero,

    /// A summarizer sentence carried no valid index tag
    #[error("Could not recover subtitle index from sentence: {sentence:?}")]
    IndexRecovery {
        /// The offending sentence as returned by the summarizer
        sentence: String,
    },

    /// A recovered index does not point at any loaded entry
    #[error("Recovered subtitle index {index} is out of range ({len} entries)")]
    IndexOutOfRange {
        /// The recovered index
        index: usize,
        /// Number of loaded entries
        len: usize,
    },

    /// The convergence loop could not settle on a sentence budget
    #[error("Summary duration did not converge ({reason}): budget {budget}, selected {total:.3}s, target {target:.3}s")]
    NonConvergence {
        /// Why the loop stopped
        reason: NonConvergenceReason,
        /// Budget at the time of failure
        budget: usize,
        /// Selected duration at the time of failure
        total: f64,
        /// Requested duration
        target: f64,
    },

    /// The requested duration is not a positive number
    #[error("Invalid target duration: {0}")]
    InvalidTarget(f64),

    /// No tokenizer/stemmer is available for the language
    #[error("Unsupported summary language: {0}")]
    UnsupportedLanguage(String),
}

/// Errors raised by the external media tools
#[derive(Error, Debug)]
pub enum MediaError {
    /// A required executable is not installed
    #[error("Required tool not found: {tool}")]
    ToolNotFound {
        /// Executable name
        tool: String,
    },

    /// A tool ran and exited unsuccessfully
    #[error("{tool} failed: {message}")]
    CommandFailed {
        /// Executable name
        tool: String,
        /// Filtered stderr output
        message: String,
    },

    /// A tool did not finish in time
    #[error("{tool} timed out after {secs} seconds")]
    Timeout {
        /// Executable name
        tool: String,
        /// Timeout that elapsed
        secs: u64,
    },

    /// The input is not an http(s) URL
    #[error("Invalid media URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// There is nothing to cut
    #[error("No time ranges to render")]
    NothingToRender,

    /// Error from a file operation
    #[error("Media I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while running isolated render jobs
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker process could not be started
    #[error("Failed to spawn render worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The task supervising the worker panicked or was cancelled
    #[error("Render worker task failed: {0}")]
    Join(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while loading subtitles
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the summarization core
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Error from ffmpeg or yt-dlp
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Error from the render worker
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
