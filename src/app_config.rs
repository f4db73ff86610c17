use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils::SummaryLanguage;
use crate::summary::ConvergencePolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Summary language, English name or ISO 639 code
    #[serde(default = "default_language")]
    pub language: String,

    /// Summarization settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Clip extraction settings
    #[serde(default)]
    pub video: VideoConfig,

    /// URL download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Render worker settings
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Summarization and convergence settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummaryConfig {
    // @field: Requested summary length in seconds
    #[serde(default = "default_target_duration_secs")]
    pub target_duration_secs: f64,

    // @field: Cap on sentence budget adjustments
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    // @field: Fraction of LSA dimensions kept (0 < ratio <= 1)
    #[serde(default = "default_reduction_ratio")]
    pub reduction_ratio: f64,

    // @field: Lower bound on kept LSA dimensions
    #[serde(default = "default_min_dimensions")]
    pub min_dimensions: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            target_duration_secs: default_target_duration_secs(),
            max_iterations: default_max_iterations(),
            reduction_ratio: default_reduction_ratio(),
            min_dimensions: default_min_dimensions(),
        }
    }
}

impl SummaryConfig {
    // @returns: Convergence limits derived from this section
    pub fn policy(&self) -> ConvergencePolicy {
        ConvergencePolicy {
            max_iterations: self.max_iterations,
        }
    }
}

/// ffmpeg settings for cutting and joining clips
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoConfig {
    // @field: ffmpeg executable name or path
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    // @field: Encoder for cut clips
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    // @field: Audio encoder for cut clips
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    // @field: Appended to the input stem to name the output
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    // @field: Timeout for a single ffmpeg run
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            output_suffix: default_output_suffix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// yt-dlp settings for URL inputs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DownloadConfig {
    // @field: yt-dlp executable name or path
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    // @field: yt-dlp format selector
    #[serde(default = "default_format")]
    pub format: String,

    // @field: Subtitle languages requested, in preference order
    #[serde(default = "default_subtitle_languages")]
    pub subtitle_languages: Vec<String>,

    // @field: yt-dlp output template, relative to the download directory
    #[serde(default = "default_output_template")]
    pub output_template: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            format: default_format(),
            subtitle_languages: default_subtitle_languages(),
            output_template: default_output_template(),
        }
    }
}

/// Render worker settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorkerConfig {
    // @field: Run each render in a child process
    #[serde(default = "default_true")]
    pub isolate: bool,

    // @field: Concurrent child processes when processing a folder
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            isolate: true,
            max_workers: default_max_workers(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "english".to_string()
}

fn default_target_duration_secs() -> f64 {
    60.0
}

fn default_max_iterations() -> usize {
    crate::summary::convergence::DEFAULT_MAX_ITERATIONS
}

fn default_reduction_ratio() -> f64 {
    crate::summarizer::lsa::DEFAULT_REDUCTION_RATIO
}

fn default_min_dimensions() -> usize {
    crate::summarizer::lsa::DEFAULT_MIN_DIMENSIONS
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_output_suffix() -> String {
    "_1".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_format() -> String {
    "best".to_string()
}

fn default_subtitle_languages() -> Vec<String> {
    vec!["en-GB".to_string()]
}

fn default_output_template() -> String {
    "%(title)s.%(ext)s".to_string()
}

fn default_max_workers() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.summary_language()?;

        let summary = &self.summary;
        if !summary.target_duration_secs.is_finite() || summary.target_duration_secs <= 0.0 {
            return Err(anyhow!(
                "Target duration must be a positive number of seconds, got {}",
                summary.target_duration_secs
            ));
        }
        if summary.max_iterations == 0 {
            return Err(anyhow!("max_iterations must be at least 1"));
        }
        if !(summary.reduction_ratio > 0.0 && summary.reduction_ratio <= 1.0) {
            return Err(anyhow!(
                "reduction_ratio must be in (0, 1], got {}",
                summary.reduction_ratio
            ));
        }
        if summary.min_dimensions == 0 {
            return Err(anyhow!("min_dimensions must be at least 1"));
        }

        let video = &self.video;
        if video.ffmpeg_path.trim().is_empty() {
            return Err(anyhow!("ffmpeg_path must not be empty"));
        }
        if video.video_codec.trim().is_empty() || video.audio_codec.trim().is_empty() {
            return Err(anyhow!("Video and audio codecs must not be empty"));
        }
        // An empty suffix would write the summary over its own input
        if video.output_suffix.is_empty() {
            return Err(anyhow!("output_suffix must not be empty"));
        }
        if video.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be at least 1"));
        }

        if self.download.subtitle_languages.is_empty() {
            return Err(anyhow!("At least one subtitle language must be requested for downloads"));
        }

        if self.worker.max_workers == 0 {
            return Err(anyhow!("max_workers must be at least 1"));
        }

        Ok(())
    }

    // @returns: Resolved summary language
    pub fn summary_language(&self) -> Result<SummaryLanguage> {
        SummaryLanguage::resolve(&self.language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            summary: SummaryConfig::default(),
            video: VideoConfig::default(),
            download: DownloadConfig::default(),
            worker: WorkerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load `path`, or write and return the defaults when it does not exist
    ///
    /// # Returns
    /// * `Result<(Config, bool)>` - The configuration and whether it was just created
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Config, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok((config, true))
    }
}
