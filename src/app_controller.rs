use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::SummaryError;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils::SummaryLanguage;
use crate::media::{ClipRenderer, FfmpegRenderer, MediaSource, Toolchain, YtDlpSource};
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::summarizer::LsaSummarizer;
use crate::summary::{ConvergedSummary, DurationController, SummarizationAdapter};
use crate::worker::{JobOutcome, RenderJob, WorkerPool};

// @module: Application controller for video summarization

// @struct: Counts reported after a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle-driven summaries
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Resolved summary language
    language: SummaryLanguage,
    // @field: Config file forwarded to render workers
    config_path: Option<PathBuf>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let language = config
            .summary_language()
            .map_err(|_| SummaryError::UnsupportedLanguage(config.language.clone()))?;

        Ok(Self {
            config,
            language,
            config_path: None,
        })
    }

    // @method: Forward a config file path to child render processes
    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn language(&self) -> SummaryLanguage {
        self.language
    }

    fn target_duration(&self) -> f64 {
        self.config.summary.target_duration_secs
    }

    /// Converge on the built-in LSA summarizer, configured from the summary section
    pub fn converge_entries(&self, entries: &[SubtitleEntry]) -> Result<ConvergedSummary, SummaryError> {
        let summary_config = &self.config.summary;
        let summarizer = LsaSummarizer::new(self.language)
            .with_reduction(summary_config.reduction_ratio, summary_config.min_dimensions);
        let adapter = SummarizationAdapter::new(&summarizer, entries);
        let controller = DurationController::new(adapter, summary_config.policy());

        let spinner = Self::spinner("Selecting sentences");
        let result = controller.converge_with_progress(self.target_duration(), |budget, total| {
            spinner.set_message(format!("{} sentences, {:.1}s selected", budget, total));
        });
        spinner.finish_and_clear();

        result
    }

    /// Load a subtitle file and converge on the configured target duration
    pub fn find_regions<P: AsRef<Path>>(&self, subtitles: P) -> Result<ConvergedSummary> {
        let subtitles = subtitles.as_ref();
        let collection = SubtitleCollection::load(subtitles)?;
        info!(
            "Loaded {} subtitle entries ({} speech, {}) from {:?}",
            collection.entries.len(),
            collection.speech_entry_count(),
            collection.encoding,
            subtitles
        );

        let converged = self
            .converge_entries(&collection.entries)
            .with_context(|| format!("Failed to summarize {:?}", subtitles))?;
        debug!(
            "Converged after {} adjustments at {} sentences",
            converged.iterations, converged.budget
        );
        Ok(converged)
    }

    /// Render one summary in this process
    pub async fn render_in_process(&self, video: &Path, subtitles: &Path, output: &Path) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        let toolchain = Toolchain::init(&self.config)?;
        let converged = self.find_regions(subtitles)?;

        let renderer = FfmpegRenderer::from_config(toolchain.ffmpeg(), &self.config.video);
        let spinner = Self::spinner(format!("Rendering {} clips", converged.regions.len()));
        let result = renderer.render(video, &converged.regions, output).await;
        spinner.finish_and_clear();

        let written = result.with_context(|| format!("Failed to render {:?}", output))?;
        info!(
            "Summary written to {:?} ({:.1}s) in {}",
            written,
            converged.total_duration,
            Self::format_duration(start_time.elapsed())
        );
        Ok(written)
    }

    /// Output path: explicit, or `<stem><suffix>.<ext>` next to the video
    pub fn resolve_output(&self, video: &Path, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| FileManager::summary_output_path(video, &self.config.video.output_suffix))
    }

    fn render_job(&self, video: &Path, subtitles: &Path, output: &Path) -> RenderJob {
        RenderJob {
            video: video.to_path_buf(),
            subtitles: subtitles.to_path_buf(),
            output: output.to_path_buf(),
            target_duration: self.target_duration(),
            language: self.language.name().to_string(),
            config_path: self.config_path.clone(),
        }
    }

    /// Summarize one video file
    ///
    /// # Returns
    /// * `Ok(Some(path))` - the written summary
    /// * `Ok(None)` - skipped because the output exists and `force_overwrite` is off
    pub async fn run_file(
        &self,
        video: &Path,
        subtitles: Option<PathBuf>,
        output: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        if !FileManager::file_exists(video) {
            return Err(anyhow!("Input file does not exist: {:?}", video));
        }
        if FileManager::detect_file_type(video)? == FileType::Subtitle {
            return Err(anyhow!(
                "Input {:?} is a subtitle file; pass the video and use --subtitles, or run `vidsum regions`",
                video
            ));
        }

        let subtitles = match subtitles.or_else(|| FileManager::find_subtitle_for_video(video)) {
            Some(path) => path,
            None => return Err(anyhow!("No subtitle file found next to {:?}", video)),
        };

        let output = self.resolve_output(video, output);
        if output.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output);
            return Ok(None);
        }

        if !self.config.worker.isolate {
            return self.render_in_process(video, &subtitles, &output).await.map(Some);
        }

        let pool = WorkerPool::new(1)?;
        let handle = pool.submit(self.render_job(video, &subtitles, &output));
        match handle.wait().await? {
            JobOutcome::Completed { output } => Ok(Some(output)),
            JobOutcome::Failed { exit_code } => Err(anyhow!(
                "Render worker failed for {:?} (exit code {})",
                video,
                exit_code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string())
            )),
        }
    }

    /// Summarize every video in a folder that has a subtitle file next to it
    pub async fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderReport> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let videos = FileManager::find_videos(input_dir)?;
        if videos.is_empty() {
            return Err(anyhow!("No video files found in directory: {:?}", input_dir));
        }

        let mut report = FolderReport::default();
        let mut jobs = Vec::new();
        for video in &videos {
            let Some(subtitles) = FileManager::find_subtitle_for_video(video) else {
                debug!("No subtitles for {:?}, skipping", video);
                report.skipped += 1;
                continue;
            };

            let output = self.resolve_output(video, None);
            if output.exists() && !force_overwrite {
                warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output);
                report.skipped += 1;
                continue;
            }

            jobs.push(self.render_job(video, &subtitles, &output));
        }

        let progress = Self::progress_bar(jobs.len() as u64, "files");
        if self.config.worker.isolate {
            let pool = WorkerPool::new(self.config.worker.max_workers)?;
            let handles: Vec<_> = jobs.into_iter().map(|job| pool.submit(job)).collect();

            for handle in handles {
                let video = handle.job().video.clone();
                progress.set_message(format!("Rendering: {}", Self::display_name(&video)));
                match handle.wait().await {
                    Ok(JobOutcome::Completed { .. }) => report.processed += 1,
                    Ok(JobOutcome::Failed { exit_code }) => {
                        error!("Error processing file {:?}: worker exit code {:?}", video, exit_code);
                        report.failed += 1;
                    }
                    Err(e) => {
                        error!("Error processing file {:?}: {}", video, e);
                        report.failed += 1;
                    }
                }
                progress.inc(1);
            }
        } else {
            for job in jobs {
                progress.set_message(format!("Rendering: {}", Self::display_name(&job.video)));
                match self.render_in_process(&job.video, &job.subtitles, &job.output).await {
                    Ok(_) => report.processed += 1,
                    Err(e) => {
                        error!("Error processing file {:?}: {:#}", job.video, e);
                        report.failed += 1;
                    }
                }
                progress.inc(1);
            }
        }
        progress.finish_and_clear();

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            report.processed,
            report.skipped,
            report.failed
        );
        Ok(report)
    }

    /// Download a video with subtitles, then summarize it
    pub async fn run_url(&self, url: &str, output: Option<PathBuf>, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let toolchain = Toolchain::init(&self.config)?;
        let source = YtDlpSource::new(toolchain.ytdlp()?, self.config.download.clone());

        let dest_dir = match output.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().context("Failed to read current directory")?,
        };

        let spinner = Self::spinner("Downloading");
        let fetched = source.fetch(url, &dest_dir).await;
        spinner.finish_and_clear();

        let media = fetched?;
        let subtitles = media.require_subtitles(url)?.to_path_buf();
        self.run_file(&media.video, Some(subtitles), output, force_overwrite).await
    }

    fn spinner(message: impl Into<String>) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    fn progress_bar(len: u64, unit: &str) -> ProgressBar {
        let progress = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template(&format!("{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}", unit))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("█▓▒░"));
        progress
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Format a duration as `1h 2m 3s`, `2m 3s` or `3.456s`
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
