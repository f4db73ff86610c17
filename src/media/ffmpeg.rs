/*!
 * Clip extraction and concatenation with ffmpeg.
 *
 * Each selected range is re-encoded into its own clip inside a temporary
 * directory, then the clips are joined with the concat demuxer in region order.
 * The joined video is only moved to the output path once ffmpeg succeeded, and
 * the temporary directory is removed on every exit path.
 */

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use tempfile::TempDir;
use tokio::process::Command;

use crate::app_config::VideoConfig;
use crate::errors::MediaError;
use crate::summary::{SummaryRegions, TimeRange};

/// Produces a video made of the given time ranges
#[async_trait]
pub trait ClipRenderer: Send + Sync {
    /// Cut `regions` out of `video` and join them into `output`
    ///
    /// # Returns
    /// * `Result<PathBuf, MediaError>` - Path of the written video
    async fn render(&self, video: &Path, regions: &SummaryRegions, output: &Path) -> Result<PathBuf, MediaError>;
}

// @struct: ffmpeg-backed renderer
#[derive(Debug, Clone)]
pub struct FfmpegRenderer {
    ffmpeg: PathBuf,
    video_codec: String,
    audio_codec: String,
    timeout: Duration,
}

impl FfmpegRenderer {
    pub fn new<P: Into<PathBuf>>(ffmpeg: P) -> Self {
        Self::from_config(ffmpeg, &VideoConfig::default())
    }

    pub fn from_config<P: Into<PathBuf>>(ffmpeg: P, config: &VideoConfig) -> Self {
        FfmpegRenderer {
            ffmpeg: ffmpeg.into(),
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Arguments that re-encode one range of `video` into `clip`
    pub fn cut_args(&self, video: &Path, range: &TimeRange, clip: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            format_time(range.start),
            "-i".to_string(),
            video.to_string_lossy().into_owned(),
            "-t".to_string(),
            format_time(range.duration()),
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
            clip.to_string_lossy().into_owned(),
        ]
    }

    /// Arguments that join the clips listed in `list` into `output` without re-encoding
    pub fn concat_args(&self, list: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            list.to_string_lossy().into_owned(),
            "-c".to_string(),
            "copy".to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }

    async fn run(&self, args: &[String]) -> Result<(), MediaError> {
        debug!("Running {:?} {}", self.ffmpeg, args.join(" "));

        let ffmpeg_future = Command::new(&self.ffmpeg)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = ffmpeg_future => result?,
            _ = tokio::time::sleep(self.timeout) => {
                return Err(MediaError::Timeout {
                    tool: "ffmpeg".to_string(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("ffmpeg failed: {}", filtered);
            return Err(MediaError::CommandFailed {
                tool: "ffmpeg".to_string(),
                message: filtered,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ClipRenderer for FfmpegRenderer {
    async fn render(&self, video: &Path, regions: &SummaryRegions, output: &Path) -> Result<PathBuf, MediaError> {
        let ranges: Vec<&TimeRange> = regions.iter().filter(|r| r.duration() > 0.0).collect();
        if ranges.is_empty() {
            return Err(MediaError::NothingToRender);
        }

        let workdir = TempDir::new()?;
        let extension = output
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");

        let mut clips = Vec::with_capacity(ranges.len());
        for (i, range) in ranges.iter().enumerate() {
            let clip = workdir.path().join(format!("clip_{:04}.{}", i, extension));
            debug!("Cutting clip {}/{}: {:.3}s - {:.3}s", i + 1, ranges.len(), range.start, range.end);
            self.run(&self.cut_args(video, range, &clip)).await?;
            clips.push(clip);
        }

        let list = workdir.path().join("clips.txt");
        tokio::fs::write(&list, concat_list(&clips)).await?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let joined = workdir.path().join(format!("summary.{}", extension));
        self.run(&self.concat_args(&list, &joined)).await?;
        move_into_place(&joined, output).await?;
        info!("Joined {} clips into {:?}", clips.len(), output);

        Ok(output.to_path_buf())
    }
}

/// Move a finished file to `output`, copying when a rename is not possible
/// (e.g. the temporary directory is on another filesystem)
async fn move_into_place(finished: &Path, output: &Path) -> Result<(), MediaError> {
    if tokio::fs::rename(finished, output).await.is_ok() {
        return Ok(());
    }

    debug!("Rename to {:?} failed, copying instead", output);
    if let Err(e) = tokio::fs::copy(finished, output).await {
        if tokio::fs::remove_file(output).await.is_ok() {
            warn!("Removed incomplete output {:?}", output);
        }
        return Err(e.into());
    }
    Ok(())
}

/// Concat demuxer list with one quoted `file` line per clip
pub fn concat_list(clips: &[PathBuf]) -> String {
    clips
        .iter()
        .map(|clip| format!("file '{}'\n", clip.to_string_lossy().replace('\'', "'\\''")))
        .collect()
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Chapter",
        "Stream #",
        "title",
        "encoder",
        "handler_name",
        "major_brand",
        "minor_version",
        "compatible_brands",
        "creation_time",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "frame=",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}

fn format_time(value: f64) -> String {
    format!("{value:.3}")
}
