use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use tokio::process::Command;
use url::Url;

use crate::app_config::DownloadConfig;
use crate::errors::{MediaError, SubtitleError};
use crate::file_utils::FileManager;

// @struct: Files produced by a download
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedMedia {
    pub video: PathBuf,
    pub subtitles: Option<PathBuf>,
}

impl DownloadedMedia {
    // @returns: Subtitle path, or NoSubtitleTrack naming `source`
    pub fn require_subtitles(&self, source: &str) -> Result<&Path, SubtitleError> {
        self.subtitles.as_deref().ok_or_else(|| SubtitleError::NoSubtitleTrack {
            source_name: source.to_string(),
        })
    }
}

/// Something that can turn a URL into a local video with subtitles
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Download `url` into `dest_dir`
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<DownloadedMedia, MediaError>;
}

/// Accept only absolute http(s) URLs
pub fn parse_media_url(input: &str) -> Result<Url, MediaError> {
    let url = Url::parse(input.trim()).map_err(|e| MediaError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        scheme => Err(MediaError::InvalidUrl {
            url: input.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

// @returns: Whether the CLI input looks like a URL rather than a path
pub fn is_url(input: &str) -> bool {
    parse_media_url(input).is_ok()
}

// @struct: yt-dlp backed media source
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    ytdlp: PathBuf,
    config: DownloadConfig,
}

impl YtDlpSource {
    pub fn new<P: Into<PathBuf>>(ytdlp: P, config: DownloadConfig) -> Self {
        YtDlpSource {
            ytdlp: ytdlp.into(),
            config,
        }
    }

    /// yt-dlp arguments for one URL; the final video path is printed on stdout
    pub fn download_args(&self, url: &Url, dest_dir: &Path) -> Vec<String> {
        vec![
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "-f".to_string(),
            self.config.format.clone(),
            "--write-subs".to_string(),
            "--sub-langs".to_string(),
            self.config.subtitle_languages.join(","),
            "--convert-subs".to_string(),
            "srt".to_string(),
            "-o".to_string(),
            dest_dir.join(&self.config.output_template).to_string_lossy().into_owned(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            "--no-simulate".to_string(),
            url.as_str().to_string(),
        ]
    }

    fn locate_video(stdout: &str, dest_dir: &Path) -> Option<PathBuf> {
        let printed = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.is_file());

        printed.or_else(|| {
            warn!("yt-dlp did not report the downloaded file, scanning {:?}", dest_dir);
            FileManager::find_videos(dest_dir).ok()?.into_iter().next()
        })
    }
}

#[async_trait]
impl MediaSource for YtDlpSource {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<DownloadedMedia, MediaError> {
        let url = parse_media_url(url)?;
        tokio::fs::create_dir_all(dest_dir).await?;

        info!("Downloading {}", url);
        let args = self.download_args(&url, dest_dir);
        debug!("Running {:?} {}", self.ytdlp, args.join(" "));

        let output = Command::new(&self.ytdlp)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .filter(|l| l.starts_with("ERROR"))
                .collect::<Vec<_>>()
                .join("\n");
            let message = if message.is_empty() { stderr.trim().to_string() } else { message };
            error!("yt-dlp failed: {}", message);
            return Err(MediaError::CommandFailed {
                tool: "yt-dlp".to_string(),
                message,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let video = Self::locate_video(&stdout, dest_dir).ok_or_else(|| MediaError::CommandFailed {
            tool: "yt-dlp".to_string(),
            message: format!("no video file found in {:?}", dest_dir),
        })?;

        let subtitles = FileManager::find_subtitle_for_video(&video);
        match &subtitles {
            Some(path) => info!("Downloaded {:?} with subtitles {:?}", video, path),
            None => warn!("Downloaded {:?} without subtitles", video),
        }

        Ok(DownloadedMedia { video, subtitles })
    }
}
