use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::OnceCell;

use crate::app_config::Config;
use crate::errors::MediaError;

static TOOLCHAIN: OnceCell<Toolchain> = OnceCell::new();

// @struct: Resolved locations of the external executables
#[derive(Debug, Clone, PartialEq)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    /// Only needed for URL inputs, so a missing yt-dlp is not fatal here
    pub ytdlp: Option<PathBuf>,
}

impl Toolchain {
    /// Resolve the tools once per process; later calls return the first result
    pub fn init(config: &Config) -> Result<&'static Toolchain, MediaError> {
        TOOLCHAIN.get_or_try_init(|| Self::resolve(config))
    }

    /// Look up the configured executables without caching the result
    pub fn resolve(config: &Config) -> Result<Toolchain, MediaError> {
        let ffmpeg = locate(&config.video.ffmpeg_path)?;
        let ytdlp = locate(&config.download.ytdlp_path).ok();

        debug!("Using ffmpeg at {:?}", ffmpeg);
        match &ytdlp {
            Some(path) => debug!("Using yt-dlp at {:?}", path),
            None => debug!("yt-dlp not found, URL inputs are unavailable"),
        }

        Ok(Toolchain { ffmpeg, ytdlp })
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    // @returns: yt-dlp path or ToolNotFound
    pub fn ytdlp(&self) -> Result<&Path, MediaError> {
        self.ytdlp.as_deref().ok_or_else(|| MediaError::ToolNotFound {
            tool: "yt-dlp".to_string(),
        })
    }
}

/// Find an executable by name on PATH, or check an explicit path
pub fn locate(tool: &str) -> Result<PathBuf, MediaError> {
    which::which(tool).map_err(|_| MediaError::ToolNotFound {
        tool: tool.to_string(),
    })
}
