/*!
 * External media tools.
 *
 * - `tools`: one-time lookup of the ffmpeg and yt-dlp executables
 * - `ffmpeg`: cuts the selected time ranges and joins them into one video
 * - `downloader`: fetches a video and its subtitles from a URL
 */

pub mod tools;
pub mod ffmpeg;
pub mod downloader;

pub use tools::Toolchain;
pub use ffmpeg::{ClipRenderer, FfmpegRenderer, filter_ffmpeg_stderr};
pub use downloader::{DownloadedMedia, MediaSource, YtDlpSource};
