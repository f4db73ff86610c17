use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use regex::Regex;
use once_cell::sync::Lazy;

// @module: File and directory utilities

// @const: Common video file extensions supported by ffmpeg
const VIDEO_EXTENSIONS: [&str; 14] = [
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v",
    "mpg", "mpeg", "ogv", "ts", "mts", "m2ts",
];

// @const: Timed-text formats the loader understands
const SUBTITLE_EXTENSIONS: [&str; 2] = ["srt", "vtt"];

static TIMED_TEXT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}[,.]\d{3}\s+-->\s+(?:\d{2}:)?\d{2}:\d{2}[,.]\d{3}").expect("timed text regex is valid")
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for the summarized video, `<stem><suffix>.<ext>` next to the input
    pub fn summary_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();

        let mut output_filename = format!("{}{}", stem, suffix);
        if let Some(ext) = input_file.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        match input_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }

    /// Find the subtitle file that belongs to a video: `<stem>.srt`, `<stem>.<lang>.srt`
    /// or the `.vtt` equivalents, preferring SRT and the plain name
    pub fn find_subtitle_for_video<P: AsRef<Path>>(video: P) -> Option<PathBuf> {
        let video = video.as_ref();
        let stem = video.file_stem()?.to_string_lossy().to_string();
        let dir = match video.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        for ext in SUBTITLE_EXTENSIONS {
            let direct = dir.join(format!("{}.{}", stem, ext));
            if direct.is_file() {
                return Some(direct);
            }
        }

        let mut candidates: Vec<PathBuf> = fs::read_dir(&dir)
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                let name = p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
                name.starts_with(&format!("{}.", stem))
                    && p.extension()
                        .map(|ext| SUBTITLE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()))
                        .unwrap_or(false)
            })
            .collect();

        // srt before vtt, then alphabetical for a stable pick
        candidates.sort_by_key(|p| {
            let is_vtt = p.extension().map(|e| e.eq_ignore_ascii_case("vtt")).unwrap_or(false);
            (is_vtt, p.clone())
        });
        candidates.into_iter().next()
    }

    /// Find every video file below a directory
    pub fn find_videos<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, &VIDEO_EXTENSIONS) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect if a file is a subtitle file (SRT/WebVTT) or a video file supported by ffmpeg
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if Self::has_extension(path, &SUBTITLE_EXTENSIONS) {
            return Ok(FileType::Subtitle);
        }

        if Self::has_extension(path, &VIDEO_EXTENSIONS) {
            return Ok(FileType::Video);
        }

        // Fall back to examining file contents
        if let Ok(content) = fs::read_to_string(path) {
            if content.contains("-->") && TIMED_TEXT_REGEX.is_match(&content) {
                return Ok(FileType::Subtitle);
            }
        }

        Ok(FileType::Unknown)
    }

    fn has_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .map(|ext| extensions.contains(&ext.to_string_lossy().to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Subtitle file (SRT or WebVTT)
    Subtitle,
    /// Video file supported by ffmpeg
    Video,
    /// Unknown file type
    Unknown,
}
