use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};
use crate::errors::SubtitleError;

// @module: Subtitle loading and parsing

// @const: SRT/WebVTT timing line regex (hours optional, ',' or '.' before millis)
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{1,3}):)?(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(?:(\d{1,3}):)?(\d{2}):(\d{2})[,.](\d{3})")
        .expect("timing regex is valid")
});

// @const: Inline markup such as <i>, </font>, <c.colorE5E5E5> or <00:00:01.000>
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"</?[A-Za-z0-9:.#_ \-="']+>"#).expect("markup regex is valid")
});

// @struct: Point in time within the video
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl Timestamp {
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        Timestamp { hours, minutes, seconds, milliseconds }
    }

    /// Build a timestamp from a millisecond offset
    pub fn from_millis(ms: u64) -> Self {
        Timestamp {
            hours: (ms / 3_600_000) as u32,
            minutes: ((ms % 3_600_000) / 60_000) as u32,
            seconds: ((ms % 60_000) / 1_000) as u32,
            milliseconds: (ms % 1_000) as u32,
        }
    }

    /// Fractional seconds since the start of the video
    pub fn as_seconds(&self) -> f64 {
        f64::from(self.hours) * 3600.0
            + f64::from(self.minutes) * 60.0
            + f64::from(self.seconds)
            + f64::from(self.milliseconds) / 1000.0
    }

    pub fn as_millis(&self) -> u64 {
        (u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)) * 1000
            + u64::from(self.milliseconds)
    }

    /// Parse `HH:MM:SS,mmm` (or `.mmm`, or `MM:SS.mmm` as WebVTT allows)
    pub fn parse(timestamp: &str) -> Option<Self> {
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();
        let (hours, rest) = match parts.len() {
            4 => (parts[0].parse().ok()?, &parts[1..]),
            3 => (0, &parts[..]),
            _ => return None,
        };

        let minutes: u32 = rest[0].parse().ok()?;
        let seconds: u32 = rest[1].parse().ok()?;
        let milliseconds: u32 = rest[2].parse().ok()?;

        if minutes >= 60 || seconds >= 60 || milliseconds >= 1000 {
            return None;
        }

        Some(Timestamp::new(hours, minutes, seconds, milliseconds))
    }

    fn from_captures(caps: &regex::Captures, start_idx: usize) -> Option<Self> {
        let field = |i: usize| -> Option<u32> {
            caps.get(start_idx + i).map_or(Some(0), |m| m.as_str().parse().ok())
        };
        let ts = Timestamp::new(field(0)?, field(1)?, field(2)?, field(3)?);
        if ts.minutes >= 60 || ts.seconds >= 60 {
            return None;
        }
        Some(ts)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02},{:03}", self.hours, self.minutes, self.seconds, self.milliseconds)
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: 0-based position in source order
    pub index: usize,

    // @field: Subtitle text, lines separated by '\n'
    pub text: String,

    pub start: Timestamp,

    pub end: Timestamp,
}

impl SubtitleEntry {
    pub fn new(index: usize, start: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        SubtitleEntry {
            index,
            text: text.into(),
            start,
            end,
        }
    }

    /// Convenience constructor from millisecond offsets, mostly for tests
    pub fn from_millis(index: usize, start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self::new(index, Timestamp::from_millis(start_ms), Timestamp::from_millis(end_ms), text)
    }

    pub fn start_seconds(&self) -> f64 {
        self.start.as_seconds()
    }

    pub fn end_seconds(&self) -> f64 {
        self.end.as_seconds()
    }

    /// Bracketed annotations like "[music]" carry no speech
    pub fn is_non_speech(&self) -> bool {
        self.text.starts_with('[')
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index + 1)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered subtitle entries loaded from one file
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Entries in source order
    pub entries: Vec<SubtitleEntry>,

    /// Encoding the file was decoded with
    pub encoding: &'static str,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
            encoding: encoding_rs::UTF_8.name(),
        }
    }

    /// Load a subtitle file, detecting its byte encoding first
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(SubtitleError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|source| SubtitleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (content, encoding) = Self::decode(&bytes);
        debug!("Decoded {:?} as {}", path, encoding);

        let entries = Self::parse_string(&content).map_err(|e| match e {
            ParseFailure::NoTimedText => SubtitleError::Empty(path.to_path_buf()),
            ParseFailure::NoValidEntries(reason) => SubtitleError::Unparsable {
                path: path.to_path_buf(),
                reason,
            },
        })?;

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
            encoding,
        })
    }

    /// Detect the byte encoding (BOM first, then statistical guess) and decode
    pub fn decode(bytes: &[u8]) -> (String, &'static str) {
        let encoding = match encoding_rs::Encoding::for_bom(bytes) {
            Some((encoding, _)) => encoding,
            // Plain ASCII is valid UTF-8 too, so no guessing is needed
            None if encoding_rs::Encoding::utf8_valid_up_to(bytes) == bytes.len() => encoding_rs::UTF_8,
            None => {
                let mut detector = chardetng::EncodingDetector::new();
                detector.feed(bytes, true);
                detector.guess(None, true)
            }
        };

        let (content, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            warn!("Subtitle bytes are not valid {}, invalid sequences were replaced", used.name());
        }

        (content.into_owned(), used.name())
    }

    /// Write the entries out as SRT
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
        }
        fs::write(path, out)
    }

    /// Sum of all entry durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.entries.iter().map(|e| e.end_seconds() - e.start_seconds()).sum()
    }

    /// Number of entries that carry speech
    pub fn speech_entry_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_non_speech()).count()
    }

    /// Parse SRT or WebVTT content into entries, keeping source order
    pub fn parse_string(content: &str) -> Result<Vec<SubtitleEntry>, ParseFailure> {
        let normalized = content.trim_start_matches('\u{feff}').replace("\r\n", "\n").replace('\r', "\n");

        let mut entries: Vec<SubtitleEntry> = Vec::new();
        let mut timed_blocks = 0;
        let mut skipped = 0;

        for (block_no, block) in normalized.split("\n\n").enumerate() {
            let lines: Vec<&str> = block.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                continue;
            }

            // Sequence numbers and cue identifiers come before the timing line
            let Some(timing_pos) = lines.iter().position(|l| TIMING_REGEX.is_match(l.trim())) else {
                if !lines[0].starts_with("WEBVTT") && !lines[0].starts_with("NOTE")
                    && !lines[0].starts_with("STYLE") && !lines[0].starts_with("REGION") {
                    debug!("Ignoring block {} without timing line", block_no + 1);
                }
                continue;
            };
            timed_blocks += 1;

            let caps = match TIMING_REGEX.captures(lines[timing_pos].trim()) {
                Some(caps) => caps,
                None => continue,
            };
            let (Some(start), Some(end)) = (Timestamp::from_captures(&caps, 1), Timestamp::from_captures(&caps, 5)) else {
                warn!("Skipping block {} with invalid timestamp: {}", block_no + 1, lines[timing_pos]);
                skipped += 1;
                continue;
            };

            if end < start {
                warn!("Skipping block {}: end {} is before start {}", block_no + 1, end, start);
                skipped += 1;
                continue;
            }

            let text = lines[timing_pos + 1..]
                .iter()
                .map(|l| MARKUP_REGEX.replace_all(l.trim(), "").trim().to_string())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n");

            if text.is_empty() {
                warn!("Skipping empty subtitle block {}", block_no + 1);
                skipped += 1;
                continue;
            }

            entries.push(SubtitleEntry::new(entries.len(), start, end, text));
        }

        if timed_blocks == 0 {
            return Err(ParseFailure::NoTimedText);
        }

        if entries.is_empty() {
            return Err(ParseFailure::NoValidEntries(format!(
                "all {} timed blocks were invalid",
                skipped
            )));
        }

        let out_of_order = entries.windows(2).filter(|w| w[1].start < w[0].start).count();
        if out_of_order > 0 {
            warn!("Found {} subtitle entries starting before their predecessor", out_of_order);
        }

        Ok(entries)
    }
}

/// Why a subtitle text did not yield entries
#[derive(Debug, Clone, PartialEq)]
pub enum ParseFailure {
    /// Not a single timing line was found
    NoTimedText,
    /// Timing lines were found but every block was rejected
    NoValidEntries(String),
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Encoding: {}", self.encoding)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
