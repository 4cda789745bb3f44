use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use crate::text_utils;

// @module: Subtitle parsing, formatting and manipulation

// @const: SRT timing line
static SRT_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+:\d{2}:\d{2}[,.]\d{1,3})\s*-->\s*(\d+:\d{2}:\d{2}[,.]\d{1,3})").unwrap()
});

// @const: WebVTT timing line, hours optional, cue settings allowed after the end time
static VTT_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\d+:)?\d{2}:\d{2}\.\d{1,3})\s*-->\s*((?:\d+:)?\d{2}:\d{2}\.\d{1,3})").unwrap()
});

// @const: SBV timing line
static SBV_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+:\d{2}:\d{2}\.\d{1,3}),(\d+:\d{2}:\d{2}\.\d{1,3})\s*$").unwrap()
});

/// Supported subtitle containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip
    Srt,
    /// YouTube SubViewer
    Sbv,
    /// WebVTT
    Vtt,
}

impl SubtitleFormat {
    // @returns: File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Sbv => "sbv",
            Self::Vtt => "vtt",
        }
    }

    /// Guess the format from a file extension
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        ext.parse().ok()
    }

    /// Guess the format by looking at the content
    pub fn detect(content: &str) -> Option<Self> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("WEBVTT") {
            return Some(Self::Vtt);
        }

        for line in content.lines().map(str::trim) {
            if SBV_TIMING_REGEX.is_match(line) {
                return Some(Self::Sbv);
            }
            if SRT_TIMING_REGEX.is_match(line) {
                return Some(Self::Srt);
            }
        }

        None
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "sbv" => Ok(Self::Sbv),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            other => Err(SubtitleError::UnsupportedFormat(other.to_string())),
        }
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Same timing, different text
    pub fn with_text(&self, text: String) -> Self {
        SubtitleEntry {
            text,
            ..self.clone()
        }
    }

    /// Words of the cue text without formatting tags, line breaks treated as spaces
    pub fn words(&self) -> Vec<String> {
        text_utils::tokenize(&text_utils::strip_tags(&self.text))
    }

    /// Parse a timestamp to milliseconds
    ///
    /// Accepts `HH:MM:SS,mmm`, `H:MM:SS.mmm` and the WebVTT short form `MM:SS.mmm`.
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let (clock, fraction) = timestamp
            .trim()
            .rsplit_once([',', '.'])
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = clock.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m, s] => (*h, *m, *s),
            [m, s] => ("0", *m, *s),
            _ => return Err(invalid()),
        };

        let hours: u64 = hours.parse().map_err(|_| invalid())?;
        let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u64 = seconds.parse().map_err(|_| invalid())?;

        // "5" after the separator means 500 ms, as in "00:00:01.5"
        if fraction.is_empty() || fraction.len() > 3 {
            return Err(invalid());
        }
        let scale = 10u64.pow(3 - fraction.len() as u32);
        let millis: u64 = fraction.parse::<u64>().map_err(|_| invalid())? * scale;

        // Validate time components
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds for the given container
    pub fn format_timestamp_for(ms: u64, format: SubtitleFormat) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        match format {
            SubtitleFormat::Srt => format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis),
            SubtitleFormat::Vtt => format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis),
            SubtitleFormat::Sbv => format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis),
        }
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        Self::format_timestamp_for(ms, SubtitleFormat::Srt)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Render this entry as one block of the given container
    pub fn to_block(&self, format: SubtitleFormat, max_line_length: usize) -> String {
        let start = Self::format_timestamp_for(self.start_time_ms, format);
        let end = Self::format_timestamp_for(self.end_time_ms, format);
        let text = wrap_text(&self.text, max_line_length);

        match format {
            SubtitleFormat::Srt => format!("{}\n{} --> {}\n{}\n\n", self.seq_num, start, end, text),
            SubtitleFormat::Vtt => format!("{} --> {}\n{}\n\n", start, end, text),
            SubtitleFormat::Sbv => format!("{},{}\n{}\n\n", start, end, text),
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Greedy word wrap of cue text
///
/// Existing line breaks are treated as spaces. A `max_line_length` of 0 returns
/// the text untouched. Words longer than the limit get a line of their own.
pub fn wrap_text(text: &str, max_line_length: usize) -> String {
    if max_line_length == 0 {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() > max_line_length {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,

    /// Container the entries were read from
    pub format: SubtitleFormat,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf, format: SubtitleFormat) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
            format,
        }
    }

    /// Read and parse a subtitle file
    ///
    /// The format is taken from `format` when given, then from the file
    /// extension, then from the content itself.
    pub fn from_file<P: AsRef<Path>>(path: P, format: Option<SubtitleFormat>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

        let format = match format.or_else(|| SubtitleFormat::from_extension(path)) {
            Some(format) => format,
            None => SubtitleFormat::detect(&content)
                .ok_or_else(|| SubtitleError::UnsupportedFormat(path.display().to_string()))?,
        };

        let entries = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;

        debug!("Read {} {} entries from {}", entries.len(), format, path.display());

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
            format,
        })
    }

    /// Parse subtitle content in the given format
    pub fn parse(content: &str, format: SubtitleFormat) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let timing_regex: &Regex = match format {
            SubtitleFormat::Srt => &*SRT_TIMING_REGEX,
            SubtitleFormat::Sbv => &*SBV_TIMING_REGEX,
            SubtitleFormat::Vtt => &*VTT_TIMING_REGEX,
        };

        let content = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");
        let mut entries: Vec<SubtitleEntry> = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        let mut block_start_line = 0;

        for (line_idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    Self::parse_block(&block, block_start_line, format, timing_regex, &mut entries);
                    block.clear();
                }
                continue;
            }

            if block.is_empty() {
                block_start_line = line_idx + 1;
            }
            block.push(line);
        }

        if !block.is_empty() {
            Self::parse_block(&block, block_start_line, format, timing_regex, &mut entries);
        }

        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
            return Err(SubtitleError::NoEntries {
                format: format.to_string(),
            });
        }

        // Check for overlapping entries
        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        Ok(entries)
    }

    /// Parse one blank-line separated block, appending the entry if it is a cue
    fn parse_block(
        block: &[&str],
        line_number: usize,
        format: SubtitleFormat,
        timing_regex: &Regex,
        entries: &mut Vec<SubtitleEntry>,
    ) {
        let first = block[0].trim();

        if format == SubtitleFormat::Vtt
            && ["WEBVTT", "NOTE", "STYLE", "REGION"].iter().any(|kw| first.starts_with(kw))
        {
            return;
        }

        // The timing line is either first or preceded by an index / cue identifier
        let Some(timing_idx) = block
            .iter()
            .take(2)
            .position(|line| timing_regex.is_match(line.trim()))
        else {
            warn!("Skipping block at line {} without a valid timing line: {}", line_number, first);
            return;
        };

        let Some(caps) = timing_regex.captures(block[timing_idx].trim()) else {
            return;
        };

        let (start_ms, end_ms) = match (
            SubtitleEntry::parse_timestamp(&caps[1]),
            SubtitleEntry::parse_timestamp(&caps[2]),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Skipping block at line {}: {}", line_number, e);
                return;
            }
        };

        if end_ms < start_ms {
            warn!(
                "Entry at line {} ends before it starts ({} < {})",
                line_number, end_ms, start_ms
            );
        }

        let previous = entries.last().map_or(0, |e| e.seq_num);
        let declared = if format == SubtitleFormat::Srt && timing_idx == 1 {
            first.parse::<usize>().ok()
        } else {
            None
        };
        let seq_num = match declared {
            Some(num) if num > previous => num,
            Some(num) => {
                warn!("Out of order sequence number {} at line {}, renumbering", num, line_number);
                previous + 1
            }
            None => previous + 1,
        };

        let text = block[timing_idx + 1..]
            .iter()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join("\n");

        entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, text));
    }

    /// Render the collection in the given container
    pub fn to_format_string(&self, format: SubtitleFormat, max_line_length: usize) -> String {
        let mut output = String::new();

        if format == SubtitleFormat::Vtt {
            output.push_str("WEBVTT\n\n");
        }

        for entry in &self.entries {
            output.push_str(&entry.to_block(format, max_line_length));
        }

        output
    }

    /// Write subtitles to a file in the given container
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, format: SubtitleFormat, max_line_length: usize) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        file.write_all(self.to_format_string(format, max_line_length).as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
