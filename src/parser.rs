use crate::encoding;
use crate::srt::{SubtitleRecord, Timestamp};

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error, warn};
use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::{all_consuming, map_res};
use nom::error::VerboseError;
use nom::IResult;
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static TIME_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([\d:,]+)\s*-->\s*([\d:,]+)").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Why a block did not produce a record.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    TooFewLines(usize),
    InvalidIndex(String),
    MissingTimeRange(String),
    InvalidTimestamp(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::TooFewLines(n) => write!(fmt, "expected at least 3 lines, found {}", n),
            SkipReason::InvalidIndex(line) => write!(fmt, "invalid index '{}'", line),
            SkipReason::MissingTimeRange(line) => write!(fmt, "no time range in '{}'", line),
            SkipReason::InvalidTimestamp(line) => write!(fmt, "invalid timestamp in '{}'", line),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// Zero-based position of the block in the file.
    pub block: usize,
    pub reason: SkipReason,
}

/// Everything learned from one parse: the records in file order and the blocks dropped.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub encoding: Option<&'static str>,
    pub records: Vec<SubtitleRecord>,
    pub skipped: Vec<SkippedBlock>,
}

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Read, decode and parse the file at `path`.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseReport> {
        let path = path.as_ref();
        let encoding = encoding::detect_encoding(path)?;
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file: '{}'", path.display()))?;
        let content = encoding::decode(&bytes, encoding);
        let mut report = self.parse_str(&content);
        report.encoding = Some(encoding.name());
        Ok(report)
    }

    /// Parse already decoded subtitle text.
    pub fn parse_str(&self, content: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let content = content.trim();
        if content.is_empty() {
            return report;
        }
        for (i, block) in BLOCK_SEPARATOR.split(content).enumerate() {
            match parse_block(block) {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    if let SkipReason::TooFewLines(_) = &reason {
                        debug!("Skipping block {}: {}", i, reason);
                    } else {
                        warn!("Skipping block {}: {}", i, reason);
                    }
                    report.skipped.push(SkippedBlock { block: i, reason });
                }
            }
        }
        report
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the SRT file at `path`, dropping malformed cues. A missing or unreadable
/// file is logged and yields no records.
pub fn parse_srt<P: AsRef<Path>>(path: P) -> Vec<SubtitleRecord> {
    let path = path.as_ref();
    if !path.exists() {
        error!("File '{}' not found.", path.display());
        return Vec::new();
    }
    match Parser::new().parse_file(path) {
        Ok(report) => report.records,
        Err(err) => {
            error!("Error reading the file: {:#}", err);
            Vec::new()
        }
    }
}

fn parse_block(block: &str) -> std::result::Result<SubtitleRecord, SkipReason> {
    let lines: Vec<&str> = block
        .trim()
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    if lines.len() < 3 {
        return Err(SkipReason::TooFewLines(lines.len()));
    }

    let index = lines[0]
        .trim()
        .parse::<i64>()
        .map_err(|_| SkipReason::InvalidIndex(lines[0].to_string()))?;

    let (start_time, end_time) = match parse_time_range(lines[1]) {
        Some((Some(start), Some(end))) => (start, end),
        Some(_) => return Err(SkipReason::InvalidTimestamp(lines[1].to_string())),
        None => return Err(SkipReason::MissingTimeRange(lines[1].to_string())),
    };
    if end_time.total_seconds < start_time.total_seconds {
        debug!(
            "Cue {} ends before it starts ({} --> {})",
            index, start_time, end_time
        );
    }

    let text = lines[2..].join("\n");
    let cleaned_text = clean_text(&text);

    Ok(SubtitleRecord {
        index,
        start_time,
        end_time,
        text,
        cleaned_text,
    })
}

/// Parse a `start --> end` line. `None` when there is no arrow between two
/// timestamp-like tokens; otherwise each side is parsed on its own.
pub fn parse_time_range(line: &str) -> Option<(Option<Timestamp>, Option<Timestamp>)> {
    let caps = TIME_RANGE.captures(line)?;
    Some((parse_timestamp(&caps[1]), parse_timestamp(&caps[2])))
}

/// Parse a strict `HH:MM:SS,mmm` timestamp.
pub fn parse_timestamp(input: &str) -> Option<Timestamp> {
    all_consuming(timestamp)(input).ok().map(|(_, ts)| ts)
}

fn timestamp(input: &str) -> IResult<&str, Timestamp, VerboseError<&str>> {
    let digits = |n: usize| {
        map_res(
            take_while_m_n(n, n, |c: char| c.is_ascii_digit()),
            |s: &str| s.parse::<u32>(),
        )
    };

    let (input, hours) = digits(2)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = digits(2)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = digits(2)(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = digits(3)(input)?;

    Ok((input, Timestamp::new(hours, minutes, seconds, millis)))
}

/// Strip `<...>` tags and collapse whitespace to single spaces.
pub fn clean_text(text: &str) -> String {
    let text = TAG.replace_all(text, "");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
