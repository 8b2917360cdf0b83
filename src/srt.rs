use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// A point in time within a subtitle file, as written in an SRT time range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
    /// Precomputed `hours*3600 + minutes*60 + seconds + milliseconds/1000`.
    pub total_seconds: f64,
}

impl Timestamp {
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let whole = hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64;
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
            total_seconds: whole + milliseconds as f64 / 1000.0,
        }
    }

    pub fn as_duration(&self) -> Duration {
        let millis = self.milliseconds as u64
            + 1000 * (self.seconds as u64 + 60 * (self.minutes as u64 + 60 * self.hours as u64));
        Duration::from_millis(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

/// One parsed cue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleRecord {
    /// Sequence number as written in the file. Neither unique nor ordered.
    pub index: i64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Text lines of the cue joined with `\n`.
    pub text: String,
    pub cleaned_text: String,
}

/// The cleaned text of every record, in file order.
pub fn text_only(records: &[SubtitleRecord]) -> Vec<&str> {
    records.iter().map(|r| r.cleaned_text.as_str()).collect()
}

/// All cleaned text joined with single spaces.
pub fn full_text(records: &[SubtitleRecord]) -> String {
    text_only(records).join(" ")
}
