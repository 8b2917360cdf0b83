//! Subtitle ingestion for language learning: parse SRT files into timed,
//! cleaned records and collect word statistics from them.
pub mod analysis;
pub mod encoding;
pub mod error;
pub mod movie;
pub mod parser;
pub mod processor;
pub mod serialiser;
pub mod srt;

pub use parser::{parse_srt, Parser};
pub use srt::{full_text, text_only, SubtitleRecord, Timestamp};
