//! Guessing the text encoding of subtitle files and decoding them.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use log::{debug, warn};

/// Number of leading bytes inspected when guessing an encoding.
pub const SAMPLE_SIZE: usize = 10_000;

/// Guess the encoding of the file at `path` from its first `SAMPLE_SIZE` bytes.
pub fn detect_encoding<P: AsRef<Path>>(path: P) -> Result<&'static Encoding> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open file: '{}'", path.display()))?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
        .with_context(|| format!("Failed to read file: '{}'", path.display()))?;
    let encoding = detect_bytes(&sample, sample.len() < SAMPLE_SIZE);
    debug!(
        "Detected encoding {} for '{}'",
        encoding.name(),
        path.display()
    );
    Ok(encoding)
}

/// Guess the encoding of `sample`. `complete` tells whether the sample is the whole input.
pub fn detect_bytes(sample: &[u8], complete: bool) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(sample, complete);
    detector.guess(None, true)
}

/// Decode `bytes`, substituting U+FFFD for anything undecodable. A byte-order mark
/// overrides `encoding` and is stripped.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "Replaced undecodable bytes while decoding as {}",
            used.name()
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, UTF_8, WINDOWS_1252};
    use std::io::Write;

    #[test]
    fn detects_utf8() {
        let encoding = detect_bytes("Ça va? Très bien, merci.".as_bytes(), true);
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn detects_bom() {
        assert_eq!(detect_bytes(b"\xEF\xBB\xBF1\n", true), UTF_8);
        assert_eq!(detect_bytes(b"\xFF\xFE1\x00", true), UTF_16LE);
    }

    #[test]
    fn detects_latin1_as_windows_1252() {
        let encoding = detect_bytes(b"Le caf\xe9 est tr\xe8s bon, d\xe9j\xe0 vu.", true);
        assert_eq!(encoding, WINDOWS_1252);
    }

    #[test]
    fn decode_strips_bom() {
        assert_eq!(decode(b"\xEF\xBB\xBFHello", UTF_8), "Hello");
    }

    #[test]
    fn decode_replaces_bad_bytes() {
        assert_eq!(decode(b"ab\xFFcd", UTF_8), "ab\u{FFFD}cd");
    }

    #[test]
    fn detect_encoding_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("1\n00:00:01,000 --> 00:00:02,000\nÜber\n".as_bytes())
            .unwrap();
        assert_eq!(detect_encoding(file.path()).unwrap(), UTF_8);
    }

    #[test]
    fn detect_encoding_missing_file() {
        assert!(detect_encoding("/definitely/not/here.srt").is_err());
    }
}
