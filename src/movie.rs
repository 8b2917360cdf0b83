use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DOTTED_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+?)[._](\d{4})[._]").unwrap());
static PAREN_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+?)\s*\((\d{4})\)").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieInfo {
    pub title: String,
    pub release_year: Option<u16>,
}

/// Guess title and release year from names like `Movie.Title.2020.srt` or
/// `Movie Title (2020).srt`. Falls back to the file stem with no year.
pub fn from_filename<P: AsRef<Path>>(path: P) -> MovieInfo {
    let path = path.as_ref();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(caps) = DOTTED_YEAR.captures(&filename) {
        let title = caps[1].replace(['.', '_'], " ").trim().to_string();
        return MovieInfo {
            title,
            release_year: caps[2].parse().ok(),
        };
    }
    if let Some(caps) = PAREN_YEAR.captures(&filename) {
        return MovieInfo {
            title: caps[1].trim().to_string(),
            release_year: caps[2].parse().ok(),
        };
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(filename);
    MovieInfo {
        title: stem,
        release_year: None,
    }
}
