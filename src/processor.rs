use crate::analysis::{Analysis, Analyzer, DEFAULT_TOP_WORDS};
use crate::error::FluentError;
use crate::movie::{self, MovieInfo};
use crate::parser::Parser;
use crate::srt;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

pub struct ProcessOpts {
    pub include_stopwords: bool,
    pub top_words: usize,
}

impl Default for ProcessOpts {
    fn default() -> Self {
        Self {
            include_stopwords: false,
            top_words: DEFAULT_TOP_WORDS,
        }
    }
}

/// The outcome of processing one subtitle file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub file_path: PathBuf,
    pub encoding: Option<&'static str>,
    pub subtitle_count: usize,
    pub skipped_blocks: usize,
    pub first_subtitle: String,
    pub last_subtitle: String,
    pub movie: MovieInfo,
    pub analysis: Analysis,
}

pub fn process_file<P: AsRef<Path>>(path: P, opts: &ProcessOpts) -> Result<FileReport> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FluentError::FileNotFound(path.to_path_buf()).into());
    }
    if !has_srt_extension(path) {
        warn!("File does not have .srt extension: '{}'", path.display());
    }

    let report = Parser::new()
        .parse_file(path)
        .with_context(|| format!("Failed to parse SRT file: '{}'", path.display()))?;
    let (first, last) = match (report.records.first(), report.records.last()) {
        (Some(first), Some(last)) => (first.cleaned_text.clone(), last.cleaned_text.clone()),
        _ => return Err(FluentError::NoSubtitles(path.to_path_buf()).into()),
    };
    info!(
        "Parsed {} subtitle entries from '{}' ({} skipped)",
        report.records.len(),
        path.display(),
        report.skipped.len()
    );

    let analysis = Analyzer::new()
        .include_stopwords(opts.include_stopwords)
        .top(opts.top_words)
        .analyze(&srt::full_text(&report.records));

    Ok(FileReport {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_path: path.to_path_buf(),
        encoding: report.encoding,
        subtitle_count: report.records.len(),
        skipped_blocks: report.skipped.len(),
        first_subtitle: first,
        last_subtitle: last,
        movie: movie::from_filename(path),
        analysis,
    })
}

pub fn has_srt_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("srt"))
}

/// The `.srt` files directly inside `dir`, sorted by name.
pub fn srt_files_in<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(FluentError::NotADirectory(dir.to_path_buf()).into());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && has_srt_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SUBS: &str = "1\n00:00:01,000 --> 00:00:02,000\nThe cat sat.\n\n\
                        2\n00:00:03,000 --> 00:00:04,000\n<i>The cat ran.</i>\n\n\
                        x\nbroken\nblock\n";

    #[test]
    fn processes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cats.2019.srt");
        fs::write(&path, SUBS).unwrap();

        let report = process_file(&path, &ProcessOpts::default()).unwrap();
        assert_eq!(report.filename, "Cats.2019.srt");
        assert_eq!(report.subtitle_count, 2);
        assert_eq!(report.skipped_blocks, 1);
        assert_eq!(report.first_subtitle, "The cat sat.");
        assert_eq!(report.last_subtitle, "The cat ran.");
        assert_eq!(report.movie.title, "Cats");
        assert_eq!(report.movie.release_year, Some(2019));
        assert_eq!(report.analysis.total_words, 6);
        assert_eq!(report.analysis.total_sentences, 2);
        assert_eq!(report.analysis.word_frequencies["cat"], 2);
    }

    #[test]
    fn missing_file_fails() {
        let err = process_file("/definitely/not/here.srt", &ProcessOpts::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FluentError>(),
            Some(FluentError::FileNotFound(_))
        ));
    }

    #[test]
    fn file_without_cues_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.srt");
        fs::write(&path, "not\nreally\nsubtitles\n").unwrap();

        let err = process_file(&path, &ProcessOpts::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FluentError>(),
            Some(FluentError::NoSubtitles(_))
        ));
    }

    #[test]
    fn lists_srt_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.srt", "a.SRT", "notes.txt"] {
            fs::write(dir.path().join(name), SUBS).unwrap();
        }
        fs::create_dir(dir.path().join("nested.srt")).unwrap();

        let files = srt_files_in(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.SRT", "b.srt"]);
    }

    #[test]
    fn listing_a_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(srt_files_in(file.path()).is_err());
    }
}
