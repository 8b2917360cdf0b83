use std::error::Error;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FluentError {
    FileNotFound(PathBuf),
    NoSubtitles(PathBuf),
    NotADirectory(PathBuf),
}

impl Error for FluentError {}

impl fmt::Display for FluentError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FluentError::FileNotFound(path) => write!(fmt, "File not found: '{}'", path.display()),
            FluentError::NoSubtitles(path) => write!(
                fmt,
                "No subtitles were parsed from '{}'. Please check the file and try again.",
                path.display()
            ),
            FluentError::NotADirectory(path) => {
                write!(fmt, "Not a directory: '{}'", path.display())
            }
        }
    }
}
