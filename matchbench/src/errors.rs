/// This module defines the error types for matchbench.
///
/// # What Can Fail
///
/// The matchers themselves never fail: every `(text, pattern)` pair, including an
/// empty pattern or a pattern longer than the text, produces a `MatchOutcome`.
/// Errors only come from the layers around them:
///
/// 1. **Sample acquisition** - missing files, permission problems, invalid UTF-8
/// 2. **Configuration** - unreadable or malformed config files, bad CLI values
/// 3. **Report output** - I/O and JSON serialization failures
///
/// ```rust,ignore
/// match run(&config) {
///     Ok(report) => // Render report,
///     Err(BenchError::NoSamples) => // Nothing to measure,
///     Err(BenchError::FileNotFound(path)) => // Handle missing sample,
///     Err(e) => // Handle other errors
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for benchmark operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that can occur while loading samples or producing reports
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("No sample texts to search")]
    NoSamples,
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid UTF-8 in file {path}: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::str::Utf8Error,
    },
}

impl BenchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::EncodingError {
            path: path.into(),
            source,
        }
    }

    /// Maps an I/O error raised while opening `path` to the matching variant
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}
