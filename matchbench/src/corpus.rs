use glob::Pattern;
use ignore::WalkBuilder;
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::config::{BenchConfig, EncodingMode};
use crate::errors::{BenchError, BenchResult};
use crate::metrics::BenchMetrics;

/// Samples at or above this size are memory-mapped instead of read into a buffer
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

const BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "obj", "o", "class", "jar", "png", "jpg", "jpeg", "gif",
    "bmp", "ico", "pdf", "doc", "docx", "xls", "xlsx", "zip", "tar", "gz", "7z", "rar",
];

/// A text to be searched, decoded into code points once
#[derive(Debug, Clone)]
pub struct Sample {
    /// Display name (the file name)
    pub name: String,
    pub path: PathBuf,
    pub text: Vec<char>,
}

impl Sample {
    /// Builds an in-memory sample, mostly useful for tests and benches
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            text: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Decides which files found while walking a directory count as samples
#[derive(Debug)]
pub struct SampleFilter {
    extensions: Option<Vec<String>>,
    ignore: Vec<Pattern>,
}

impl SampleFilter {
    pub fn new(extensions: Option<Vec<String>>, ignore_patterns: &[String]) -> BenchResult<Self> {
        let ignore = ignore_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    BenchError::config_error(format!("Invalid ignore pattern '{}': {}", p, e))
                })
            })
            .collect::<BenchResult<Vec<_>>>()?;
        Ok(Self { extensions, ignore })
    }

    pub fn accepts(&self, path: &Path) -> bool {
        let extension = path.extension().and_then(|e| e.to_str());

        if let Some(ext) = extension {
            if BINARY_EXTENSIONS.iter().any(|b| b.eq_ignore_ascii_case(ext)) {
                return false;
            }
        }

        let extension_ok = match (&self.extensions, extension) {
            (None, _) => true,
            (Some(exts), Some(ext)) => exts.iter().any(|e| e.eq_ignore_ascii_case(ext)),
            (Some(_), None) => false,
        };
        if !extension_ok {
            return false;
        }

        let normalized = path.to_string_lossy().replace('\\', "/");
        !self.ignore.iter().any(|p| p.matches(&normalized))
    }
}

/// Lists sample files: explicit paths first, then matching files under `sample_dir`.
///
/// Duplicates are dropped and the result is sorted so runs are reproducible.
pub fn discover_samples(config: &BenchConfig) -> BenchResult<Vec<PathBuf>> {
    let mut paths = config.sample_paths.clone();

    if let Some(dir) = &config.sample_dir {
        if !dir.is_dir() {
            return Err(BenchError::file_not_found(dir));
        }

        let filter = SampleFilter::new(config.file_extensions.clone(), &config.ignore_patterns)?;
        let mut walker = WalkBuilder::new(dir);
        walker.hidden(true).git_ignore(true);

        let found = walker
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| filter.accepts(path));
        paths.extend(found);
    }

    paths.sort();
    paths.dedup();
    debug!("Found {} sample files", paths.len());
    Ok(paths)
}

/// Decodes raw sample bytes according to the encoding mode
fn decode_bytes<'a>(
    bytes: &'a [u8],
    path: &Path,
    encoding_mode: EncodingMode,
) -> BenchResult<Cow<'a, str>> {
    match encoding_mode {
        EncodingMode::FailFast => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| BenchError::encoding_error(path, e)),
        EncodingMode::Lossy => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Cow::Borrowed(text)),
            Err(_) => {
                warn!("Invalid UTF-8 dropped from sample: {}", path.display());
                Ok(Cow::Owned(strip_invalid_utf8(bytes)))
            }
        },
    }
}

/// Keeps every valid UTF-8 sequence and skips the invalid bytes between them
fn strip_invalid_utf8(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, invalid) = rest.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    text.push_str(valid);
                }
                // A truncated sequence at the end has no error length
                let skip = e.error_len().unwrap_or(invalid.len());
                rest = &invalid[skip..];
            }
        }
    }

    text
}

fn sample_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads and decodes a single sample file
pub fn load_sample(
    path: &Path,
    encoding_mode: EncodingMode,
    metrics: &BenchMetrics,
) -> BenchResult<Sample> {
    let file = File::open(path).map_err(|e| BenchError::from_io(e, path))?;
    let size = file.metadata()?.len();

    let text = if size >= LARGE_FILE_THRESHOLD {
        trace!("Memory-mapping sample: {}", path.display());
        let mmap = unsafe { Mmap::map(&file) }.map_err(BenchError::IoError)?;
        metrics.record_sample_load(size, true);
        let text: Vec<char> = decode_bytes(&mmap, path, encoding_mode)?.chars().collect();
        text
    } else {
        trace!("Reading sample: {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| BenchError::from_io(e, path))?;
        metrics.record_sample_load(size, false);
        let text: Vec<char> = decode_bytes(&bytes, path, encoding_mode)?.chars().collect();
        text
    };

    Ok(Sample {
        name: sample_name(path),
        path: path.to_path_buf(),
        text,
    })
}

/// Discovers and loads every configured sample
pub fn load_samples(config: &BenchConfig, metrics: &BenchMetrics) -> BenchResult<Vec<Sample>> {
    let paths = discover_samples(config)?;
    if paths.is_empty() {
        return Err(BenchError::NoSamples);
    }

    paths
        .iter()
        .map(|path| load_sample(path, config.encoding_mode, metrics))
        .collect()
}
