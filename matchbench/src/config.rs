use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{BenchError, BenchResult};
use crate::search::Algorithm;

/// Configuration for a benchmark run.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.matchbench.yaml` in the current directory
/// 3. Global `$HOME/.config/matchbench/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Sample texts to search
/// sample_paths:
///   - "articles/article1.txt"
///   - "articles/article2.txt"
///
/// # Directory scanned for more samples
/// sample_dir: "corpus"
/// file_extensions: ["txt", "md"]
/// ignore_patterns: ["**/drafts/**"]
///
/// # Patterns expected to occur, and patterns expected not to
/// present_patterns: ["algorithm", "structure"]
/// absent_patterns: ["nonexistent"]
///
/// algorithms: ["boyer-moore", "kmp", "rabin-karp"]
///
/// # Timed repetitions per search
/// iterations: 100
///
/// # Thread count (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
///
/// # How to handle invalid UTF-8 (failfast, lossy)
/// encoding_mode: "lossy"
///
/// # Markdown report destination
/// report_path: "algorithm_comparison_report.md"
/// ```
///
/// # CLI Integration
///
/// When using the CLI, command-line arguments take precedence over config file values.
/// The merging behavior is defined in the `merge_with_cli` method, which takes the flags as
/// `CliOverrides`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Explicit sample files
    pub sample_paths: Vec<PathBuf>,

    /// Directory walked for additional sample files
    pub sample_dir: Option<PathBuf>,

    /// Extensions accepted when walking `sample_dir`; None accepts every text file
    pub file_extensions: Option<Vec<String>>,

    /// Glob patterns excluded when walking `sample_dir`
    pub ignore_patterns: Vec<String>,

    /// Patterns expected to occur in the samples
    pub present_patterns: Vec<String>,

    /// Patterns expected not to occur in the samples
    pub absent_patterns: Vec<String>,

    /// Algorithms to compare, in report order
    pub algorithms: Vec<Algorithm>,

    /// Timed repetitions of every search
    pub iterations: NonZeroUsize,

    /// Number of threads measuring patterns concurrently
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// How to handle invalid UTF-8 sequences in samples
    pub encoding_mode: EncodingMode,

    /// Where to write the Markdown report, if anywhere
    pub report_path: Option<PathBuf>,

    /// Whether to draw a progress bar while measuring
    pub show_progress: bool,
}

/// How invalid UTF-8 in a sample is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Reject the sample with an encoding error
    FailFast,
    /// Drop invalid sequences and keep going
    #[default]
    Lossy,
}

pub(crate) fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

pub(crate) fn default_iterations() -> NonZeroUsize {
    NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_present_patterns() -> Vec<String> {
    ["algorithm", "structure", "data", "search"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_absent_patterns() -> Vec<String> {
    ["missing", "nonexistent"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_extensions() -> Option<Vec<String>> {
    Some(vec!["txt".to_string(), "md".to_string()])
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sample_paths: Vec::new(),
            sample_dir: None,
            file_extensions: default_extensions(),
            ignore_patterns: Vec::new(),
            present_patterns: default_present_patterns(),
            absent_patterns: default_absent_patterns(),
            algorithms: Algorithm::ALL.to_vec(),
            iterations: default_iterations(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            encoding_mode: EncodingMode::default(),
            report_path: None,
            show_progress: false,
        }
    }
}

impl BenchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file layered over the default locations
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("matchbench/config.yaml")),
            Some(PathBuf::from(".matchbench.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicit file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Serializes the configuration in the same YAML layout `load_from` reads
    pub fn to_yaml(&self) -> BenchResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the configuration as YAML, refusing to replace an existing file unless `overwrite`
    pub fn save_to(&self, path: &Path, overwrite: bool) -> BenchResult<()> {
        if path.exists() && !overwrite {
            return Err(BenchError::config_error(format!(
                "{} already exists",
                path.display()
            )));
        }
        std::fs::write(path, self.to_yaml()?).map_err(|e| BenchError::from_io(e, path))
    }

    /// Every pattern to measure: present ones first, then absent ones
    pub fn patterns(&self) -> Vec<String> {
        self.present_patterns
            .iter()
            .chain(self.absent_patterns.iter())
            .cloned()
            .collect()
    }

    /// Merges CLI arguments with configuration file values.
    ///
    /// Every flag the user passed wins, even when its value equals the built-in default.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if !cli.sample_paths.is_empty() {
            self.sample_paths = cli.sample_paths;
        }
        if cli.sample_dir.is_some() {
            self.sample_dir = cli.sample_dir;
        }
        if let Some(extensions) = cli.file_extensions {
            self.file_extensions = Some(extensions);
        }
        if !cli.ignore_patterns.is_empty() {
            self.ignore_patterns = cli.ignore_patterns;
        }
        if let Some(patterns) = cli.present_patterns {
            self.present_patterns = patterns;
        }
        if let Some(patterns) = cli.absent_patterns {
            self.absent_patterns = patterns;
        }
        if let Some(algorithms) = cli.algorithms {
            self.algorithms = algorithms;
        }
        if let Some(iterations) = cli.iterations {
            self.iterations = iterations;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        if let Some(encoding_mode) = cli.encoding_mode {
            self.encoding_mode = encoding_mode;
        }
        if cli.report_path.is_some() {
            self.report_path = cli.report_path;
        }
        if cli.show_progress {
            self.show_progress = true;
        }
        self
    }
}

/// Settings given on the command line; `None` or empty means the flag was not passed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub sample_paths: Vec<PathBuf>,
    pub sample_dir: Option<PathBuf>,
    pub file_extensions: Option<Vec<String>>,
    pub ignore_patterns: Vec<String>,
    pub present_patterns: Option<Vec<String>>,
    pub absent_patterns: Option<Vec<String>>,
    pub algorithms: Option<Vec<Algorithm>>,
    pub iterations: Option<NonZeroUsize>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
    pub encoding_mode: Option<EncodingMode>,
    pub report_path: Option<PathBuf>,
    pub show_progress: bool,
}
