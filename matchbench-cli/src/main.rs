use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use matchbench::{
    binary_search,
    config::EncodingMode,
    report::{describe_position, render_json, write_markdown},
    results::PatternOutcome,
    Algorithm, BenchConfig, BenchReport, CliOverrides, MatchOutcome,
};
use std::{fs, num::NonZeroUsize, path::PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 80;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliBenchConfig {
    /// Sample file to search (can be specified multiple times)
    #[arg(short = 'f', long = "file")]
    files: Vec<PathBuf>,

    /// Directory scanned for sample files
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// File extensions to include when scanning (e.g. txt,md)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Patterns to ignore when scanning (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Pattern expected to occur in the samples (can be specified multiple times)
    #[arg(short = 'p', long = "present")]
    present: Vec<String>,

    /// Pattern expected not to occur in the samples (can be specified multiple times)
    #[arg(short = 'a', long = "absent")]
    absent: Vec<String>,

    /// Algorithms to compare (boyer-moore,kmp,rabin-karp)
    #[arg(short = 'A', long = "algorithm", value_delimiter = ',')]
    algorithms: Vec<Algorithm>,

    /// Timed repetitions of every search
    #[arg(short = 'n', long)]
    iterations: Option<NonZeroUsize>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Write a Markdown report to this path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Show only the overall analysis
    #[arg(short, long)]
    stats: bool,

    /// Configuration file layered over the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How to handle invalid UTF-8 sequences (failfast|lossy)
    #[arg(long)]
    encoding: Option<String>,

    /// Draw a progress bar while measuring
    #[arg(long)]
    progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the algorithms on sample texts
    Bench(Box<CliBenchConfig>),

    /// Search a single text and report comparison counts
    Search {
        /// Text to search in
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Pattern to look for
        #[arg(short, long)]
        pattern: String,

        /// Run only this algorithm
        #[arg(short = 'A', long)]
        algorithm: Option<Algorithm>,
    },

    /// Binary search a sorted list of numbers
    #[command(allow_negative_numbers = true)]
    Bsearch {
        /// Sorted values, comma separated (e.g. 1.2,2.5,3.7)
        values: String,

        /// Value to look for
        target: f64,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Destination file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench(args) => run_bench(*args),
        Commands::Search {
            text,
            file,
            pattern,
            algorithm,
        } => {
            init_logging("warn");
            let text = match (text, file) {
                (_, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (Some(text), None) => text,
                (None, None) => bail!("Either a text or --file is required"),
            };
            run_search(&text, &pattern, algorithm);
            Ok(())
        }
        Commands::Bsearch { values, target } => {
            init_logging("warn");
            run_bsearch(&values, target)
        }
        Commands::InitConfig { output, force } => {
            let config = BenchConfig::default();
            match output {
                Some(path) => {
                    config
                        .save_to(&path, force)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Configuration written to {}", path.display());
                }
                None => print!("{}", config.to_yaml()?),
            }
            Ok(())
        }
    }
}

/// Installs the global subscriber; `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_bench(args: CliBenchConfig) -> Result<()> {
    let file_config =
        BenchConfig::load_from(args.config.as_deref()).context("Failed to load configuration")?;

    let encoding_mode = match args.encoding.as_deref().map(str::to_lowercase).as_deref() {
        None => None,
        Some("lossy") => Some(EncodingMode::Lossy),
        Some("failfast") => Some(EncodingMode::FailFast),
        Some(other) => bail!("Unknown encoding mode: {} (expected failfast or lossy)", other),
    };

    let file_extensions = args.extensions.map(|e| {
        e.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
    });

    let cli_overrides = CliOverrides {
        sample_paths: args.files,
        sample_dir: args.dir,
        file_extensions,
        ignore_patterns: args.ignore,
        present_patterns: non_empty(args.present),
        absent_patterns: non_empty(args.absent),
        algorithms: non_empty(args.algorithms),
        iterations: args.iterations,
        thread_count: args.threads,
        log_level: None,
        encoding_mode,
        report_path: args.report,
        show_progress: args.progress,
    };

    let config = file_config.merge_with_cli(cli_overrides);
    init_logging(&config.log_level);
    debug!("Effective configuration: {:?}", config);

    let report = matchbench::run(&config).context("Benchmark failed")?;

    if let Some(path) = &config.report_path {
        write_markdown(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if args.json {
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    if !args.stats {
        print_report(&report);
    }
    print_summary(&report);

    if let Some(path) = &config.report_path {
        println!("\nReport saved to {}", path.display().to_string().blue());
    }
    Ok(())
}

/// A repeatable flag that was never passed collects nothing
fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}

fn print_report(report: &BenchReport) {
    let names: Vec<_> = report.algorithms.iter().map(|a| a.name()).collect();

    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", "SUBSTRING SEARCH ALGORITHM COMPARISON".bold());
    println!("Algorithms: {}", names.join(", "));
    println!("{}", "=".repeat(RULE_WIDTH));

    for sample in &report.samples {
        println!("\n{}", sample.name.blue().bold());
        println!("Text size: {} characters", sample.text_len);
        println!("{}", "-".repeat(RULE_WIDTH));

        for pattern in &sample.patterns {
            print_pattern(pattern);
        }
    }
}

fn print_pattern(outcome: &PatternOutcome) {
    println!("\nPattern: '{}'", outcome.pattern.yellow());
    println!(
        "{:<25} {:<15} {:<15} Result",
        "Algorithm", "Time (µs)", "Comparisons"
    );
    println!("{}", "-".repeat(RULE_WIDTH));

    for run in &outcome.runs {
        println!(
            "{:<25} {:<15.2} {:<15} {}",
            run.algorithm.name(),
            run.avg_time_us,
            run.comparisons,
            describe_position(run.position)
        );
    }

    if !outcome.positions_agree() {
        println!("{}", "Warning: algorithms disagree on the position".red());
    }

    if let (Some(fastest), Some(efficient)) = (outcome.fastest(), outcome.most_efficient()) {
        println!(
            "\nFastest: {} ({:.2} µs)",
            fastest.algorithm.name().green(),
            fastest.avg_time_us
        );
        println!(
            "Most efficient: {} ({} comparisons)",
            efficient.algorithm.name().green(),
            efficient.comparisons
        );
    }
}

fn print_summary(report: &BenchReport) {
    let summary = report.summary();

    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", "OVERALL ANALYSIS".bold());
    println!("{}", "=".repeat(RULE_WIDTH));

    if summary.test_count == 0 {
        println!("No tests were run");
        return;
    }

    println!("Averages:");
    println!("{:<25} {:<15} {:<15}", "Algorithm", "Time (µs)", "Comparisons");
    println!("{}", "-".repeat(55));
    for entry in &summary.algorithms {
        println!(
            "{:<25} {:<15.2} {:<15.1}",
            entry.algorithm.name(),
            entry.avg_time_us,
            entry.avg_comparisons
        );
    }

    println!("\nWins by time:");
    for entry in &summary.algorithms {
        println!(
            "{}: {} of {}",
            entry.algorithm, entry.wins_time, summary.test_count
        );
    }

    println!("\nWins by comparisons:");
    for entry in &summary.algorithms {
        println!(
            "{}: {} of {}",
            entry.algorithm, entry.wins_comparisons, summary.test_count
        );
    }

    if let Some(fastest) = summary.fastest_overall {
        println!("\nFastest overall: {}", fastest.name().green().bold());
    }
    if let Some(efficient) = summary.most_efficient_overall {
        println!("Most efficient overall: {}", efficient.name().green().bold());
    }
}

fn run_search(text: &str, pattern: &str, algorithm: Option<Algorithm>) {
    let text: Vec<char> = text.chars().collect();
    let needle: Vec<char> = pattern.chars().collect();
    let algorithms = match algorithm {
        Some(algorithm) => vec![algorithm],
        None => Algorithm::ALL.to_vec(),
    };

    println!(
        "Searching for '{}' in {} characters",
        pattern.yellow(),
        text.len()
    );
    println!("{:<25} {:<15} Comparisons", "Algorithm", "Result");
    println!("{}", "-".repeat(55));

    for algorithm in algorithms {
        let outcome: MatchOutcome = algorithm.search(&text, &needle);
        println!(
            "{:<25} {:<15} {}",
            algorithm.name(),
            describe_position(outcome.position),
            outcome.comparisons
        );
    }
}

fn parse_values(values: &str) -> Result<Vec<f64>> {
    values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<f64>()
                .with_context(|| format!("Invalid number: {}", v))
        })
        .collect()
}

fn run_bsearch(values: &str, target: f64) -> Result<()> {
    let values = parse_values(values)?;
    if values.windows(2).any(|pair| pair[0] > pair[1]) {
        bail!("Values must be sorted in ascending order");
    }

    let probe = binary_search(&values, &target);
    match probe.position {
        Some(position) => println!(
            "Element {} found at position {}",
            target,
            position.to_string().green()
        ),
        None => println!("Element {} {}", target, "not found".red()),
    }
    println!("Iterations: {}", probe.iterations);
    Ok(())
}
