use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::corpus::{load_samples, Sample};
use crate::errors::{BenchError, BenchResult};
use crate::metrics::BenchMetrics;
use crate::results::{AlgorithmRun, BenchReport, PatternOutcome, SampleOutcome};
use crate::search::{Algorithm, MatchOutcome};

/// Runs the configured benchmark: every sample, every pattern, every algorithm
pub fn run(config: &BenchConfig) -> BenchResult<BenchReport> {
    let metrics = BenchMetrics::new();
    run_with_metrics(config, &metrics)
}

/// Like `run`, recording into caller-owned metrics
pub fn run_with_metrics(config: &BenchConfig, metrics: &BenchMetrics) -> BenchResult<BenchReport> {
    let patterns = config.patterns();
    info!("Starting benchmark with patterns: {:?}", patterns);

    let mut report = BenchReport::new(config.iterations.get(), config.algorithms.clone());

    if patterns.is_empty() || config.algorithms.is_empty() {
        debug!("No patterns or algorithms configured, returning empty report");
        return Ok(report);
    }

    let started = Instant::now();
    let samples = load_samples(config, metrics)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()
        .map_err(|e| BenchError::config_error(format!("Failed to build thread pool: {}", e)))?;

    let mut harness = Harness::new(&config.algorithms, config.iterations, metrics);
    if config.show_progress {
        harness = harness.with_progress((samples.len() * patterns.len()) as u64);
    }

    for sample in &samples {
        debug!("Measuring {} ({} characters)", sample.name, sample.len());
        let outcome = pool.install(|| harness.measure_sample(sample, &patterns));
        report.add_sample(outcome);
    }

    harness.finish();
    metrics.log_stats();

    info!(
        "Benchmark complete in {}: {} tests over {} samples",
        humantime::format_duration(started.elapsed()),
        report.test_count(),
        report.samples.len()
    );

    Ok(report)
}

/// Times searches and collects their outcomes
pub struct Harness<'a> {
    algorithms: &'a [Algorithm],
    iterations: NonZeroUsize,
    metrics: &'a BenchMetrics,
    progress: ProgressBar,
}

impl<'a> Harness<'a> {
    pub fn new(
        algorithms: &'a [Algorithm],
        iterations: NonZeroUsize,
        metrics: &'a BenchMetrics,
    ) -> Self {
        Self {
            algorithms,
            iterations,
            metrics,
            progress: ProgressBar::hidden(),
        }
    }

    /// Shows a progress bar counting measured patterns
    pub fn with_progress(mut self, total: u64) -> Self {
        let progress = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} patterns")
        {
            progress.set_style(style.progress_chars("=>-"));
        }
        self.progress = progress;
        self
    }

    pub fn finish(&self) {
        self.progress.finish_and_clear();
    }

    /// Measures every pattern against one sample, in parallel on the current rayon pool
    pub fn measure_sample(&self, sample: &Sample, patterns: &[String]) -> SampleOutcome {
        let outcomes: Vec<PatternOutcome> = patterns
            .par_iter()
            .map(|pattern| {
                let outcome = self.measure_pattern(&sample.text, pattern);
                self.progress.inc(1);
                outcome
            })
            .collect();

        SampleOutcome {
            name: sample.name.clone(),
            path: sample.path.clone(),
            text_len: sample.len(),
            patterns: outcomes,
        }
    }

    /// Measures every algorithm on one pattern
    pub fn measure_pattern(&self, text: &[char], pattern: &str) -> PatternOutcome {
        let needle: Vec<char> = pattern.chars().collect();
        let runs: Vec<AlgorithmRun> = self
            .algorithms
            .iter()
            .map(|&algorithm| self.measure(algorithm, text, &needle))
            .collect();

        let outcome = PatternOutcome {
            pattern: pattern.to_string(),
            runs,
        };

        if !outcome.positions_agree() {
            warn!(
                "Algorithms disagree on '{}': {:?}",
                pattern,
                outcome
                    .runs
                    .iter()
                    .map(|r| (r.algorithm, r.position))
                    .collect::<Vec<_>>()
            );
        }

        outcome
    }

    /// Runs one algorithm `iterations` times and averages its wall time
    pub fn measure(&self, algorithm: Algorithm, text: &[char], pattern: &[char]) -> AlgorithmRun {
        let (outcome, mut total) = self.timed(algorithm, text, pattern);

        for _ in 1..self.iterations.get() {
            let (repeat, elapsed) = self.timed(algorithm, text, pattern);
            total += elapsed;
            if repeat != outcome {
                warn!(
                    "{} returned {:?} after {:?} for the same input",
                    algorithm, repeat, outcome
                );
            }
        }

        let avg_time_us = total.as_secs_f64() * 1_000_000.0 / self.iterations.get() as f64;
        debug!(
            "{}: position {:?}, {} comparisons, {:.2} µs",
            algorithm, outcome.position, outcome.comparisons, avg_time_us
        );

        AlgorithmRun {
            algorithm,
            avg_time_us,
            comparisons: outcome.comparisons,
            position: outcome.position,
        }
    }

    fn timed(
        &self,
        algorithm: Algorithm,
        text: &[char],
        pattern: &[char],
    ) -> (MatchOutcome, Duration) {
        let start = Instant::now();
        let outcome = black_box(algorithm.search(black_box(text), black_box(pattern)));
        let elapsed = start.elapsed();
        self.metrics.record_search(&outcome, text.len());
        (outcome, elapsed)
    }
}
