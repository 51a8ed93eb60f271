/// This module holds the measurements of a benchmark run and the analysis built on top of them.
///
/// # Shape of a Report
///
/// ```text
/// BenchReport
/// └── SampleOutcome (one per sample text)
///     └── PatternOutcome (one per pattern)
///         └── AlgorithmRun (one per algorithm)
/// ```
///
/// Each `(sample, pattern)` pair is one "test". The summary ranks algorithms across all tests:
/// a test is won on time by the lowest mean wall time and on efficiency by the lowest
/// comparison count. Ties go to the algorithm listed first.
use serde::Serialize;
use std::path::PathBuf;

use crate::search::Algorithm;

/// One algorithm measured on one pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    /// Mean wall time of a single search, in microseconds
    pub avg_time_us: f64,
    pub comparisons: u64,
    pub position: Option<usize>,
}

/// All algorithms measured on one pattern of one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternOutcome {
    pub pattern: String,
    pub runs: Vec<AlgorithmRun>,
}

impl PatternOutcome {
    /// The run with the lowest mean time
    pub fn fastest(&self) -> Option<&AlgorithmRun> {
        self.runs
            .iter()
            .min_by(|a, b| a.avg_time_us.total_cmp(&b.avg_time_us))
    }

    /// The run with the fewest comparisons
    pub fn most_efficient(&self) -> Option<&AlgorithmRun> {
        self.runs.iter().min_by_key(|run| run.comparisons)
    }

    /// True when every algorithm reported the same position
    pub fn positions_agree(&self) -> bool {
        self.runs
            .windows(2)
            .all(|pair| pair[0].position == pair[1].position)
    }

    pub fn run(&self, algorithm: Algorithm) -> Option<&AlgorithmRun> {
        self.runs.iter().find(|run| run.algorithm == algorithm)
    }
}

/// All patterns measured on one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOutcome {
    pub name: String,
    pub path: PathBuf,
    /// Sample length in characters
    pub text_len: usize,
    pub patterns: Vec<PatternOutcome>,
}

/// The complete benchmark results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    /// Timed repetitions behind every mean
    pub iterations: usize,
    pub algorithms: Vec<Algorithm>,
    pub samples: Vec<SampleOutcome>,
}

/// Aggregates for one algorithm over every test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub algorithm: Algorithm,
    pub total_time_us: f64,
    pub total_comparisons: u64,
    pub avg_time_us: f64,
    pub avg_comparisons: f64,
    pub wins_time: usize,
    pub wins_comparisons: usize,
}

/// Cross-test analysis of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub test_count: usize,
    pub algorithms: Vec<AlgorithmSummary>,
    /// Lowest total time
    pub fastest_overall: Option<Algorithm>,
    /// Fewest total comparisons
    pub most_efficient_overall: Option<Algorithm>,
}

impl BenchReport {
    /// Creates an empty report
    pub fn new(iterations: usize, algorithms: Vec<Algorithm>) -> Self {
        Self {
            iterations,
            algorithms,
            samples: Vec::new(),
        }
    }

    pub fn add_sample(&mut self, sample: SampleOutcome) {
        self.samples.push(sample);
    }

    /// Every (sample, pattern) test in report order
    pub fn tests(&self) -> impl Iterator<Item = &PatternOutcome> {
        self.samples.iter().flat_map(|s| s.patterns.iter())
    }

    pub fn test_count(&self) -> usize {
        self.tests().count()
    }

    /// Totals, averages and wins per algorithm
    pub fn summary(&self) -> Summary {
        let mut algorithms: Vec<AlgorithmSummary> = self
            .algorithms
            .iter()
            .map(|&algorithm| AlgorithmSummary {
                algorithm,
                total_time_us: 0.0,
                total_comparisons: 0,
                avg_time_us: 0.0,
                avg_comparisons: 0.0,
                wins_time: 0,
                wins_comparisons: 0,
            })
            .collect();

        let mut test_count = 0;
        for test in self.tests() {
            test_count += 1;

            for entry in algorithms.iter_mut() {
                if let Some(run) = test.run(entry.algorithm) {
                    entry.total_time_us += run.avg_time_us;
                    entry.total_comparisons += run.comparisons;
                }
            }

            if let Some(fastest) = test.fastest() {
                if let Some(entry) = algorithms
                    .iter_mut()
                    .find(|e| e.algorithm == fastest.algorithm)
                {
                    entry.wins_time += 1;
                }
            }
            if let Some(efficient) = test.most_efficient() {
                if let Some(entry) = algorithms
                    .iter_mut()
                    .find(|e| e.algorithm == efficient.algorithm)
                {
                    entry.wins_comparisons += 1;
                }
            }
        }

        if test_count > 0 {
            for entry in algorithms.iter_mut() {
                entry.avg_time_us = entry.total_time_us / test_count as f64;
                entry.avg_comparisons = entry.total_comparisons as f64 / test_count as f64;
            }
        }

        let (fastest_overall, most_efficient_overall) = if test_count == 0 {
            (None, None)
        } else {
            (
                algorithms
                    .iter()
                    .min_by(|a, b| a.total_time_us.total_cmp(&b.total_time_us))
                    .map(|e| e.algorithm),
                algorithms
                    .iter()
                    .min_by_key(|e| e.total_comparisons)
                    .map(|e| e.algorithm),
            )
        };

        Summary {
            test_count,
            algorithms,
            fastest_overall,
            most_efficient_overall,
        }
    }
}
