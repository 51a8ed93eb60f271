/// This module implements the three substring-search algorithms and the comparison-counting
/// protocol they share.
///
/// # The Measurement Protocol
///
/// Every matcher answers the same question, "where does `pattern` first occur in `text`?",
/// and reports how much work it did to find out:
/// ```rust,ignore
/// let outcome = Algorithm::Kmp.search(&text, &pattern);
/// assert_eq!(outcome.position, Some(10));
/// println!("{} comparisons", outcome.comparisons);
/// ```
///
/// The comparison count is deterministic for a given `(text, pattern)` pair. Each call builds
/// its own preprocessing structure (bad-character table, prefix function, rolling hash) and
/// drops it on return, so repeated timed calls never share state and always report the same
/// count.
///
/// # Conventions Shared by All Matchers
///
/// 1. **Empty pattern** matches at position 0 with zero comparisons
/// 2. **Pattern longer than text** is not found; no special casing is needed beyond loop bounds
/// 3. **Multiple occurrences** always report the leftmost one
///
/// # Symbols
///
/// Matchers are generic over the element type. `char` searches code points (the unit a reader
/// sees as a "character"), `u8` searches raw bytes:
/// ```rust,ignore
/// let chars: Vec<char> = "hello world".chars().collect();
/// boyer_moore::search(&chars, &['w', 'o']);
/// boyer_moore::search(b"hello world", b"wo");
/// ```
pub mod boyer_moore;
pub mod kmp;
pub mod rabin_karp;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::errors::BenchError;

pub use boyer_moore::{BadCharTable, BoyerMoore};
pub use kmp::{prefix_function, Kmp};
pub use rabin_karp::{RabinKarp, RollingHash};

/// An element of a searchable sequence
pub trait Symbol: Copy + Eq + Hash {
    /// Numeric value fed into the rolling hash
    fn code(self) -> u32;
}

impl Symbol for u8 {
    fn code(self) -> u32 {
        u32::from(self)
    }
}

impl Symbol for char {
    fn code(self) -> u32 {
        u32::from(self)
    }
}

/// Result of a single search: where the pattern was found and how many symbol or hash
/// comparisons it took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Start of the leftmost occurrence, `None` when the pattern does not occur
    pub position: Option<usize>,
    /// Elementary comparisons performed by the scan
    pub comparisons: u64,
}

impl MatchOutcome {
    pub fn found(position: usize, comparisons: u64) -> Self {
        Self {
            position: Some(position),
            comparisons,
        }
    }

    pub fn not_found(comparisons: u64) -> Self {
        Self {
            position: None,
            comparisons,
        }
    }

    pub fn is_found(&self) -> bool {
        self.position.is_some()
    }

    /// Position encoded with `-1` for "not found"
    pub fn sentinel_position(&self) -> i64 {
        self.position.map_or(-1, |p| p as i64)
    }
}

/// A substring-search algorithm that counts its comparisons
pub trait Matcher {
    /// Finds the leftmost occurrence of `pattern` in `text`
    fn find<S: Symbol>(&self, text: &[S], pattern: &[S]) -> MatchOutcome;
}

/// The algorithms under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BoyerMoore,
    Kmp,
    RabinKarp,
}

impl Algorithm {
    /// All algorithms in report order
    pub const ALL: [Algorithm; 3] = [Algorithm::BoyerMoore, Algorithm::Kmp, Algorithm::RabinKarp];

    /// Human-readable name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BoyerMoore => "Boyer-Moore",
            Algorithm::Kmp => "Knuth-Morris-Pratt",
            Algorithm::RabinKarp => "Rabin-Karp",
        }
    }

    /// One-line description of the preprocessing the algorithm relies on
    pub fn technique(&self) -> &'static str {
        match self {
            Algorithm::BoyerMoore => "bad-character table",
            Algorithm::Kmp => "prefix function",
            Algorithm::RabinKarp => "rolling hash",
        }
    }

    pub fn search<S: Symbol>(&self, text: &[S], pattern: &[S]) -> MatchOutcome {
        match self {
            Algorithm::BoyerMoore => BoyerMoore.find(text, pattern),
            Algorithm::Kmp => Kmp.find(text, pattern),
            Algorithm::RabinKarp => RabinKarp.find(text, pattern),
        }
    }

    /// Searches code points of two string slices
    pub fn search_str(&self, text: &str, pattern: &str) -> MatchOutcome {
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        self.search(&text, &pattern)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boyer-moore" | "bm" => Ok(Algorithm::BoyerMoore),
            "kmp" | "knuth-morris-pratt" => Ok(Algorithm::Kmp),
            "rabin-karp" | "rk" => Ok(Algorithm::RabinKarp),
            other => Err(BenchError::invalid_input(format!(
                "Unknown algorithm: {}",
                other
            ))),
        }
    }
}
