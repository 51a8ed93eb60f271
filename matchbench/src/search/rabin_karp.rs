//! Rabin-Karp over a deliberately small modulus.
//!
//! With `MODULUS = 101` different windows share a hash all the time, so a hash hit is only
//! a candidate: it is confirmed symbol by symbol before a match is reported.

use super::{MatchOutcome, Matcher, Symbol};

/// Polynomial base, one step per possible byte value
pub const BASE: i64 = 256;

/// Hash modulus
pub const MODULUS: i64 = 101;

/// Polynomial hash of a fixed-length window, updated in O(1) per slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingHash {
    value: i64,
    high_power: i64,
}

impl RollingHash {
    /// Hashes `window` with Horner's rule
    pub fn fingerprint<S: Symbol>(window: &[S]) -> i64 {
        window
            .iter()
            .fold(0, |hash, &symbol| (BASE * hash + i64::from(symbol.code())) % MODULUS)
    }

    /// `BASE^(len - 1) mod MODULUS`, the weight of the outgoing symbol
    pub fn high_power(len: usize) -> i64 {
        let mut h = 1;
        for _ in 1..len {
            h = (h * BASE) % MODULUS;
        }
        h
    }

    pub fn new<S: Symbol>(window: &[S]) -> Self {
        Self {
            value: Self::fingerprint(window),
            high_power: Self::high_power(window.len()),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Slides the window one symbol to the right
    pub fn roll<S: Symbol>(&mut self, outgoing: S, incoming: S) {
        let outgoing = i64::from(outgoing.code());
        let incoming = i64::from(incoming.code());
        let mut value = (BASE * (self.value - outgoing * self.high_power) + incoming) % MODULUS;
        if value < 0 {
            value += MODULUS;
        }
        self.value = value;
    }
}

/// Rabin-Karp with mandatory verification of every hash hit
#[derive(Debug, Clone, Copy, Default)]
pub struct RabinKarp;

impl Matcher for RabinKarp {
    fn find<S: Symbol>(&self, text: &[S], pattern: &[S]) -> MatchOutcome {
        search(text, pattern)
    }
}

/// Each window costs one hash comparison; a hash hit adds one per symbol verified, up to and
/// including the first mismatch.
pub fn search<S: Symbol>(text: &[S], pattern: &[S]) -> MatchOutcome {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return MatchOutcome::found(0, 0);
    }
    if m > n {
        return MatchOutcome::not_found(0);
    }

    let target = RollingHash::fingerprint(pattern);
    let mut window = RollingHash::new(&text[..m]);
    let mut comparisons = 0u64;

    for i in 0..=n - m {
        comparisons += 1;
        if window.value() == target {
            let mut j = 0;
            while j < m {
                comparisons += 1;
                if text[i + j] != pattern[j] {
                    break;
                }
                j += 1;
            }

            if j == m {
                return MatchOutcome::found(i, comparisons);
            }
        }

        if i < n - m {
            window.roll(text[i], text[i + m]);
        }
    }

    MatchOutcome::not_found(comparisons)
}
