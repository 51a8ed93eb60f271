use std::collections::HashMap;

use super::{MatchOutcome, Matcher, Symbol};

/// Rightmost offset-from-end of every symbol in a pattern.
///
/// For a pattern of length `m`, a symbol whose last occurrence is at index `i` maps to
/// `m - i - 1`. Symbols that never appear map to `m`.
#[derive(Debug, Clone)]
pub struct BadCharTable<S: Symbol> {
    offsets: HashMap<S, usize>,
    len: usize,
}

impl<S: Symbol> BadCharTable<S> {
    /// Builds the table for `pattern`; later occurrences overwrite earlier ones
    pub fn build(pattern: &[S]) -> Self {
        let len = pattern.len();
        let mut offsets = HashMap::with_capacity(len);
        for (i, &symbol) in pattern.iter().enumerate() {
            offsets.insert(symbol, len - i - 1);
        }
        Self { offsets, len }
    }

    /// Distance from the pattern end to the rightmost `symbol`, or the pattern length
    pub fn offset(&self, symbol: S) -> usize {
        self.offsets.get(&symbol).copied().unwrap_or(self.len)
    }

    /// Window advance after `symbol` mismatched against `pattern[mismatch_index]`.
    ///
    /// Lines the rightmost occurrence of `symbol` up with the mismatching text position, or
    /// moves the window past it when the symbol is absent. Never less than 1.
    pub fn shift(&self, symbol: S, mismatch_index: usize) -> usize {
        let already_checked = self.len - 1 - mismatch_index;
        self.offset(symbol).saturating_sub(already_checked).max(1)
    }

    pub fn pattern_len(&self) -> usize {
        self.len
    }
}

/// Boyer-Moore with the bad-character rule only
#[derive(Debug, Clone, Copy, Default)]
pub struct BoyerMoore;

impl Matcher for BoyerMoore {
    fn find<S: Symbol>(&self, text: &[S], pattern: &[S]) -> MatchOutcome {
        search(text, pattern)
    }
}

/// Scans windows left to right, comparing each window right to left.
///
/// Every symbol test counts once; a fully matched window adds nothing beyond its `m` tests.
pub fn search<S: Symbol>(text: &[S], pattern: &[S]) -> MatchOutcome {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return MatchOutcome::found(0, 0);
    }
    if m > n {
        return MatchOutcome::not_found(0);
    }

    let table = BadCharTable::build(pattern);
    let mut comparisons = 0u64;
    let mut i = 0;

    while i <= n - m {
        // `j` counts the symbols still unchecked in this window
        let mut j = m;
        while j > 0 && pattern[j - 1] == text[i + j - 1] {
            j -= 1;
            comparisons += 1;
        }

        if j == 0 {
            return MatchOutcome::found(i, comparisons);
        }

        comparisons += 1;
        let mismatch = j - 1;
        i += table.shift(text[i + mismatch], mismatch);
    }

    MatchOutcome::not_found(comparisons)
}
