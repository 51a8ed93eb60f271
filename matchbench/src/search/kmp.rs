use super::{MatchOutcome, Matcher, Symbol};

/// Computes the prefix function of `pattern`.
///
/// `pi[i]` is the length of the longest proper prefix of `pattern[..=i]` that is also a
/// suffix of it, so `pi[0] == 0` and `pi[i] <= i`.
pub fn prefix_function<S: Symbol>(pattern: &[S]) -> Vec<usize> {
    let m = pattern.len();
    let mut pi = vec![0; m];
    let mut j = 0;

    for i in 1..m {
        while j > 0 && pattern[i] != pattern[j] {
            j = pi[j - 1];
        }
        if pattern[i] == pattern[j] {
            j += 1;
        }
        pi[i] = j;
    }

    pi
}

/// Knuth-Morris-Pratt
#[derive(Debug, Clone, Copy, Default)]
pub struct Kmp;

impl Matcher for Kmp {
    fn find<S: Symbol>(&self, text: &[S], pattern: &[S]) -> MatchOutcome {
        search(text, pattern)
    }
}

/// Single left-to-right pass over `text`.
///
/// Only the scan is counted: each fallback step counts one, and every text position counts
/// one more for its final equality test. Building the prefix function is free.
pub fn search<S: Symbol>(text: &[S], pattern: &[S]) -> MatchOutcome {
    let m = pattern.len();

    if m == 0 {
        return MatchOutcome::found(0, 0);
    }

    let pi = prefix_function(pattern);
    let mut comparisons = 0u64;
    let mut j = 0;

    for (i, &symbol) in text.iter().enumerate() {
        while j > 0 && symbol != pattern[j] {
            j = pi[j - 1];
            comparisons += 1;
        }

        comparisons += 1;
        if symbol == pattern[j] {
            j += 1;
        }

        if j == m {
            return MatchOutcome::found(i + 1 - m, comparisons);
        }
    }

    MatchOutcome::not_found(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_prefix_function_textbook() {
        assert_eq!(
            prefix_function(&chars("ababaca")),
            vec![0, 0, 1, 2, 3, 0, 1]
        );
    }

    #[test]
    fn test_prefix_function_shapes() {
        assert!(prefix_function::<char>(&[]).is_empty());
        assert_eq!(prefix_function(&chars("a")), vec![0]);
        assert_eq!(prefix_function(&chars("aaaa")), vec![0, 1, 2, 3]);
        assert_eq!(prefix_function(&chars("abcd")), vec![0, 0, 0, 0]);
        assert_eq!(
            prefix_function(&chars("ABABCABAB")),
            vec![0, 0, 1, 2, 0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_prefix_function_bounds() {
        let pi = prefix_function(b"abaababaabaab");
        assert_eq!(pi[0], 0);
        for (i, &value) in pi.iter().enumerate() {
            assert!(value <= i);
        }
    }

    #[test]
    fn test_exact_comparison_counts() {
        assert_eq!(
            search(&chars("ABABDABACDABABCABAB"), &chars("ABABCABAB")),
            MatchOutcome::found(10, 23)
        );
        assert_eq!(
            search(&chars("AAAAAAAAAA"), &chars("AAA")),
            MatchOutcome::found(0, 3)
        );
        assert_eq!(
            search(&chars("hello world"), &chars("xyz")),
            MatchOutcome::not_found(11)
        );
        assert_eq!(
            search(&chars("hello world"), &chars("world")),
            MatchOutcome::found(6, 11)
        );
    }

    #[test]
    fn test_pattern_longer_than_text_scans_text() {
        assert_eq!(
            search(&chars("abc"), &chars("abcd")),
            MatchOutcome::not_found(3)
        );
        assert_eq!(search(&chars(""), &chars("a")), MatchOutcome::not_found(0));
    }
}
