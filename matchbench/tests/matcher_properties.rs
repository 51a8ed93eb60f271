use matchbench::search::{boyer_moore, kmp, rabin_karp, Algorithm, MatchOutcome};
use proptest::prelude::*;

/// Leftmost occurrence by brute force
fn naive_find<S: PartialEq>(text: &[S], pattern: &[S]) -> Option<usize> {
    if pattern.is_empty() {
        return Some(0);
    }
    if pattern.len() > text.len() {
        return None;
    }
    (0..=text.len() - pattern.len()).find(|&i| &text[i..i + pattern.len()] == pattern)
}

fn small_alphabet() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abc".to_vec()), 0..64)
}

proptest! {
    #[test]
    fn all_algorithms_find_the_leftmost_occurrence(
        text in small_alphabet(),
        pattern in prop::collection::vec(prop::sample::select(b"abc".to_vec()), 1..6),
    ) {
        let expected = naive_find(&text, &pattern);
        for algorithm in Algorithm::ALL {
            prop_assert_eq!(algorithm.search(&text, &pattern).position, expected, "{}", algorithm);
        }
    }

    #[test]
    fn embedded_pattern_is_found_no_later_than_its_offset(
        prefix in "[a-zа-я ]{0,40}",
        pattern in "[a-zа-я]{1,8}",
        suffix in "[a-zа-я ]{0,40}",
    ) {
        let text: Vec<char> = format!("{}{}{}", prefix, pattern, suffix).chars().collect();
        let needle: Vec<char> = pattern.chars().collect();
        let offset = prefix.chars().count();

        for algorithm in Algorithm::ALL {
            let position = algorithm.search(&text, &needle).position;
            prop_assert!(position.is_some_and(|p| p <= offset), "{}: {:?}", algorithm, position);
            prop_assert_eq!(position, naive_find(&text, &needle));
        }
    }

    #[test]
    fn searches_are_deterministic(text in "[ab]{0,50}", pattern in "[ab]{0,5}") {
        for algorithm in Algorithm::ALL {
            let first = algorithm.search_str(&text, &pattern);
            let second = algorithm.search_str(&text, &pattern);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_pattern_matches_at_start_for_free(text in ".{0,30}") {
        for algorithm in Algorithm::ALL {
            prop_assert_eq!(algorithm.search_str(&text, ""), MatchOutcome::found(0, 0));
        }
    }

    #[test]
    fn longer_pattern_is_never_found(text in "[a-z]{0,10}", extra in "[a-z]{1,5}") {
        let pattern = format!("{}{}", text, extra);
        for algorithm in Algorithm::ALL {
            prop_assert!(!algorithm.search_str(&text, &pattern).is_found());
        }
    }

    #[test]
    fn kmp_never_exceeds_twice_the_text(text in small_alphabet(), pattern in "[abc]{1,6}") {
        let outcome = kmp::search(&text, pattern.as_bytes());
        prop_assert!(outcome.comparisons <= 2 * text.len() as u64);
    }

    #[test]
    fn rabin_karp_rolling_matches_fresh_fingerprint(text in prop::collection::vec(any::<u8>(), 2..40), width in 1usize..8) {
        prop_assume!(width <= text.len());
        let mut hash = rabin_karp::RollingHash::new(&text[..width]);
        for start in 1..=text.len() - width {
            hash.roll(text[start - 1], text[start + width - 1]);
            prop_assert_eq!(hash.value(), rabin_karp::RollingHash::fingerprint(&text[start..start + width]));
        }
    }
}

#[test]
fn rabin_karp_rejects_hash_collisions() {
    // "AB", "bf" and "Bq" share a fingerprint
    let fingerprint = rabin_karp::RollingHash::fingerprint(b"AB");
    assert_eq!(rabin_karp::RollingHash::fingerprint(b"bf"), fingerprint);
    assert_eq!(rabin_karp::RollingHash::fingerprint(b"Bq"), fingerprint);

    assert_eq!(rabin_karp::search(b"bf", b"AB"), MatchOutcome::not_found(2));
    assert_eq!(rabin_karp::search(b"bfbfbf", b"AB"), MatchOutcome::not_found(8));
    assert_eq!(rabin_karp::search(b"xbfAB", b"AB"), MatchOutcome::found(3, 7));
}

#[test]
fn boyer_moore_skips_ahead_on_unknown_symbols() {
    let outcome = boyer_moore::search(b"hello world", b"xyz");
    assert_eq!(outcome, MatchOutcome::not_found(3));
}
