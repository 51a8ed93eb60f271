use serde::Serialize;
use std::cmp::Ordering;

/// Outcome of a binary search: where the target sits and how many probes it took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinaryProbe {
    pub position: Option<usize>,
    pub iterations: usize,
}

/// Bisects `sorted` for `target`, counting loop passes.
///
/// Uses the inclusive `[low, high]` bounds with `mid = (low + high) / 2`. Values that cannot
/// be ordered against the target (NaN) stop the search as not found.
pub fn binary_search<T: PartialOrd>(sorted: &[T], target: &T) -> BinaryProbe {
    let mut low = 0;
    // exclusive upper bound: `high - 1` is the inclusive one
    let mut high = sorted.len();
    let mut iterations = 0;

    while low < high {
        iterations += 1;
        let mid = (low + high - 1) / 2;

        match sorted[mid].partial_cmp(target) {
            Some(Ordering::Less) => low = mid + 1,
            Some(Ordering::Greater) => high = mid,
            Some(Ordering::Equal) => {
                return BinaryProbe {
                    position: Some(mid),
                    iterations,
                }
            }
            None => break,
        }
    }

    BinaryProbe {
        position: None,
        iterations,
    }
}
