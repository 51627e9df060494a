//! Gini index of the class distribution.
use crate::data::{class_counts, sorted_counts, Label};
use crate::impurity::criterion::ImpurityFunction;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Deserialize, Serialize, Clone)]
/// Gini impurity, `1 - Σ p²`.
pub struct Gini {}

impl ImpurityFunction for Gini {
    #[inline]
    fn impurity_from_counts(&self, counts: &[usize], n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        let n = n as f64;
        let sum_sq = counts
            .iter()
            .map(|c| {
                let p = *c as f64 / n;
                p * p
            })
            .sum::<f64>();
        1.0 - sum_sq
    }
}

/// Gini index of a label sequence, `0.0` when empty.
pub fn gini<L: Label>(y: &[L]) -> f64 {
    let counts = class_counts(y);
    Gini::default().impurity_from_counts(&sorted_counts(&counts), y.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gini() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(gini(&empty), 0.0);
        assert_eq!(gini(&[7, 7, 7]), 0.0);
        assert_eq!(gini(&["a", "b"]), 0.5);
        assert!((gini(&[0, 0, 0, 1]) - 0.375).abs() < 1e-12);
        assert!((gini(&[0, 1, 2]) - 2.0 / 3.0).abs() < 1e-12);
    }
}
