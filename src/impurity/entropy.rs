//! Shannon entropy of the class distribution.
use crate::data::{class_counts, sorted_counts, Label};
use crate::impurity::criterion::ImpurityFunction;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Deserialize, Serialize, Clone)]
/// Entropy impurity, `-Σ p·log2(p)` over the classes present.
pub struct Entropy {}

impl ImpurityFunction for Entropy {
    #[inline]
    fn impurity_from_counts(&self, counts: &[usize], n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        let n = n as f64;
        -counts
            .iter()
            .filter(|c| **c > 0)
            .map(|c| {
                let p = *c as f64 / n;
                p * p.log2()
            })
            .sum::<f64>()
    }
}

/// Entropy of a label sequence, `0.0` when empty.
pub fn entropy<L: Label>(y: &[L]) -> f64 {
    let counts = class_counts(y);
    Entropy::default().impurity_from_counts(&sorted_counts(&counts), y.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_entropy_empty_and_pure() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(entropy(&empty), 0.0);
        assert_eq!(entropy(&["a"]), 0.0);
        assert_eq!(entropy(&["a", "a", "a"]), 0.0);
    }

    #[test]
    fn test_entropy_uniform() {
        assert_eq!(entropy(&[0, 1]), 1.0);
        assert_eq!(entropy(&[0, 1, 2, 3]), 2.0);
        assert_eq!(entropy(&[0, 0, 1, 1, 2, 2, 3, 3]), 2.0);
        assert!((entropy(&[0, 1, 2]) - 3.0_f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_known_value() {
        // 3 vs 1
        let h = entropy(&['A', 'A', 'A', 'B']);
        assert!((h - 0.8112781244591328).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_ignores_label_order() {
        let a = entropy(&[1, 2, 2, 3, 3, 3]);
        let b = entropy(&[3, 2, 3, 1, 3, 2]);
        let c = entropy(&["x", "y", "y", "z", "z", "z"]);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_entropy_non_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let n = rng.gen_range(1..50);
            let k = rng.gen_range(1..6);
            let y: Vec<u32> = (0..n).map(|_| rng.gen_range(0..k)).collect();
            let h = entropy(&y);
            assert!(h >= 0.0);
            let first = y[0];
            if y.iter().all(|v| *v == first) {
                assert_eq!(h, 0.0);
            } else {
                assert!(h > 0.0);
            }
            assert!(h <= (k as f64).log2() + 1e-12);
        }
    }
}
