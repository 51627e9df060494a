use crate::data::{class_counts, sorted_counts, Dataset, Label};
use crate::errors::CartError;
use crate::impurity::{Criterion, ImpurityFunction};
use crate::utils::cmp_impurity;
use hashbrown::HashMap;
use rayon::prelude::*;
use std::cmp::Ordering;

/// A scored candidate split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    pub split_feature: usize,
    pub split_value: f64,
    /// Weighted average impurity of the two sides.
    pub impurity: f64,
    /// Size of the pure side, left checked first, `0` if neither side is pure.
    pub pure_size: usize,
    pub left_count: usize,
    pub right_count: usize,
}

impl SplitInfo {
    /// Whether this split strictly wins over `other`.
    ///
    /// Lower impurity wins, then the larger pure side, then the larger
    /// threshold, and finally the lower feature index. This is a total order,
    /// so the winner does not depend on the order candidates are visited in.
    pub fn is_better_than(&self, other: &SplitInfo) -> bool {
        match cmp_impurity(self.impurity, other.impurity) {
            Ordering::Less => return true,
            Ordering::Greater => return false,
            Ordering::Equal => (),
        }
        match self.pure_size.cmp(&other.pure_size) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => (),
        }
        if self.split_value > other.split_value {
            return true;
        }
        if self.split_value < other.split_value {
            return false;
        }
        self.split_feature < other.split_feature
    }
}

/// Exhaustive search for the best `(feature, threshold)` pair.
#[derive(Clone, Default)]
pub struct Splitter {
    pub criterion: Criterion,
    /// Evaluate features in parallel.
    pub parallel: bool,
}

impl Splitter {
    pub fn new(criterion: Criterion, parallel: bool) -> Self {
        Splitter { criterion, parallel }
    }

    /// Weighted average impurity `(|L|/n)·I(L) + (|R|/n)·I(R)`.
    pub fn weighted_impurity<L>(
        &self,
        left: &HashMap<&L, usize>,
        n_left: usize,
        right: &HashMap<&L, usize>,
        n_right: usize,
    ) -> f64 {
        let n = (n_left + n_right) as f64;
        if n == 0.0 {
            return 0.0;
        }
        let i_left = self.criterion.impurity_from_counts(&sorted_counts(left), n_left);
        let i_right = self.criterion.impurity_from_counts(&sorted_counts(right), n_right);
        (n_left as f64 / n) * i_left + (n_right as f64 / n) * i_right
    }

    /// Find the best split over every feature and every distinct feature value.
    ///
    /// Candidates that would leave either side empty are skipped. Fails with
    /// [`CartError::NoValidSplit`] if no candidate is left, which happens when
    /// all the samples share the same feature vector.
    pub fn best_split<L: Label>(&self, data: &Dataset<'_, L>) -> Result<SplitInfo, CartError> {
        let best = if self.parallel {
            (0..data.n_features())
                .into_par_iter()
                .filter_map(|feature| self.best_feature_split(data, feature))
                .reduce_with(|a, b| if b.is_better_than(&a) { b } else { a })
        } else {
            (0..data.n_features())
                .filter_map(|feature| self.best_feature_split(data, feature))
                .reduce(|a, b| if b.is_better_than(&a) { b } else { a })
        };
        best.ok_or(CartError::NoValidSplit(data.len()))
    }

    /// Best split on a single feature.
    ///
    /// Sorts the samples by the feature value, then sweeps the distinct values
    /// in ascending order, moving samples from the right side to the left one.
    /// The class counts at each step are exactly those of partitioning the
    /// data on `feature <= value`.
    pub fn best_feature_split<L: Label>(&self, data: &Dataset<'_, L>, feature: usize) -> Option<SplitInfo> {
        let mut order = data.index().to_vec();
        order.sort_by(|a, b| data.value(*a, feature).total_cmp(&data.value(*b, feature)));

        let n = order.len();
        let mut left: HashMap<&L, usize> = HashMap::new();
        let mut right = class_counts(data.labels());
        let mut best: Option<SplitInfo> = None;

        let mut i = 0;
        while i < n {
            let split_value = data.value(order[i], feature);
            while i < n && data.value(order[i], feature) == split_value {
                let label = data.label(order[i]);
                *left.entry(label).or_insert(0) += 1;
                if let Some(c) = right.get_mut(label) {
                    *c -= 1;
                    if *c == 0 {
                        right.remove(label);
                    }
                }
                i += 1;
            }
            // Every remaining sample is on the left.
            if i == n {
                break;
            }
            let (n_left, n_right) = (i, n - i);
            let pure_size = if left.len() == 1 {
                n_left
            } else if right.len() == 1 {
                n_right
            } else {
                0
            };
            let candidate = SplitInfo {
                split_feature: feature,
                split_value,
                impurity: self.weighted_impurity(&left, n_left, &right, n_right),
                pure_size,
                left_count: n_left,
                right_count: n_right,
            };
            if best.as_ref().map_or(true, |b| candidate.is_better_than(b)) {
                best = Some(candidate);
            }
        }
        best
    }
}
