use crate::classifier::config::{ImportanceMethod, TreeConfig};
use crate::constants::MIN_SAMPLES_SPLIT;
use crate::data::{Dataset, Label, Matrix};
use crate::errors::CartError;
use crate::impurity::Criterion;
use crate::metric::accuracy;
use crate::splitter::Splitter;
use crate::tree::Tree;
use crate::utils::validate_min_usize_parameter;
use log::info;
use std::collections::HashMap;
use std::time::Instant;

/// Decision tree classifier
#[derive(Clone)]
pub struct DecisionTreeClassifier<L> {
    pub cfg: TreeConfig,
    pub tree: Option<Tree<L>>,
}

impl<L> Default for DecisionTreeClassifier<L> {
    fn default() -> Self {
        DecisionTreeClassifier {
            cfg: TreeConfig::default(),
            tree: None,
        }
    }
}

impl<L: Label> DecisionTreeClassifier<L> {
    /// Decision tree classifier
    ///
    /// * `criterion` - Impurity used to score splits. Valid options are:
    ///   "Entropy" for the Shannon entropy in bits,
    ///   "Gini" for the Gini index,
    ///   or a custom criterion that implements the ImpurityFunction trait.
    /// * `max_depth` - Maximum depth of the tree. If set to None, the tree is grown
    ///   until every leaf is pure.
    /// * `min_samples_split` - Nodes holding fewer samples become leaves, must be at least 2.
    /// * `num_threads` - Number of threads to use during training.
    /// * `parallel` - Search splits and grow subtrees in parallel.
    pub fn new(
        criterion: Criterion,
        max_depth: Option<usize>,
        min_samples_split: usize,
        num_threads: Option<usize>,
        parallel: bool,
    ) -> Result<Self, CartError> {
        let cfg = TreeConfig {
            criterion,
            max_depth,
            min_samples_split,
            num_threads,
            parallel,
        };
        Self::from_config(cfg)
    }

    /// Create a classifier from an existing configuration.
    pub fn from_config(cfg: TreeConfig) -> Result<Self, CartError> {
        let classifier = DecisionTreeClassifier { cfg, tree: None };
        classifier.validate_parameters()?;
        Ok(classifier)
    }

    pub fn validate_parameters(&self) -> Result<(), CartError> {
        validate_min_usize_parameter(self.cfg.min_samples_split, MIN_SAMPLES_SPLIT, "min_samples_split")?;
        if let Some(n) = self.cfg.num_threads {
            validate_min_usize_parameter(n, 1, "num_threads")?;
        }
        Ok(())
    }

    /// Fit the classifier on a provided dataset.
    ///
    /// * `data` - Feature matrix, every row holds one sample.
    /// * `y` - Class label of every row in `data`.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[L]) -> Result<(), CartError> {
        self.validate_parameters()?;
        let start = Instant::now();

        let dataset = Dataset::new(data, y)?;
        let splitter = Splitter::new(self.cfg.criterion.clone(), self.cfg.parallel);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.cfg.num_threads.unwrap_or(0))
            .build()
            .map_err(|e| CartError::ThreadPool(e.to_string()))?;

        let tree = pool.install(|| {
            Tree::fit(
                &dataset,
                &splitter,
                self.cfg.max_depth,
                self.cfg.min_samples_split,
                self.cfg.parallel,
            )
        })?;

        info!(
            "Finished training a tree with {0} nodes, {1} leaves and depth {2} in {3:.3} seconds.",
            tree.n_nodes(),
            tree.n_leaves,
            tree.depth,
            start.elapsed().as_secs_f64()
        );
        self.tree = Some(tree);
        Ok(())
    }

    /// Get a reference to the fitted tree.
    pub fn get_tree(&self) -> Result<&Tree<L>, CartError> {
        self.tree.as_ref().ok_or(CartError::NotFitted)
    }

    /// Predict the class of every row of a dataset.
    ///
    /// * `data` - Feature matrix with at least as many columns as the training data.
    pub fn predict(&self, data: &Matrix<f64>) -> Result<Vec<L>, CartError> {
        self.get_tree()?.predict(data, self.cfg.parallel)
    }

    /// Predict the class of a single feature vector.
    pub fn predict_row(&self, row: &[f64]) -> Result<&L, CartError> {
        self.get_tree()?.predict_row(row)
    }

    /// Mean accuracy of the predictions on `data` against the labels `y`.
    ///
    /// `y` holds one label per indexed row of `data`, in index order.
    pub fn score(&self, data: &Matrix<f64>, y: &[L]) -> Result<f64, CartError> {
        if data.index.len() != y.len() {
            return Err(CartError::LabelLengthMismatch {
                rows: data.index.len(),
                labels: y.len(),
            });
        }
        let yhat = self.predict(data)?;
        Ok(accuracy(y, &yhat))
    }

    /// Calculate feature importance measure for the features
    /// used to split the fitted tree.
    ///
    /// * `method` - Method to calculate importance.
    /// * `normalize` - Whether to divide by the sum of all importances.
    pub fn calculate_feature_importance(
        &self,
        method: ImportanceMethod,
        normalize: bool,
    ) -> Result<HashMap<usize, f64>, CartError> {
        Ok(self.get_tree()?.calculate_feature_importance(method, normalize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::config::ConfigIO;
    use crate::data::flatten_rows;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario() -> (Vec<f64>, usize, usize, Vec<&'static str>) {
        let rows = vec![
            vec![1., 2.],
            vec![2., 1.],
            vec![3., 4.],
            vec![3., 6.],
            vec![4., 5.],
            vec![5., 3.],
            vec![6., 5.],
            vec![4., 1.],
        ];
        let (data, n_rows, n_cols) = flatten_rows(&rows).unwrap();
        (data, n_rows, n_cols, vec!["A", "A", "A", "B", "B", "B", "B", "A"])
    }

    #[test]
    fn test_classifier_fit_predict() {
        let (data, rows, cols, y) = scenario();
        let matrix = Matrix::new_row_major(&data, rows, cols);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&matrix, &y).unwrap();

        assert_eq!(model.predict_row(&[5., 4.]), Ok(&"B"));
        assert_eq!(model.predict(&matrix).unwrap(), y);
        assert_eq!(model.score(&matrix, &y), Ok(1.0));

        let tree = model.get_tree().unwrap();
        assert_eq!(tree.depth, 2);
        assert_eq!(tree.n_leaves, 3);
    }

    #[test]
    fn test_classifier_max_depth() {
        let (data, rows, cols, y) = scenario();
        let matrix = Matrix::new_row_major(&data, rows, cols);
        let mut model = DecisionTreeClassifier::default().set_max_depth(Some(1));
        model.fit(&matrix, &y).unwrap();
        assert_eq!(model.predict_row(&[5., 4.]), Ok(&"A"));
        // Row 5 falls in the impure left leaf.
        assert_eq!(model.score(&matrix, &y), Ok(0.875));
    }

    #[test]
    fn test_classifier_not_fitted() {
        let model: DecisionTreeClassifier<u8> = DecisionTreeClassifier::default();
        assert_eq!(model.predict_row(&[1.0]), Err(CartError::NotFitted));
        assert!(matches!(model.get_tree(), Err(CartError::NotFitted)));
        assert!(matches!(
            model.calculate_feature_importance(ImportanceMethod::Weight, true),
            Err(CartError::NotFitted)
        ));
    }

    #[test]
    fn test_classifier_invalid_parameters() {
        let err = DecisionTreeClassifier::<u8>::new(Criterion::Gini, None, 1, None, true);
        assert!(matches!(err, Err(CartError::InvalidParameter(..))));
        let err = DecisionTreeClassifier::<u8>::new(Criterion::Gini, None, 2, Some(0), true);
        assert!(matches!(err, Err(CartError::InvalidParameter(..))));

        let data = vec![1.0, 2.0];
        let matrix = Matrix::new(&data, 2, 1);
        let mut model = DecisionTreeClassifier::default().set_min_samples_split(0);
        assert!(matches!(model.fit(&matrix, &[0u8, 1]), Err(CartError::InvalidParameter(..))));
    }

    #[test]
    fn test_classifier_bad_input() {
        let data = vec![1.0, 2.0, f64::NAN];
        let matrix = Matrix::new(&data, 3, 1);
        let mut model = DecisionTreeClassifier::default();
        assert_eq!(
            model.fit(&matrix, &[0u8, 1, 1]),
            Err(CartError::NanValueFound { row: 2, feature: 0 })
        );
        assert_eq!(
            model.fit(&matrix, &[0u8, 1]),
            Err(CartError::LabelLengthMismatch { rows: 3, labels: 2 })
        );
        let empty: Vec<f64> = Vec::new();
        let matrix = Matrix::new(&empty, 0, 1);
        assert_eq!(model.fit(&matrix, &[]), Err(CartError::EmptyDataset));
        assert!(model.tree.is_none());
    }

    #[test]
    fn test_classifier_predict_bad_matrix() {
        let (data, rows, cols, y) = scenario();
        let matrix = Matrix::new_row_major(&data, rows, cols);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&matrix, &y).unwrap();

        let short = vec![5.0, 4.0];
        let m = Matrix::new_row_major(&short, 3, 2);
        assert_eq!(model.predict(&m), Err(CartError::DataShape { expected: 6, found: 2 }));
        assert_eq!(
            model.score(&m, &["A", "A", "A"]),
            Err(CartError::DataShape { expected: 6, found: 2 })
        );

        let mut m = Matrix::new_row_major(&data, rows, cols);
        m.index = vec![0, 8];
        assert_eq!(model.predict(&m), Err(CartError::RowIndexOutOfBounds { index: 8, rows: 8 }));
    }

    #[test]
    fn test_classifier_score_follows_index() {
        let (data, rows, cols, y) = scenario();
        let matrix = Matrix::new_row_major(&data, rows, cols);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&matrix, &y).unwrap();

        let mut subset = Matrix::new_row_major(&data, rows, cols);
        subset.index = vec![3, 4, 7];
        assert_eq!(model.score(&subset, &["B", "B", "A"]), Ok(1.0));
        assert_eq!(
            model.score(&subset, &y),
            Err(CartError::LabelLengthMismatch { rows: 3, labels: 8 })
        );
    }

    #[test]
    fn test_classifier_no_valid_split() {
        let data = vec![0.0, 1.0, 1.0];
        let matrix = Matrix::new(&data, 3, 1);
        let mut model = DecisionTreeClassifier::default();
        assert_eq!(model.fit(&matrix, &["a", "b", "c"]), Err(CartError::NoValidSplit(2)));
        assert!(model.tree.is_none());
    }

    #[test]
    fn test_classifier_threads_and_config() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 500;
        let mut data = Vec::with_capacity(n * 3);
        for _ in 0..(n * 3) {
            data.push(rng.gen_range(0..20) as f64);
        }
        let matrix = Matrix::new(&data, n, 3);
        let y: Vec<u32> = (0..n)
            .map(|i| u32::from(matrix.get(i, 0) + matrix.get(i, 2) > 19.0))
            .collect();

        let mut model = DecisionTreeClassifier::default()
            .set_criterion(Criterion::Gini)
            .set_num_threads(Some(2));
        model.fit(&matrix, &y).unwrap();
        assert_eq!(model.score(&matrix, &y), Ok(1.0));

        let cfg = TreeConfig::from_json(&model.cfg.json_dump().unwrap()).unwrap();
        let mut model2 = DecisionTreeClassifier::from_config(cfg).unwrap().set_parallel(false);
        model2.fit(&matrix, &y).unwrap();
        assert_eq!(model.tree, model2.tree);
    }

    #[test]
    fn test_classifier_score_length() {
        let (data, rows, cols, y) = scenario();
        let matrix = Matrix::new_row_major(&data, rows, cols);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&matrix, &y).unwrap();
        assert_eq!(
            model.score(&matrix, &y[..4]),
            Err(CartError::LabelLengthMismatch { rows: 8, labels: 4 })
        );
    }

    #[test]
    fn test_classifier_feature_importance() {
        let (data, rows, cols, y) = scenario();
        let matrix = Matrix::new_row_major(&data, rows, cols);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&matrix, &y).unwrap();
        let importance = model
            .calculate_feature_importance(ImportanceMethod::Weight, false)
            .unwrap();
        assert_eq!(importance.get(&0), Some(&1.0));
        assert_eq!(importance.get(&1), Some(&1.0));
    }
}
