use crate::classifier::DecisionTreeClassifier;
use crate::data::Label;
use crate::impurity::Criterion;

impl<L: Label> DecisionTreeClassifier<L> {
    // Set methods for paramters

    /// Set the impurity criterion on the classifier.
    /// * `criterion` - The criterion used to score candidate splits.
    pub fn set_criterion(mut self, criterion: Criterion) -> Self {
        self.cfg.criterion = criterion;
        self
    }

    /// Set the maximum depth on the classifier.
    /// * `max_depth` - Depth bound, `None` grows the tree until every leaf is pure.
    pub fn set_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.cfg.max_depth = max_depth;
        self
    }

    /// Set the minimum number of samples needed to split a node.
    /// * `min_samples_split` - Must be at least 2, checked at fit time.
    pub fn set_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.cfg.min_samples_split = min_samples_split;
        self
    }

    /// Set the number of threads on the classifier.
    /// * `num_threads` - Set the number of threads to be used during training.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set whether training and prediction run in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }
}
