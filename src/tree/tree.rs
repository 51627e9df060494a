use crate::classifier::config::ImportanceMethod;
use crate::constants::PARALLEL_MIN_SAMPLES;
use crate::data::{majority_label, sorted_counts, Dataset, Label};
use crate::errors::CartError;
use crate::impurity::ImpurityFunction;
use crate::node::Node;
use crate::splitter::Splitter;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::{self, Display};

/// Reason a node was turned into a leaf.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TreeStopper {
    /// All the samples share one label.
    Pure,
    /// The maximum depth was reached.
    MaxDepth,
    /// Too few samples to split.
    MinSamples,
}

/// A trained binary decision tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree<L> {
    pub root: Node<L>,
    /// Dimension of the training feature vectors.
    pub n_features: usize,
    pub depth: usize,
    pub n_leaves: usize,
}

struct GrowParams<'s> {
    splitter: &'s Splitter,
    max_depth: Option<usize>,
    min_samples_split: usize,
    parallel: bool,
}

/// Check whether a node should become a leaf, before any split is attempted.
///
/// * `n_samples` - Number of samples in the node.
/// * `n_classes` - Number of distinct labels in the node.
/// * `depth` - Depth of the node, the root is at depth 0.
/// * `max_depth` - Optional depth bound.
/// * `min_samples_split` - Nodes with fewer samples are not split.
pub fn stopping_criterion(
    n_samples: usize,
    n_classes: usize,
    depth: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
) -> Option<TreeStopper> {
    if n_classes <= 1 {
        Some(TreeStopper::Pure)
    } else if max_depth.map_or(false, |m| depth >= m) {
        Some(TreeStopper::MaxDepth)
    } else if n_samples < min_samples_split {
        Some(TreeStopper::MinSamples)
    } else {
        None
    }
}

impl<L: Label> Tree<L> {
    /// Grow a tree on a dataset.
    ///
    /// * `data` - Training samples, must not be empty.
    /// * `splitter` - Split search, holding the impurity criterion.
    /// * `max_depth` - Optional depth bound, `Some(0)` yields a single leaf.
    /// * `min_samples_split` - Nodes with fewer samples become leaves.
    /// * `parallel` - Build large enough sibling subtrees concurrently.
    ///
    /// Fails with [`CartError::NoValidSplit`] if a node that should be split
    /// has no valid split, the error is never turned into a leaf.
    pub fn fit(
        data: &Dataset<'_, L>,
        splitter: &Splitter,
        max_depth: Option<usize>,
        min_samples_split: usize,
        parallel: bool,
    ) -> Result<Self, CartError> {
        if data.is_empty() {
            return Err(CartError::EmptyDataset);
        }
        let params = GrowParams {
            splitter,
            max_depth,
            min_samples_split,
            parallel,
        };
        let root = grow(data.clone(), 0, &params)?;
        Ok(Tree {
            depth: node_depth(&root),
            n_leaves: count_leaves(&root),
            n_features: data.n_features(),
            root,
        })
    }
}

impl<L> Tree<L> {
    /// Total number of nodes, internal nodes and leaves.
    pub fn n_nodes(&self) -> usize {
        count_nodes(&self.root)
    }

    /// Calculate feature importance measure for the features
    /// used to split the tree.
    ///
    /// * `method` - Method to calculate importance.
    /// * `normalize` - Whether to divide by the sum of all importances.
    pub fn calculate_feature_importance(&self, method: ImportanceMethod, normalize: bool) -> HashMap<usize, f64> {
        let mut importance: HashMap<usize, f64> = HashMap::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let Node::Internal {
                split_feature,
                n_samples,
                impurity,
                left,
                right,
                ..
            } = node
            {
                let v = match method {
                    ImportanceMethod::Weight => 1.0,
                    ImportanceMethod::Gain => {
                        *n_samples as f64 * impurity
                            - left.n_samples() as f64 * left.impurity()
                            - right.n_samples() as f64 * right.impurity()
                    }
                };
                *importance.entry(*split_feature).or_insert(0.0) += v;
                stack.push(&**left);
                stack.push(&**right);
            }
        }
        if normalize {
            let total: f64 = importance.values().sum();
            if total > 0.0 {
                importance.values_mut().for_each(|v| *v /= total);
            }
        }
        importance
    }
}

fn grow<L: Label>(data: Dataset<'_, L>, depth: usize, params: &GrowParams) -> Result<Node<L>, CartError> {
    let n_samples = data.len();
    let counts = data.class_counts();
    let impurity = params
        .splitter
        .criterion
        .impurity_from_counts(&sorted_counts(&counts), n_samples);

    if let Some(stopper) = stopping_criterion(
        n_samples,
        counts.len(),
        depth,
        params.max_depth,
        params.min_samples_split,
    ) {
        let label = majority_label(&counts).ok_or(CartError::EmptyDataset)?.clone();
        debug!(
            "leaf at depth {}, samples: {}, stopper: {:?}, label: {:?}",
            depth, n_samples, stopper, label
        );
        return Ok(Node::new_leaf(label, n_samples, impurity));
    }

    let split = match params.splitter.best_split(&data) {
        Ok(split) => split,
        Err(e) => {
            warn!(
                "No valid split for {} samples with {} classes at depth {}, the samples share one feature vector.",
                n_samples,
                counts.len(),
                depth
            );
            return Err(e);
        }
    };
    debug!(
        "split at depth {}, samples: {}, feature: {}, value: {}, impurity: {} -> {}",
        depth, n_samples, split.split_feature, split.split_value, impurity, split.impurity
    );

    let (left_data, right_data) = data.partition(split.split_feature, split.split_value);
    let (left, right) = if params.parallel && n_samples >= PARALLEL_MIN_SAMPLES {
        let (left, right) = rayon::join(
            || grow(left_data, depth + 1, params),
            || grow(right_data, depth + 1, params),
        );
        (left?, right?)
    } else {
        let left = grow(left_data, depth + 1, params)?;
        let right = grow(right_data, depth + 1, params)?;
        (left, right)
    };

    Ok(Node::new_internal(
        split.split_feature,
        split.split_value,
        n_samples,
        impurity,
        left,
        right,
    ))
}

fn node_depth<L>(node: &Node<L>) -> usize {
    match node {
        Node::Leaf { .. } => 0,
        Node::Internal { left, right, .. } => 1 + node_depth(&**left).max(node_depth(&**right)),
    }
}

fn count_nodes<L>(node: &Node<L>) -> usize {
    match node {
        Node::Leaf { .. } => 1,
        Node::Internal { left, right, .. } => 1 + count_nodes(&**left) + count_nodes(&**right),
    }
}

fn count_leaves<L>(node: &Node<L>) -> usize {
    match node {
        Node::Leaf { .. } => 1,
        Node::Internal { left, right, .. } => count_leaves(&**left) + count_leaves(&**right),
    }
}

impl<L: Display> Display for Tree<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_node(&self.root, "", f)
    }
}

// Only goes through the public accessors of `Node`.
fn fmt_node<L: Display>(node: &Node<L>, indent: &str, f: &mut fmt::Formatter) -> fmt::Result {
    if let Some(label) = node.label() {
        return writeln!(f, "class {}", label);
    }
    if let (Some(feature), Some(value), Some(left), Some(right)) =
        (node.split_feature(), node.split_value(), node.left(), node.right())
    {
        writeln!(f, "[x{} <= {}]", feature, value)?;
        write!(f, "{}|- yes: ", indent)?;
        fmt_node(left, &format!("{}|  ", indent), f)?;
        write!(f, "{}|_ no:  ", indent)?;
        fmt_node(right, &format!("{}   ", indent), f)?;
    }
    Ok(())
}
