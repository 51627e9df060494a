use std::fmt::{self, Debug, Display};

/// A node of a binary decision tree.
///
/// Internal nodes exclusively own their two children, so a tree is
/// dropped as a whole together with its root.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<L> {
    /// Terminal node predicting the majority class of its samples.
    Leaf {
        label: L,
        n_samples: usize,
        impurity: f64,
    },
    /// Node routing samples with `x[split_feature] <= split_value` to `left`,
    /// and all the others to `right`.
    Internal {
        split_feature: usize,
        split_value: f64,
        n_samples: usize,
        impurity: f64,
        left: Box<Node<L>>,
        right: Box<Node<L>>,
    },
}

impl<L> Node<L> {
    pub fn new_leaf(label: L, n_samples: usize, impurity: f64) -> Self {
        Node::Leaf {
            label,
            n_samples,
            impurity,
        }
    }

    pub fn new_internal(
        split_feature: usize,
        split_value: f64,
        n_samples: usize,
        impurity: f64,
        left: Node<L>,
        right: Node<L>,
    ) -> Self {
        Node::Internal {
            split_feature,
            split_value,
            n_samples,
            impurity,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Predicted class, `None` for internal nodes.
    pub fn label(&self) -> Option<&L> {
        match self {
            Node::Leaf { label, .. } => Some(label),
            Node::Internal { .. } => None,
        }
    }

    /// Index of the feature this node splits on, `None` for leaves.
    pub fn split_feature(&self) -> Option<usize> {
        match self {
            Node::Internal { split_feature, .. } => Some(*split_feature),
            Node::Leaf { .. } => None,
        }
    }

    /// Threshold of the split, `None` for leaves.
    pub fn split_value(&self) -> Option<f64> {
        match self {
            Node::Internal { split_value, .. } => Some(*split_value),
            Node::Leaf { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&Node<L>> {
        match self {
            Node::Internal { left, .. } => Some(&**left),
            Node::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Node<L>> {
        match self {
            Node::Internal { right, .. } => Some(&**right),
            Node::Leaf { .. } => None,
        }
    }

    /// Number of training samples that reached this node.
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Leaf { n_samples, .. } | Node::Internal { n_samples, .. } => *n_samples,
        }
    }

    /// Impurity of the training samples that reached this node.
    pub fn impurity(&self) -> f64 {
        match self {
            Node::Leaf { impurity, .. } | Node::Internal { impurity, .. } => *impurity,
        }
    }

    /// Get the child that should be traveled down, given the value
    /// of the split feature. `None` for leaves.
    pub fn get_child(&self, v: f64) -> Option<&Node<L>> {
        match self {
            Node::Internal {
                split_value,
                left,
                right,
                ..
            } => {
                if v <= *split_value {
                    Some(&**left)
                } else {
                    Some(&**right)
                }
            }
            Node::Leaf { .. } => None,
        }
    }
}

impl<L: Display> Display for Node<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf {
                label,
                n_samples,
                impurity,
            } => write!(f, "leaf={},n={},impurity={:.4}", label, n_samples, impurity),
            Node::Internal {
                split_feature,
                split_value,
                n_samples,
                impurity,
                ..
            } => write!(
                f,
                "[x{} <= {}] n={},impurity={:.4}",
                split_feature, split_value, n_samples, impurity
            ),
        }
    }
}
