use super::tree::Tree;
use crate::data::{Label, Matrix};
use crate::errors::CartError;
use crate::node::Node;
use rayon::prelude::*;

impl<L> Node<L> {
    /// Route a feature vector down to a leaf, and return its label.
    ///
    /// At each internal node the sample goes left if `row[split_feature] <= split_value`,
    /// and right otherwise. Fails with [`CartError::DimensionMismatch`] if a node
    /// on the path splits on a feature the vector does not have.
    pub fn predict_row(&self, row: &[f64]) -> Result<&L, CartError> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { label, .. } => return Ok(label),
                Node::Internal {
                    split_feature,
                    split_value,
                    left,
                    right,
                    ..
                } => {
                    let v = row.get(*split_feature).ok_or(CartError::DimensionMismatch {
                        feature: *split_feature,
                        len: row.len(),
                    })?;
                    node = if *v <= *split_value { &**left } else { &**right };
                }
            }
        }
    }
}

impl<L: Label> Tree<L> {
    /// Predict the label of a single feature vector.
    pub fn predict_row(&self, row: &[f64]) -> Result<&L, CartError> {
        self.root.predict_row(row)
    }

    /// Predict the label of every indexed row of `data`.
    ///
    /// * `data` - Feature matrix with the training dimension.
    /// * `parallel` - Predict rows in parallel.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<L>, CartError> {
        data.validate_shape()?;
        if parallel {
            data.index
                .par_iter()
                .map(|i| self.predict_row(&data.get_row(*i)).cloned())
                .collect()
        } else {
            data.index
                .iter()
                .map(|i| self.predict_row(&data.get_row(*i)).cloned())
                .collect()
        }
    }
}
