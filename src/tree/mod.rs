pub mod predict;
pub mod tree;

pub use tree::{stopping_criterion, Tree, TreeStopper};
