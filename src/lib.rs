// Modules
pub mod classifier;
pub mod constants;
pub mod data;
pub mod errors;
pub mod impurity;
pub mod metric;
pub mod node;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use classifier::{ConfigIO, DecisionTreeClassifier, ImportanceMethod, TreeConfig};
pub use data::{flatten_rows, Dataset, Label, Matrix};
pub use errors::CartError;
pub use impurity::{entropy, gini, Criterion, ImpurityFunction};
pub use node::Node;
pub use tree::Tree;
