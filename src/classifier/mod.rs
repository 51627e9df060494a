// public modules
pub mod config;
pub mod tree_classifier;

// private modules
mod setters;

pub use config::{ConfigIO, ImportanceMethod, TreeConfig};
pub use tree_classifier::DecisionTreeClassifier;
