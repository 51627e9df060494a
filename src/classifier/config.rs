//! Classifier Configuration
//!
//! Defines the configuration structures and enums used by the decision tree classifier.
use crate::constants::MIN_SAMPLES_SPLIT;
use crate::errors::CartError;
use crate::impurity::Criterion;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Method to calculate variable importance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum ImportanceMethod {
    /// The number of times a feature is used to split the data.
    Weight,
    /// The total weighted impurity decrease across all splits the feature is used in.
    Gain,
}

fn default_min_samples_split() -> usize {
    MIN_SAMPLES_SPLIT
}
fn default_parallel() -> bool {
    true
}

/// Configuration for the `DecisionTreeClassifier`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Impurity criterion used to score splits.
    #[serde(default)]
    pub criterion: Criterion,
    /// Maximum depth of the tree, unbounded if `None`.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Nodes with fewer samples are not split.
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    /// Number of threads for parallel tasks.
    #[serde(default)]
    pub num_threads: Option<usize>,
    /// Whether to search splits and grow subtrees in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            criterion: Criterion::Entropy,
            max_depth: None,
            min_samples_split: MIN_SAMPLES_SPLIT,
            num_threads: None,
            parallel: true,
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save a configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), CartError> {
        fs::write(path, self.json_dump()?).map_err(|e| CartError::UnableToWrite(e.to_string()))
    }

    /// Dump a configuration as a json object
    fn json_dump(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(|e| CartError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, CartError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| CartError::UnableToRead(e.to_string()))
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, CartError> {
        let json_str = fs::read_to_string(path).map_err(|e| CartError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for TreeConfig {}
