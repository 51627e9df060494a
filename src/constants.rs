/// Default minimum number of samples required to split a node.
pub const MIN_SAMPLES_SPLIT: usize = 2;
/// Nodes with fewer samples build their two subtrees on the current thread.
pub const PARALLEL_MIN_SAMPLES: usize = 256;
