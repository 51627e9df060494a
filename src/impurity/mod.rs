// import modules
mod entropy;
mod gini;

// make impurity functions public
pub use entropy::{entropy, Entropy};
pub use gini::{gini, Gini};

pub mod criterion;

pub use criterion::Criterion;
pub use criterion::ImpurityFunction;
