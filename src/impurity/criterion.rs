use crate::data::{class_counts, sorted_counts, Label};
use crate::errors::CartError;
use crate::impurity::{Entropy, Gini};
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Impurity of a class distribution.
pub trait ImpurityFunction: Send + Sync {
    /// Impurity given the number of samples of each class present.
    ///
    /// * `counts` - Per-class sample counts, in ascending order.
    /// * `n` - Total number of samples, the sum of `counts`.
    fn impurity_from_counts(&self, counts: &[usize], n: usize) -> f64;
}

/// Splitting criterion used to score candidate splits.
#[derive(Serialize, Deserialize, Clone, Default)]
pub enum Criterion {
    #[default]
    Entropy,
    Gini,
    #[serde(skip)]
    Custom(Arc<dyn ImpurityFunction>),
}

impl Criterion {
    pub fn new_custom<T>(impurity: T) -> Self
    where
        T: ImpurityFunction + 'static,
    {
        Criterion::Custom(Arc::new(impurity))
    }

    /// Impurity of a label sequence under this criterion.
    pub fn impurity<L: Label>(&self, y: &[L]) -> f64 {
        let counts = class_counts(y);
        self.impurity_from_counts(&sorted_counts(&counts), y.len())
    }
}

impl ImpurityFunction for Criterion {
    fn impurity_from_counts(&self, counts: &[usize], n: usize) -> f64 {
        match self {
            Criterion::Entropy => Entropy::default().impurity_from_counts(counts, n),
            Criterion::Gini => Gini::default().impurity_from_counts(counts, n),
            Criterion::Custom(arc) => arc.impurity_from_counts(counts, n),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Criterion::Entropy => "Entropy",
            Criterion::Gini => "Gini",
            Criterion::Custom(_) => "Custom",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Criterion {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Entropy" => Ok(Criterion::Entropy),
            "Gini" => Ok(Criterion::Gini),
            _ => Err(CartError::ParseString(
                s.to_string(),
                "Criterion".to_string(),
                items_to_strings(&["Entropy", "Gini"]),
            )),
        }
    }
}
