use crate::errors::CartError;
use std::cmp::Ordering;

/// Create a string of all available items.
pub fn items_to_strings(items: &[&str]) -> String {
    items.join(", ")
}

// Validation
pub fn validate_min_usize_parameter(value: usize, min: usize, parameter: &str) -> Result<(), CartError> {
    if value < min {
        Err(CartError::InvalidParameter(
            parameter.to_string(),
            format!("an integer greater than or equal to {}", min),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Compare two impurity values, treating `-0.0` and `0.0` as equal.
/// NaN sorts after every number.
#[inline]
pub fn cmp_impurity(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Adding 0.0 turns -0.0 into 0.0.
        (false, false) => (a + 0.0).total_cmp(&(b + 0.0)),
    }
}
