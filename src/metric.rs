/// Fraction of predictions equal to their label.
///
/// Returns `NaN` when no labels are provided. Only the
/// overlapping prefix is compared if the lengths differ.
pub fn accuracy<L: PartialEq>(y: &[L], yhat: &[L]) -> f64 {
    let n = y.len().min(yhat.len());
    if n == 0 {
        return f64::NAN;
    }
    let correct = y.iter().zip(yhat).filter(|(a, b)| a == b).count();
    correct as f64 / n as f64
}
