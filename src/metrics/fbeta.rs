//! F-beta score calculation
//!
//! Harmonic-mean scores combining a precision and a recall value, used to fold
//! boundary precision/recall into a single F-measure.

/// Calculate F1 score from precision and recall
///
/// F1 = 2 * (precision * recall) / (precision + recall)
///
/// This is a special case of F-beta where beta = 1.0 (equal weight to precision and recall).
///
/// # Arguments
///
/// * `precision` - Precision value
/// * `recall` - Recall value
///
/// # Returns
///
/// F1 score value between 0.0 and 1.0; 0.0 when precision and recall are both zero
///
/// # Examples
///
/// ```
/// # use polyseg_eval::metrics::fbeta::calculate_f1;
/// let f1 = calculate_f1(0.8, 0.9);
/// assert!((f1 - 0.847).abs() < 0.001);
/// assert_eq!(calculate_f1(0.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn calculate_f1(precision: f64, recall: f64) -> f64 {
    calculate_fbeta(precision, recall, 1.0)
}

/// Calculate F-beta score from precision and recall
///
/// F-beta = (1 + beta²) * precision * recall / ((beta² * precision) + recall)
///
/// - beta = 1.0: Equal weight (F1 score)
/// - beta > 1.0: More weight on recall
/// - beta < 1.0: More weight on precision
///
/// # Panics
///
/// Panics if beta is not positive
///
/// # Examples
///
/// ```
/// # use polyseg_eval::metrics::fbeta::calculate_fbeta;
/// // F2 score (beta = 2.0, favors recall)
/// let f2 = calculate_fbeta(0.8, 0.9, 2.0);
/// assert!((f2 - 0.877).abs() < 0.001);
/// ```
#[must_use]
pub fn calculate_fbeta(precision: f64, recall: f64, beta: f64) -> f64 {
    assert!(beta > 0.0, "Beta must be positive, got {beta}");

    if precision + recall == 0.0 {
        return 0.0;
    }

    let beta_squared = beta * beta;
    let numerator = (1.0 + beta_squared) * precision * recall;
    let denominator = (beta_squared * precision) + recall;

    if denominator == 0.0 {
        return 0.0;
    }

    let fbeta = numerator / denominator;

    debug_assert!(
        (0.0..=1.0).contains(&fbeta),
        "F-beta must be between 0 and 1, got {fbeta} (precision={precision}, recall={recall}, beta={beta})"
    );

    fbeta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_f1_equal_precision_recall() {
        let f1 = calculate_f1(0.8, 0.8);
        assert!((f1 - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_calculate_f1_perfect() {
        assert_eq!(calculate_f1(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_calculate_f1_one_sided() {
        // Degenerate boundary cases produce (1, 0) or (0, 1).
        assert_eq!(calculate_f1(1.0, 0.0), 0.0);
        assert_eq!(calculate_f1(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_calculate_fbeta_f1() {
        let f1 = calculate_f1(0.8, 0.9);
        let fbeta = calculate_fbeta(0.8, 0.9, 1.0);
        assert!((f1 - fbeta).abs() < 1e-10);
    }

    #[test]
    fn test_calculate_fbeta_f_half_favors_precision() {
        let precision = 0.9;
        let recall = 0.7;
        let f_half = calculate_fbeta(precision, recall, 0.5);

        assert!(f_half > recall);
        assert!(f_half < precision);
        assert!((f_half - precision).abs() < (f_half - recall).abs());
    }

    #[test]
    #[should_panic(expected = "Beta must be positive")]
    fn test_calculate_fbeta_zero_beta() {
        let _ = calculate_fbeta(0.8, 0.9, 0.0);
    }
}
