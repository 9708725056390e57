//! Boundary precision/recall between a predicted and a ground-truth mask.

use super::bmap::seg2bmap;
use super::morphology::{binary_dilation, StructuringElement};
use crate::metrics::fbeta::calculate_f1;
use crate::types::{BoundaryScore, Mask};
use tracing::{debug, trace};

/// Boundary tolerance used when callers have no preference.
pub const DEFAULT_BOUND_TH: f64 = 2.0;

/// Resolve a boundary tolerance into a dilation radius in pixels.
///
/// Values `>= 1` are taken as a pixel count. Smaller values are a fraction of
/// the image diagonal, rounded up.
///
/// # Panics
///
/// Panics if `bound_th` is negative or not finite.
///
/// # Example
///
/// ```
/// use polyseg_eval::boundary::tolerance_pixels;
///
/// assert_eq!(tolerance_pixels(2.0, (100, 100)), 2.0);
/// // ceil(0.01 * sqrt(30² + 40²)) = ceil(0.5)
/// assert_eq!(tolerance_pixels(0.01, (30, 40)), 1.0);
/// ```
pub fn tolerance_pixels(bound_th: f64, shape: (usize, usize)) -> f64 {
    assert!(
        bound_th.is_finite() && bound_th >= 0.0,
        "Boundary threshold must be a non-negative number, got {bound_th}"
    );

    if bound_th >= 1.0 {
        return bound_th;
    }
    let (h, w) = shape;
    let diagonal = ((h * h + w * w) as f64).sqrt();
    (bound_th * diagonal).ceil()
}

/// Boundary F-measure between a predicted and a ground-truth mask.
///
/// Only the F-measure is returned; use [`db_eval_boundary_detailed`] when
/// precision and recall are needed as well.
///
/// # Panics
///
/// Panics if the masks differ in shape or `bound_th` is negative or not finite.
///
/// # Example
///
/// ```
/// use polyseg_eval::boundary::db_eval_boundary;
/// use polyseg_eval::Mask;
///
/// let mut mask = Mask::new(8, 8).unwrap();
/// for y in 2..6 {
///     for x in 2..6 {
///         mask.set(x, y, true);
///     }
/// }
/// assert_eq!(db_eval_boundary(&mask, &mask, 2.0), 1.0);
/// ```
pub fn db_eval_boundary(foreground: &Mask, ground_truth: &Mask, bound_th: f64) -> f64 {
    db_eval_boundary_detailed(foreground, ground_truth, bound_th).f_measure
}

/// Boundary precision, recall and F-measure between two masks.
///
/// Predicted boundary pixels within the tolerance of a ground-truth boundary
/// pixel count towards precision, and vice versa for recall. When one side has
/// no boundary at all the scores follow a fixed table:
///
/// | predicted | ground truth | precision | recall |
/// |-----------|--------------|-----------|--------|
/// | empty     | non-empty    | 1         | 0      |
/// | non-empty | empty        | 0         | 1      |
/// | empty     | empty        | 1         | 1      |
///
/// # Panics
///
/// Panics if the masks differ in shape or `bound_th` is negative or not finite.
pub fn db_eval_boundary_detailed(
    foreground: &Mask,
    ground_truth: &Mask,
    bound_th: f64,
) -> BoundaryScore {
    foreground.assert_same_shape(ground_truth);

    let bound_pix = tolerance_pixels(bound_th, foreground.shape());
    trace!(bound_th, bound_pix, "resolved boundary tolerance");

    let fg_boundary = seg2bmap(foreground, None, None);
    let gt_boundary = seg2bmap(ground_truth, None, None);

    let disk = StructuringElement::disk(bound_pix);
    let fg_dil = binary_dilation(&fg_boundary, &disk);
    let gt_dil = binary_dilation(&gt_boundary, &disk);

    let gt_match = gt_boundary.intersection_count(&fg_dil);
    let fg_match = fg_boundary.intersection_count(&gt_dil);

    let n_fg = fg_boundary.count();
    let n_gt = gt_boundary.count();

    let (precision, recall) = match (n_fg, n_gt) {
        (0, 0) => (1.0, 1.0),
        (0, _) => (1.0, 0.0),
        (_, 0) => (0.0, 1.0),
        _ => (fg_match as f64 / n_fg as f64, gt_match as f64 / n_gt as f64),
    };
    debug!(n_fg, n_gt, fg_match, gt_match, precision, recall, "boundary match");

    BoundaryScore {
        f_measure: calculate_f1(precision, recall),
        precision,
        recall,
    }
}
