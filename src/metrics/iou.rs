//! Intersection over Union (IoU) calculation for region masks and polygons.

use crate::raster::{rasterize_all, FillRasterizer, Rasterizer};
use crate::types::{Mask, Polygons};

/// IoU between two rasterized polygon sets, with the masks that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyIou {
    pub iou: f64,
    /// Rasterized prediction, kept for visualization.
    pub pred_mask: Mask,
    /// Rasterized ground truth, kept for visualization.
    pub gt_mask: Mask,
}

/// Calculate the Intersection over Union (IoU) between two masks.
///
/// IoU is defined as TP / (TP + FP + FN). Two empty masks have an empty union
/// and score 0.0.
///
/// # Panics
///
/// Panics if the masks differ in shape.
///
/// # Example
///
/// ```
/// use polyseg_eval::metrics::iou::iou_from_mask;
/// use polyseg_eval::Mask;
///
/// let pred = Mask::from_rows(&[[1u8, 1, 0, 0]]).unwrap();
/// let gt = Mask::from_rows(&[[0u8, 1, 1, 0]]).unwrap();
/// assert!((iou_from_mask(&pred, &gt) - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn iou_from_mask(pred: &Mask, gt: &Mask) -> f64 {
    let true_positives = pred.intersection_count(gt);
    let false_positives = pred.count() - true_positives;
    let false_negatives = gt.count() - true_positives;

    let union = true_positives + false_positives + false_negatives;
    if union == 0 {
        return 0.0;
    }

    true_positives as f64 / union as f64
}

/// Rasterize predicted and ground-truth polygons and compute their IoU.
///
/// Each side is drawn onto its own `height × width` canvas with
/// [`FillRasterizer`]; polygons on the same side accumulate with logical OR.
///
/// # Example
///
/// ```
/// use polyseg_eval::metrics::iou::iou_from_poly;
/// use polyseg_eval::Polygon;
///
/// let square = Polygon::from_xy(&[(1.0, 1.0), (6.0, 1.0), (6.0, 6.0), (1.0, 6.0)]);
/// let result = iou_from_poly(square.clone(), square, 8, 8);
/// assert_eq!(result.iou, 1.0);
/// assert_eq!(result.pred_mask, result.gt_mask);
/// ```
pub fn iou_from_poly(
    pred: impl Into<Polygons>,
    gt: impl Into<Polygons>,
    width: usize,
    height: usize,
) -> PolyIou {
    iou_from_poly_with(&FillRasterizer, pred, gt, width, height)
}

/// Like [`iou_from_poly`], drawing with the given rasterizer.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
pub fn iou_from_poly_with<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    pred: impl Into<Polygons>,
    gt: impl Into<Polygons>,
    width: usize,
    height: usize,
) -> PolyIou {
    assert!(
        width > 0 && height > 0,
        "Canvas dimensions must be positive, got {width}x{height}"
    );

    let pred = pred.into();
    let gt = gt.into();
    let pred_mask = rasterize_all(rasterizer, pred.as_slice(), width, height);
    let gt_mask = rasterize_all(rasterizer, gt.as_slice(), width, height);

    PolyIou {
        iou: iou_from_mask(&pred_mask, &gt_mask),
        pred_mask,
        gt_mask,
    }
}
