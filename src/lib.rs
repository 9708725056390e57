//! # polyseg-eval
//!
//! A Rust library of evaluation metrics for polygon-based image segmentation.
//!
//! This library provides:
//! - **Sequence accuracy** of predicted polygon vertex codes, with and without
//!   end-of-sequence driven mask widening
//! - **Mask IoU** between binary masks or rasterized polygon sets
//! - **Boundary F-measure**: precision/recall of contour alignment within a
//!   pixel tolerance, computed from 1-pixel-wide boundary maps and disk dilation
//!
//! ## Features
//!
//! - Thin boundary maps with sub-pixel offset (`seg2bmap`)
//! - Explicit degenerate-case handling for empty boundaries
//! - Pluggable polygon rasterization through the [`Rasterizer`] trait
//! - Dataset evaluation from JSON at several boundary tolerances
//!
//! ## Quick Start
//!
//! ```rust
//! use polyseg_eval::boundary::db_eval_boundary;
//! use polyseg_eval::metrics::iou::iou_from_poly;
//! use polyseg_eval::Polygon;
//!
//! let pred = Polygon::from_xy(&[(4.0, 4.0), (20.0, 4.0), (20.0, 20.0), (4.0, 20.0)]);
//! let gt = Polygon::from_xy(&[(5.0, 4.0), (21.0, 4.0), (21.0, 20.0), (5.0, 20.0)]);
//!
//! let result = iou_from_poly(pred, gt, 32, 32);
//! println!("IoU: {:.4}", result.iou);
//!
//! let f = db_eval_boundary(&result.pred_mask, &result.gt_mask, 2.0);
//! assert_eq!(f, 1.0);
//! ```
//!
//! ## Dataset Format
//!
//! [`loader`] reads instances of predicted and ground-truth polygons:
//!
//! ```json
//! {
//!   "instances": [
//!     {
//!       "id": 1,
//!       "width": 224,
//!       "height": 224,
//!       "prediction": [[10, 10], [100, 12], [96, 90]],
//!       "ground_truth": [[[12, 10], [98, 10], [98, 92]]]
//!     }
//!   ]
//! }
//! ```
//!
//! All functions are synchronous and keep no global state, so they can be
//! called from several threads at once.

pub mod boundary;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod metrics;
pub mod raster;
pub mod types;

// Re-export commonly used types and functions
pub use boundary::{db_eval_boundary, db_eval_boundary_detailed, seg2bmap, DEFAULT_BOUND_TH};
pub use config::EvalConfig;
pub use error::{Result, SegEvalError};
pub use loader::{load_from_file, load_from_string};
pub use metrics::{accuracy, iou_from_mask, iou_from_poly, train_accuracy};
pub use raster::{FillRasterizer, Rasterizer};
pub use types::{
    BoundaryScore, EvalDataset, EvalInstance, EvaluationMetrics, InstanceMetrics, Mask, Point,
    Polygon, Polygons, ThresholdScore,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        let mask = Mask::new(4, 4).unwrap();
        assert!(mask.is_blank());
    }
}
