//! Comprehensive edge case and boundary condition tests.

use polyseg_eval::boundary::{
    binary_dilation, db_eval_boundary_detailed, seg2bmap, StructuringElement,
};
use polyseg_eval::evaluator::evaluate;
use polyseg_eval::loader::load_from_string;
use polyseg_eval::metrics::accuracy::{accuracy, eos_token, train_accuracy};
use polyseg_eval::metrics::iou::{iou_from_mask, iou_from_poly};
use polyseg_eval::{EvalConfig, Mask, Polygon, Polygons};
use std::time::{Duration, Instant};

fn block(width: usize, height: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> Mask {
    let mut m = Mask::new(width, height).unwrap();
    for y in y0..y1 {
        for x in x0..x1 {
            m.set(x, y, true);
        }
    }
    m
}

// ============================================================================
// BOUNDARY DEGENERATE CASES
// ============================================================================

#[test]
fn test_no_predicted_boundary() {
    let pred = Mask::new(12, 12).unwrap();
    let gt = block(12, 12, 3, 3, 8, 8);

    let score = db_eval_boundary_detailed(&pred, &gt, 2.0);
    assert_eq!(score.precision, 1.0);
    assert_eq!(score.recall, 0.0);
    assert_eq!(score.f_measure, 0.0);
}

#[test]
fn test_no_ground_truth_boundary() {
    let pred = block(12, 12, 3, 3, 8, 8);
    let gt = Mask::new(12, 12).unwrap();

    let score = db_eval_boundary_detailed(&pred, &gt, 2.0);
    assert_eq!(score.precision, 0.0);
    assert_eq!(score.recall, 1.0);
    assert_eq!(score.f_measure, 0.0);
}

#[test]
fn test_no_boundary_on_either_side() {
    // Full masks have no internal transitions and therefore no boundary.
    let pred = block(6, 6, 0, 0, 6, 6);
    let gt = Mask::new(6, 6).unwrap();

    let score = db_eval_boundary_detailed(&pred, &gt, 2.0);
    assert_eq!(score.precision, 1.0);
    assert_eq!(score.recall, 1.0);
    assert_eq!(score.f_measure, 1.0);
}

#[test]
fn test_single_pixel_mask_boundary() {
    let mut m = Mask::new(5, 5).unwrap();
    m.set(2, 2, true);
    let bmap = seg2bmap(&m, None, None);
    assert_eq!(bmap.count(), 4);

    let score = db_eval_boundary_detailed(&m, &m, 2.0);
    assert_eq!(score.f_measure, 1.0);
}

#[test]
fn test_one_pixel_wide_masks() {
    let column = block(1, 6, 0, 1, 1, 4);
    let bmap = seg2bmap(&column, None, None);
    // Only the south-neighbour rule applies: transitions at rows 0 and 3.
    assert_eq!(bmap.count(), 2);
    assert!(bmap.get(0, 0) && bmap.get(0, 3));
}

#[test]
fn test_partial_match_scores() {
    // Ground truth: two blocks. Prediction: only the first one.
    let gt = {
        let mut m = block(30, 30, 2, 2, 8, 8);
        m.union_with(&block(30, 30, 20, 20, 26, 26));
        m
    };
    let pred = block(30, 30, 2, 2, 8, 8);

    let score = db_eval_boundary_detailed(&pred, &gt, 1.0);
    assert_eq!(score.precision, 1.0);
    assert!((score.recall - 0.5).abs() < 1e-12);
    assert!((score.f_measure - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_dilation_of_blank_map_is_blank() {
    let blank = Mask::new(7, 7).unwrap();
    assert!(binary_dilation(&blank, &StructuringElement::disk(3.0)).is_blank());
}

// ============================================================================
// IOU EDGE CASES
// ============================================================================

#[test]
fn test_iou_both_empty() {
    let a = Mask::new(4, 4).unwrap();
    assert_eq!(iou_from_mask(&a, &a), 0.0);
}

#[test]
fn test_iou_one_empty() {
    let a = Mask::new(4, 4).unwrap();
    let b = block(4, 4, 0, 0, 2, 2);
    assert_eq!(iou_from_mask(&a, &b), 0.0);
    assert_eq!(iou_from_mask(&b, &a), 0.0);
}

#[test]
fn test_iou_subset() {
    let outer = block(10, 10, 0, 0, 10, 10);
    let inner = block(10, 10, 0, 0, 5, 10);
    assert!((iou_from_mask(&inner, &outer) - 0.5).abs() < 1e-12);
}

#[test]
fn test_iou_from_empty_polygon_sets() {
    let result = iou_from_poly(Polygons::Many(vec![]), Polygons::Many(vec![]), 8, 8);
    assert_eq!(result.iou, 0.0);
    assert!(result.pred_mask.is_blank());
    assert!(result.gt_mask.is_blank());
}

#[test]
fn test_iou_from_polygon_outside_canvas() {
    let outside = Polygon::from_xy(&[(50.0, 50.0), (60.0, 50.0), (60.0, 60.0)]);
    let inside = Polygon::from_xy(&[(1.0, 1.0), (4.0, 1.0), (4.0, 4.0)]);
    let result = iou_from_poly(outside, inside, 8, 8);
    assert!(result.pred_mask.is_blank());
    assert_eq!(result.iou, 0.0);
}

#[test]
fn test_iou_from_polygon_with_huge_coordinates() {
    let spike = Polygon::from_xy(&[(0.0, -1e10), (5.0, 1e10), (7.0, -1e10)]);
    let small = Polygon::from_xy(&[(1.0, 1.0), (6.0, 1.0), (1.0, 6.0)]);

    let result = iou_from_poly(spike, small, 8, 8);
    assert!((0.0..=1.0).contains(&result.iou));
    // The spike crosses the whole canvas between x = 2.5 and x = 6.
    assert!(result.pred_mask.get(4, 4));
    assert!(!result.pred_mask.get(0, 4));
}

#[test]
fn test_large_coordinates_rasterize_quickly() {
    let spike = Polygon::from_xy(&[(0.0, -5e8), (5.0, 5e8), (7.0, -5e8)]);
    let small = Polygon::from_xy(&[(1.0, 1.0), (6.0, 1.0), (1.0, 6.0)]);

    let start = Instant::now();
    let result = iou_from_poly(spike, small, 8, 8);
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(result.pred_mask.get(4, 4));
}

#[test]
fn test_evaluate_dataset_with_huge_finite_coordinates() {
    let json = r#"{
        "instances": [
            {
                "id": 1,
                "width": 8,
                "height": 8,
                "prediction": [[0, -3e9], [5, 3e9], [7, -3e9]],
                "ground_truth": [[1, 1], [6, 1], [1, 6]]
            }
        ]
    }"#;
    let dataset = load_from_string(json).unwrap();

    let metrics = evaluate(&dataset, &EvalConfig::default()).unwrap();
    assert!((0.0..=1.0).contains(&metrics.mean_iou));
    assert!(metrics.mean_iou > 0.0);
}

// ============================================================================
// SEQUENCE ACCURACY EDGE CASES
// ============================================================================

#[test]
fn test_eos_token_value() {
    assert_eq!(eos_token(28), 784);
}

#[test]
fn test_eos_at_index_three_with_two_valid_steps() {
    let grid_size = 5;
    let eos = eos_token(grid_size);
    let target = vec![vec![3, 8, eos, 0, 0, 0]];
    let validity = vec![vec![true, true, false, false, false, false]];
    let pred = vec![vec![3, 8, 12, eos, 0, 0]];

    let result = accuracy(&target, &validity, &pred, grid_size).unwrap();
    assert_eq!(
        result.validity,
        vec![vec![true, true, true, false, false, false]]
    );
    assert!((result.accuracy - 2.0 / 3.0).abs() < 1e-12);

    // train_accuracy ignores the prediction and scores the two valid steps.
    let train = train_accuracy(&target, &validity, &pred, grid_size).unwrap();
    assert_eq!(train, 1.0);
}

#[test]
fn test_eos_at_valid_count_does_not_extend() {
    let eos = eos_token(4);
    let target = vec![vec![1, 2, eos, 0]];
    let validity = vec![vec![true, true, false, false]];
    let pred = vec![vec![1, 2, eos, 0]];

    let result = accuracy(&target, &validity, &pred, 4).unwrap();
    assert_eq!(result.validity, validity);
    assert_eq!(result.accuracy, 1.0);
}

#[test]
fn test_accuracy_mean_across_rows() {
    let eos = eos_token(4);
    let target = vec![vec![1, 2, eos], vec![3, 4, eos]];
    let validity = vec![vec![true, true, true], vec![true, true, true]];
    let pred = vec![vec![1, 2, eos], vec![0, 0, eos]];

    let result = accuracy(&target, &validity, &pred, 4).unwrap();
    // Row scores 1.0 and 1/3.
    assert!((result.accuracy - (1.0 + 1.0 / 3.0) / 2.0).abs() < 1e-12);
}

#[test]
fn test_nan_propagates_through_mean() {
    let target = vec![vec![1, 2], vec![1, 2]];
    let validity = vec![vec![true, true], vec![false, false]];
    let acc = train_accuracy(&target, &validity, &target, 4).unwrap();
    assert!(acc.is_nan());
}
