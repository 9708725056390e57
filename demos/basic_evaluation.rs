//! Basic evaluation example demonstrating core functionality.

use polyseg_eval::{
    boundary::db_eval_boundary_detailed, evaluator::evaluate, load_from_string,
    loader::load_config_from_str, metrics::accuracy::eos_token, metrics::iou::iou_from_poly,
    accuracy, seg2bmap, train_accuracy, Polygon,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Polygon Segmentation Evaluation Example ===\n");

    // Example 1: IoU between two polygons
    println!("1. Polygon IoU");
    let pred = Polygon::from_xy(&[(10.0, 10.0), (50.0, 10.0), (50.0, 50.0), (10.0, 50.0)]);
    let gt = Polygon::from_xy(&[(14.0, 12.0), (54.0, 12.0), (54.0, 52.0), (14.0, 52.0)]);
    let result = iou_from_poly(pred, gt, 64, 64);
    println!("   Predicted pixels: {}", result.pred_mask.count());
    println!("   Ground truth pixels: {}", result.gt_mask.count());
    println!("   IoU: {:.4}", result.iou);
    println!();

    // Example 2: Boundary map
    println!("2. Boundary Map");
    let bmap = seg2bmap(&result.gt_mask, None, None);
    println!("   Boundary pixels of the ground truth: {}", bmap.count());
    println!();

    // Example 3: Boundary F-measure at several tolerances
    println!("3. Boundary F-measure");
    println!("   Tolerance | Precision | Recall | F-measure");
    println!("   ----------|-----------|--------|----------");
    for bound_th in [0.0, 1.0, 2.0, 5.0, 0.05] {
        let score = db_eval_boundary_detailed(&result.pred_mask, &result.gt_mask, bound_th);
        println!(
            "   {:>9.2} | {:>9.4} | {:>6.4} | {:>9.4}",
            bound_th, score.precision, score.recall, score.f_measure
        );
    }
    println!();

    // Example 4: Sequence accuracy of vertex codes
    println!("4. Sequence Accuracy");
    let grid_size = 28;
    let eos = eos_token(grid_size);
    let target = vec![vec![30, 58, 86, eos, 0, 0], vec![12, 40, eos, 0, 0, 0]];
    let validity = vec![
        vec![true, true, true, false, false, false],
        vec![true, true, false, false, false, false],
    ];
    let predictions = vec![vec![30, 58, 90, 114, eos, 0], vec![12, 40, eos, 0, 0, 0]];

    let seq = accuracy(&target, &validity, &predictions, grid_size)?;
    let train = train_accuracy(&target, &validity, &predictions, grid_size)?;
    println!("   EOS token: {}", eos);
    println!("   Accuracy (widened mask): {:.4}", seq.accuracy);
    println!("   Training accuracy: {:.4}", train);
    println!();

    // Example 5: Dataset evaluation from JSON
    println!("5. Dataset Evaluation");
    let dataset_json = r#"{
        "instances": [
            {
                "id": 1,
                "width": 64,
                "height": 64,
                "prediction": [[10, 10], [50, 10], [50, 50], [10, 50]],
                "ground_truth": [[14, 12], [54, 12], [54, 52], [14, 52]]
            },
            {
                "id": 2,
                "width": 64,
                "height": 64,
                "prediction": [[[4, 4], [20, 4], [12, 24]], [[40, 40], [60, 40], [60, 60]]],
                "ground_truth": [[[4, 4], [20, 4], [12, 24]]]
            }
        ]
    }"#;
    let dataset = load_from_string(dataset_json)?;
    let config = load_config_from_str(r#"{"boundary_thresholds": [1.0, 2.0, 0.05]}"#)?;

    let metrics = evaluate(&dataset, &config)?;
    println!("   Mean IoU: {:.4}", metrics.mean_iou);
    for threshold in &metrics.boundary_at_thresholds {
        println!(
            "   ├─ bound_th={:<5} P={:.4} R={:.4} F={:.4}",
            threshold.bound_th,
            threshold.score.precision,
            threshold.score.recall,
            threshold.score.f_measure
        );
    }
    println!();
    println!("   Per-Instance:");
    for instance in &metrics.per_instance {
        println!("   ├─ id={} IoU={:.4}", instance.id, instance.iou);
    }
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
