//! Array-comparison metrics: sequence accuracy, mask IoU and F-scores.

pub mod accuracy;
pub mod fbeta;
pub mod iou;

pub use accuracy::{accuracy, eos_token, train_accuracy, SequenceAccuracy};
pub use fbeta::{calculate_f1, calculate_fbeta};
pub use iou::{iou_from_mask, iou_from_poly, iou_from_poly_with, PolyIou};
