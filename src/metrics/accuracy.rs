//! Point-wise accuracy of predicted polygon vertex sequences.
//!
//! Each sequence element is a grid cell code `y * grid_size + x`, or the
//! end-of-sequence sentinel `grid_size²`.

use crate::error::{Result, SegEvalError};
use tracing::warn;

/// Result of [`accuracy`]: the score plus the validity rows it was scored over.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceAccuracy {
    /// Mean per-row accuracy. NaN if any row ended up with no valid position.
    pub accuracy: f64,
    /// Validity rows after widening for over-long or EOS-less predictions.
    pub validity: Vec<Vec<bool>>,
}

/// End-of-sequence code for a grid of `grid_size × grid_size` cells.
pub fn eos_token(grid_size: usize) -> usize {
    grid_size * grid_size
}

/// Compute prediction accuracy, widening the validity mask from the predictions.
///
/// For each row the position of the largest predicted code (first one on
/// ties) is taken as the predicted end of sequence:
///
/// - if it holds the EOS code and lies beyond the number of valid
///   ground-truth steps, positions `[0, idx)` become valid;
/// - if it does not hold the EOS code, the whole row becomes valid.
///
/// The caller's validity rows are left untouched; the widened rows are
/// returned in [`SequenceAccuracy::validity`].
///
/// # Errors
///
/// Returns `EmptyInput` for an empty batch or an empty row, and
/// `ShapeMismatch` when the three batches do not share their shape.
///
/// # Example
///
/// ```
/// use polyseg_eval::metrics::accuracy::accuracy;
///
/// // grid_size 4 => EOS is 16
/// let target = vec![vec![5, 7, 16, 0, 0]];
/// let validity = vec![vec![true, true, false, false, false]];
/// let pred = vec![vec![5, 7, 9, 16, 0]];
///
/// let result = accuracy(&target, &validity, &pred, 4).unwrap();
/// assert_eq!(result.validity[0], vec![true, true, true, false, false]);
/// assert!((result.accuracy - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn accuracy(
    target_seq: &[Vec<usize>],
    validity_mask: &[Vec<bool>],
    pred_seq: &[Vec<usize>],
    grid_size: usize,
) -> Result<SequenceAccuracy> {
    check_batch(target_seq, validity_mask, pred_seq)?;
    let eos = eos_token(grid_size);

    let mut validity = validity_mask.to_vec();
    for (row, (pred, valid)) in pred_seq.iter().zip(validity.iter_mut()).enumerate() {
        let idx = argmax(pred).ok_or_else(|| {
            SegEvalError::EmptyInput(format!("prediction row {row} has no elements"))
        })?;

        if pred[idx] == eos {
            let n_valid = valid.iter().filter(|&&v| v).count();
            if idx > n_valid {
                valid[..idx].fill(true);
            }
        } else {
            valid.fill(true);
        }
    }

    let accuracy = masked_mean_accuracy(target_seq, &validity, pred_seq);
    Ok(SequenceAccuracy { accuracy, validity })
}

/// Compute prediction accuracy over the caller's validity mask as given.
///
/// `grid_size` is unused; it is accepted so the signature matches
/// [`accuracy`].
///
/// # Errors
///
/// Returns `EmptyInput` for an empty batch and `ShapeMismatch` when the three
/// batches do not share their shape.
pub fn train_accuracy(
    target_seq: &[Vec<usize>],
    validity_mask: &[Vec<bool>],
    pred_seq: &[Vec<usize>],
    _grid_size: usize,
) -> Result<f64> {
    check_batch(target_seq, validity_mask, pred_seq)?;
    Ok(masked_mean_accuracy(target_seq, validity_mask, pred_seq))
}

/// Index of the first maximum.
fn argmax(row: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in row.iter().enumerate() {
        if best.map_or(true, |b| v > row[b]) {
            best = Some(i);
        }
    }
    best
}

fn masked_mean_accuracy(
    target_seq: &[Vec<usize>],
    validity: &[Vec<bool>],
    pred_seq: &[Vec<usize>],
) -> f64 {
    let mut total = 0.0;
    let rows = target_seq.iter().zip(pred_seq).zip(validity);
    for (row, ((target, pred), valid)) in rows.enumerate() {
        let n_valid = valid.iter().filter(|&&v| v).count();
        let corrects = target
            .iter()
            .zip(pred)
            .zip(valid)
            .filter(|((t, p), &v)| v && t == p)
            .count();

        if n_valid == 0 {
            warn!(row, "sequence row has no valid positions, accuracy is NaN");
        }
        // 0/0 stays NaN on purpose
        total += corrects as f64 / n_valid as f64;
    }
    total / target_seq.len() as f64
}

fn check_batch(
    target_seq: &[Vec<usize>],
    validity_mask: &[Vec<bool>],
    pred_seq: &[Vec<usize>],
) -> Result<()> {
    if target_seq.is_empty() {
        return Err(SegEvalError::EmptyInput("sequence batch is empty".to_string()));
    }
    if validity_mask.len() != target_seq.len() || pred_seq.len() != target_seq.len() {
        return Err(SegEvalError::ShapeMismatch(format!(
            "batch sizes differ: target {}, validity {}, prediction {}",
            target_seq.len(),
            validity_mask.len(),
            pred_seq.len()
        )));
    }

    let rows = target_seq.iter().zip(validity_mask).zip(pred_seq);
    for (row, ((target, valid), pred)) in rows.enumerate() {
        if valid.len() != target.len() || pred.len() != target.len() {
            return Err(SegEvalError::ShapeMismatch(format!(
                "row {row} lengths differ: target {}, validity {}, prediction {}",
                target.len(),
                valid.len(),
                pred.len()
            )));
        }
    }

    Ok(())
}
