//! JSON loading utilities for evaluation datasets and configuration.

use crate::config::EvalConfig;
use crate::error::{Result, SegEvalError};
use crate::types::EvalDataset;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load an evaluation dataset from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```no_run
/// use polyseg_eval::loader::load_from_file;
///
/// let dataset = load_from_file("polygons.json").unwrap();
/// println!("Loaded {} instances", dataset.instances.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<EvalDataset> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let dataset: EvalDataset = serde_json::from_reader(reader)?;

    validate_dataset(&dataset)?;

    Ok(dataset)
}

/// Load an evaluation dataset from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON cannot be parsed or the dataset is invalid.
///
/// # Example
///
/// ```
/// use polyseg_eval::loader::load_from_string;
///
/// let json = r#"{
///     "instances": [
///         {
///             "id": 1,
///             "width": 16,
///             "height": 16,
///             "prediction": [[2, 2], [10, 2], [10, 10]],
///             "ground_truth": [[[2, 2], [12, 2], [12, 12]]]
///         }
///     ]
/// }"#;
/// let dataset = load_from_string(json).unwrap();
/// assert_eq!(dataset.instances.len(), 1);
/// ```
pub fn load_from_string(json_str: &str) -> Result<EvalDataset> {
    let dataset: EvalDataset = serde_json::from_str(json_str)?;
    validate_dataset(&dataset)?;
    Ok(dataset)
}

/// Load an evaluation configuration from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<EvalConfig> {
    let file = File::open(path)?;
    let config: EvalConfig = serde_json::from_reader(BufReader::new(file))?;
    config.validate()?;
    Ok(config)
}

/// Load an evaluation configuration from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON cannot be parsed or the configuration is invalid.
///
/// # Example
///
/// ```
/// use polyseg_eval::loader::load_config_from_str;
///
/// let config = load_config_from_str(r#"{"boundary_thresholds": [1.0, 3.0]}"#).unwrap();
/// assert_eq!(config.boundary_thresholds, vec![1.0, 3.0]);
/// ```
pub fn load_config_from_str(json_str: &str) -> Result<EvalConfig> {
    let config: EvalConfig = serde_json::from_str(json_str)?;
    config.validate()?;
    Ok(config)
}

/// Validate that a dataset can be rasterized and evaluated.
pub(crate) fn validate_dataset(dataset: &EvalDataset) -> Result<()> {
    if dataset.instances.is_empty() {
        return Err(SegEvalError::EmptyDataset(
            "Dataset must contain at least one instance".to_string(),
        ));
    }

    for instance in &dataset.instances {
        if instance.width == 0 || instance.height == 0 {
            return Err(SegEvalError::InvalidMask(format!(
                "Instance {} has empty canvas {}x{}",
                instance.id, instance.width, instance.height
            )));
        }

        let polygons = instance
            .prediction
            .as_slice()
            .iter()
            .chain(instance.ground_truth.as_slice());
        for polygon in polygons {
            if !polygon.is_finite() {
                return Err(SegEvalError::InvalidPolygon(format!(
                    "Instance {} has non-finite vertex coordinates",
                    instance.id
                )));
            }
        }
    }

    Ok(())
}
