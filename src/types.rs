//! Core data types: region masks, polygons and evaluation results.

use crate::error::{Result, SegEvalError};
use image::{DynamicImage, GrayImage, Luma};
use serde::{Deserialize, Serialize};

/// A single-channel binary region mask of `height × width` pixels.
///
/// Pixels are stored row-major. `true` marks foreground. Every constructor
/// thresholds its input so that any nonzero label counts as foreground, and
/// every constructor rejects zero-sized masks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl Mask {
    /// Create an all-background mask.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dims(width, height)?;
        Ok(Self::blank(width, height))
    }

    /// Create a mask from row-major boolean data.
    pub fn from_vec(width: usize, height: usize, data: Vec<bool>) -> Result<Self> {
        check_dims(width, height)?;
        if data.len() != width * height {
            return Err(SegEvalError::ShapeMismatch(format!(
                "expected {} pixels for a {width}x{height} mask, got {}",
                width * height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Create a mask from row-major label data; nonzero labels are foreground.
    pub fn from_labels<T>(width: usize, height: usize, labels: &[T]) -> Result<Self>
    where
        T: Copy + PartialEq + Default,
    {
        let zero = T::default();
        Self::from_vec(width, height, labels.iter().map(|&v| v != zero).collect())
    }

    /// Create a mask from a slice of equally long label rows.
    ///
    /// # Example
    ///
    /// ```
    /// use polyseg_eval::Mask;
    ///
    /// let mask = Mask::from_rows(&[[0u8, 1, 0], [0, 2, 0]]).unwrap();
    /// assert_eq!(mask.width(), 3);
    /// assert_eq!(mask.height(), 2);
    /// assert_eq!(mask.count(), 2);
    /// ```
    pub fn from_rows<T, R>(rows: &[R]) -> Result<Self>
    where
        T: Copy + PartialEq + Default,
        R: AsRef<[T]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut labels = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(SegEvalError::ShapeMismatch(format!(
                    "row {y} has {} columns, expected {width}",
                    row.len()
                )));
            }
            labels.extend_from_slice(row);
        }
        Self::from_labels(width, height, &labels)
    }

    /// Create a mask from an 8-bit grayscale image.
    pub fn from_gray(image: &GrayImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_labels(width as usize, height as usize, image.as_raw())
    }

    /// Create a mask from a decoded image, which must have exactly one channel.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        match image {
            DynamicImage::ImageLuma8(gray) => Self::from_gray(gray),
            DynamicImage::ImageLuma16(gray) => {
                let (width, height) = gray.dimensions();
                Self::from_labels(width as usize, height as usize, gray.as_raw())
            }
            other => Err(SegEvalError::InvalidMask(format!(
                "expected a single-channel image, got {} channels",
                other.color().channel_count()
            ))),
        }
    }

    /// Render the mask as a grayscale image with foreground at 255.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Luma([if self.get(x as usize, y as usize) { 255 } else { 0 }])
        })
    }

    /// Unchecked all-background constructor for internally derived maps.
    pub(crate) fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`, row count first.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the mask.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.data[y * self.width + x]
    }

    /// Set the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the mask.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.data[y * self.width + x] = value;
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if no pixel is foreground.
    pub fn is_blank(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Number of pixels set in both masks.
    ///
    /// # Panics
    ///
    /// Panics if the masks differ in shape.
    pub fn intersection_count(&self, other: &Mask) -> usize {
        self.assert_same_shape(other);
        self.data
            .iter()
            .zip(&other.data)
            .filter(|(&a, &b)| a && b)
            .count()
    }

    /// Accumulate `other` into `self` with logical OR.
    ///
    /// # Panics
    ///
    /// Panics if the masks differ in shape.
    pub fn union_with(&mut self, other: &Mask) {
        self.assert_same_shape(other);
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a |= b;
        }
    }

    pub(crate) fn assert_same_shape(&self, other: &Mask) {
        assert_eq!(
            self.shape(),
            other.shape(),
            "mask shapes differ: {:?} vs {:?}",
            self.shape(),
            other.shape()
        );
    }
}

fn check_dims(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(SegEvalError::InvalidMask(format!(
            "mask dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

/// A polygon vertex in pixel coordinates, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An ordered vertex sequence describing a closed polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Build a polygon from `(x, y)` pairs.
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// True if every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

impl From<Vec<[f64; 2]>> for Polygon {
    fn from(coords: Vec<[f64; 2]>) -> Self {
        Self::new(coords.into_iter().map(Point::from).collect())
    }
}

/// Either one polygon or a collection of polygons making up a single region.
///
/// Deserializes from `[[x, y], ...]` or `[[[x, y], ...], ...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Polygons {
    Single(Polygon),
    Many(Vec<Polygon>),
}

impl Polygons {
    /// View as a collection; a single polygon becomes a one-element slice.
    pub fn as_slice(&self) -> &[Polygon] {
        match self {
            Polygons::Single(p) => std::slice::from_ref(p),
            Polygons::Many(ps) => ps,
        }
    }
}

impl Default for Polygons {
    fn default() -> Self {
        Polygons::Many(Vec::new())
    }
}

impl From<Polygon> for Polygons {
    fn from(p: Polygon) -> Self {
        Polygons::Single(p)
    }
}

impl From<Vec<Polygon>> for Polygons {
    fn from(ps: Vec<Polygon>) -> Self {
        Polygons::Many(ps)
    }
}

/// One predicted/ground-truth pair to be evaluated on a `width × height` canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalInstance {
    pub id: u64,
    pub width: usize,
    pub height: usize,
    pub prediction: Polygons,
    pub ground_truth: Polygons,
}

/// A collection of instances to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalDataset {
    pub instances: Vec<EvalInstance>,
}

/// Boundary precision, recall and their F-measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryScore {
    pub f_measure: f64,
    pub precision: f64,
    pub recall: f64,
}

/// Boundary scores at one tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdScore {
    pub bound_th: f64,
    pub score: BoundaryScore,
}

/// Metrics for a single instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceMetrics {
    pub id: u64,
    pub iou: f64,
    /// One entry per configured boundary tolerance, in configuration order.
    pub boundary: Vec<ThresholdScore>,
}

/// Aggregated metrics over a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean mask IoU across instances
    pub mean_iou: f64,
    /// Mean boundary precision/recall/F per tolerance
    pub boundary_at_thresholds: Vec<ThresholdScore>,
    /// Per-instance breakdown
    pub per_instance: Vec<InstanceMetrics>,
}

impl EvaluationMetrics {
    /// Create a new empty EvaluationMetrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean boundary F-measure at `bound_th`, if that tolerance was evaluated.
    pub fn boundary_f(&self, bound_th: f64) -> Option<f64> {
        self.boundary_at_thresholds
            .iter()
            .find(|t| (t.bound_th - bound_th).abs() < 1e-12)
            .map(|t| t.score.f_measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_thresholds_nonzero() {
        let mask = Mask::from_labels(3, 1, &[0i32, 3, -1]).unwrap();
        assert_eq!(mask.data(), &[false, true, true]);
    }

    #[test]
    fn test_zero_sized_mask_rejected() {
        assert!(matches!(Mask::new(0, 4), Err(SegEvalError::InvalidMask(_))));
        assert!(Mask::from_rows::<u8, [u8; 0]>(&[]).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 1], vec![1]];
        assert!(matches!(
            Mask::from_rows(&rows[..]),
            Err(SegEvalError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_from_dynamic_rejects_color() {
        let rgb = DynamicImage::new_rgb8(4, 4);
        assert!(matches!(
            Mask::from_dynamic(&rgb),
            Err(SegEvalError::InvalidMask(_))
        ));

        let gray = DynamicImage::new_luma8(4, 4);
        let mask = Mask::from_dynamic(&gray).unwrap();
        assert_eq!(mask.shape(), (4, 4));
        assert!(mask.is_blank());
    }

    #[test]
    fn test_gray_conversion_preserves_pixels() {
        let mask = Mask::from_rows(&[[1u8, 0], [0, 1]]).unwrap();
        let gray = mask.to_gray();
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert_eq!(gray.get_pixel(1, 0)[0], 0);
        assert_eq!(Mask::from_gray(&gray).unwrap(), mask);
    }

    #[test]
    fn test_union_and_intersection() {
        let mut a = Mask::from_rows(&[[1u8, 0, 0]]).unwrap();
        let b = Mask::from_rows(&[[1u8, 1, 0]]).unwrap();
        assert_eq!(a.intersection_count(&b), 1);
        a.union_with(&b);
        assert_eq!(a.count(), 2);
    }

    #[test]
    fn test_polygons_deserialize_single_and_many() {
        let single: Polygons = serde_json::from_str("[[0, 0], [4, 0], [4, 4]]").unwrap();
        assert!(matches!(single, Polygons::Single(_)));
        assert_eq!(single.as_slice().len(), 1);
        assert_eq!(single.as_slice()[0].vertices[1], Point::new(4.0, 0.0));

        let many: Polygons =
            serde_json::from_str("[[[0, 0], [1, 0], [1, 1]], [[5, 5], [6, 5], [6, 6]]]").unwrap();
        assert_eq!(many.as_slice().len(), 2);
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, 2.0)).unwrap();
        assert_eq!(json, "[1.5,2.0]");
    }
}
