//! Binary dilation with a disk-shaped structuring element.

use crate::types::Mask;

/// A structuring element stored as the set of `(dy, dx)` offsets it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Disk of the given radius: every integer offset with `dy² + dx² <= radius²`.
    ///
    /// A radius of 0 covers only the centre pixel. Offsets are always
    /// integers centred on the pixel, so a fractional radius such as 2.5
    /// gives an odd-sized, symmetric footprint. It does not reproduce the
    /// even-sized, half-pixel-shifted grid that `skimage.morphology.disk`
    /// builds from `arange(-r, r + 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use polyseg_eval::boundary::StructuringElement;
    ///
    /// assert_eq!(StructuringElement::disk(0.0).len(), 1);
    /// assert_eq!(StructuringElement::disk(1.0).len(), 5);
    /// assert_eq!(StructuringElement::disk(2.0).len(), 13);
    /// ```
    pub fn disk(radius: f64) -> Self {
        assert!(
            radius.is_finite() && radius >= 0.0,
            "Disk radius must be a non-negative number, got {radius}"
        );

        let extent = radius.floor() as isize;
        let r2 = radius * radius;
        let mut offsets = Vec::new();
        for dy in -extent..=extent {
            for dx in -extent..=extent {
                if ((dy * dy + dx * dx) as f64) <= r2 {
                    offsets.push((dy, dx));
                }
            }
        }
        Self { offsets }
    }

    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Number of pixels covered by the element.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Dilate a binary map with a structuring element.
///
/// An output pixel is set when any pixel under the element centred on it is
/// set in the input. Pixels outside the image count as unset. The element must
/// be symmetric, which every disk is.
pub fn binary_dilation(src: &Mask, element: &StructuringElement) -> Mask {
    let (h, w) = src.shape();
    let mut out = Mask::blank(w, h);

    for y in 0..h {
        for x in 0..w {
            if !src.get(x, y) {
                continue;
            }
            for &(dy, dx) in element.offsets() {
                let ny = y as isize + dy;
                let nx = x as isize + dx;
                if ny < 0 || nx < 0 || ny >= h as isize || nx >= w as isize {
                    continue;
                }
                out.set(nx as usize, ny as usize, true);
            }
        }
    }

    out
}
