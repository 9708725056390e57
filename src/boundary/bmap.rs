//! Conversion of region masks into 1-pixel-wide boundary maps.

use crate::types::Mask;

/// Compute a binary boundary map with 1-pixel-wide boundaries.
///
/// A pixel is on the boundary when it differs from its east, south or
/// south-east neighbour, with out-of-image neighbours treated as background.
/// The last row only compares against the east neighbour and the last column
/// only against the south neighbour. The bottom-right pixel is never a
/// boundary. Boundaries therefore sit half a pixel towards the origin from
/// the true segment edge.
///
/// `width` and `height` request a smaller output map; both default to the
/// source dimensions. Source boundary pixel `(y, x)` is written to
/// `(1 + floor(y - 1 + height / h), 1 + floor(x - 1 + width / h))`.
/// Both terms divide by the source height `h`.
///
/// # Panics
///
/// Panics if the target is zero-sized or larger than the source, or if the
/// target and source aspect ratios differ by more than 0.01. Also panics if
/// the resampling formula maps a boundary pixel outside the target.
///
/// # Example
///
/// ```
/// use polyseg_eval::boundary::seg2bmap;
/// use polyseg_eval::Mask;
///
/// let seg = Mask::from_rows(&[[0u8, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
/// let bmap = seg2bmap(&seg, None, None);
/// assert_eq!(bmap.count(), 4);
/// ```
pub fn seg2bmap(seg: &Mask, width: Option<usize>, height: Option<usize>) -> Mask {
    let (h, w) = seg.shape();
    let width = width.unwrap_or(w);
    let height = height.unwrap_or(h);

    assert!(
        width > 0 && height > 0,
        "Can't convert {w}x{h} seg to {width}x{height} bmap."
    );
    let ar_target = width as f64 / height as f64;
    let ar_source = w as f64 / h as f64;
    assert!(
        width <= w && height <= h && (ar_target - ar_source).abs() <= 0.01,
        "Can't convert {w}x{h} seg to {width}x{height} bmap."
    );

    let b = boundary_pixels(seg);

    if width == w && height == h {
        return b;
    }

    let mut bmap = Mask::blank(width, height);
    let row_offset = height as f64 / h as f64;
    let col_offset = width as f64 / h as f64;
    for y in 0..h {
        for x in 0..w {
            if !b.get(x, y) {
                continue;
            }
            let j = 1.0 + ((y as f64 - 1.0) + row_offset).floor();
            let i = 1.0 + ((x as f64 - 1.0) + col_offset).floor();
            assert!(
                j >= 0.0 && i >= 0.0 && (j as usize) < height && (i as usize) < width,
                "boundary pixel ({y}, {x}) maps to ({j}, {i}), outside the {width}x{height} bmap"
            );
            bmap.set(i as usize, j as usize, true);
        }
    }
    bmap
}

fn boundary_pixels(seg: &Mask) -> Mask {
    let (h, w) = seg.shape();
    let at = |x: usize, y: usize| x < w && y < h && seg.get(x, y);

    let mut b = Mask::blank(w, h);
    for y in 0..h {
        for x in 0..w {
            let s = seg.get(x, y);
            let east = s ^ at(x + 1, y);
            let south = s ^ at(x, y + 1);
            let south_east = s ^ at(x + 1, y + 1);

            let last_row = y == h - 1;
            let last_col = x == w - 1;
            let value = match (last_row, last_col) {
                (true, true) => false,
                (true, false) => east,
                (false, true) => south,
                (false, false) => east || south || south_east,
            };
            b.set(x, y, value);
        }
    }
    b
}
