//! Polygon rasterization onto region masks.

use crate::types::{Mask, Point, Polygon};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;

/// Fills polygons into a mask.
///
/// Implementations must OR the polygon into the existing canvas content:
/// pixels already set stay set.
pub trait Rasterizer {
    fn draw_poly(&self, canvas: &mut Mask, polygon: &Polygon);
}

/// Default rasterizer built on `imageproc`'s scanline polygon fill.
///
/// Vertices are rounded to the nearest pixel. A closing vertex that repeats
/// the first one is dropped, a single-vertex polygon sets one pixel, and an
/// empty polygon draws nothing. Polygons are clipped to the canvas padded by
/// one pixel before filling, so far-away vertices cost no more than
/// in-canvas ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillRasterizer;

impl Rasterizer for FillRasterizer {
    fn draw_poly(&self, canvas: &mut Mask, polygon: &Polygon) {
        let (width, height) = (canvas.width(), canvas.height());
        let mut points: Vec<PixelPoint<i32>> = clip_to_canvas(&polygon.vertices, width, height)
            .iter()
            .map(|p| PixelPoint::new(p.x.round() as i32, p.y.round() as i32))
            .collect();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        match points.as_slice() {
            [] => {}
            [p] => {
                let inside = p.x >= 0 && p.y >= 0;
                if inside && (p.x as usize) < width && (p.y as usize) < height {
                    canvas.set(p.x as usize, p.y as usize, true);
                }
            }
            _ => {
                let mut layer = GrayImage::new(width as u32, height as u32);
                draw_polygon_mut(&mut layer, &points, Luma([255u8]));
                for (x, y, px) in layer.enumerate_pixels() {
                    if px[0] != 0 {
                        canvas.set(x as usize, y as usize, true);
                    }
                }
            }
        }
    }
}

/// Sutherland-Hodgman clip of a closed vertex ring to `[-1, width] x [-1, height]`.
fn clip_to_canvas(vertices: &[Point], width: usize, height: usize) -> Vec<Point> {
    let (lo, max_x, max_y) = (-1.0, width as f64, height as f64);

    let ring = clip_edge(vertices, |p| p.x >= lo, |a, b| at_x(a, b, lo));
    let ring = clip_edge(&ring, |p| p.x <= max_x, |a, b| at_x(a, b, max_x));
    let ring = clip_edge(&ring, |p| p.y >= lo, |a, b| at_y(a, b, lo));
    clip_edge(&ring, |p| p.y <= max_y, |a, b| at_y(a, b, max_y))
}

fn clip_edge<F, G>(ring: &[Point], inside: F, intersect: G) -> Vec<Point>
where
    F: Fn(&Point) -> bool,
    G: Fn(&Point, &Point) -> Point,
{
    let Some(mut prev) = ring.last() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(ring.len() + 2);
    for cur in ring {
        match (inside(prev), inside(cur)) {
            (true, true) => out.push(*cur),
            (true, false) => out.push(intersect(prev, cur)),
            (false, true) => {
                out.push(intersect(prev, cur));
                out.push(*cur);
            }
            (false, false) => {}
        }
        prev = cur;
    }
    out
}

// Callers only pass edges that straddle the line, so the denominators are nonzero.
fn at_x(a: &Point, b: &Point, x: f64) -> Point {
    let t = (x - a.x) / (b.x - a.x);
    Point::new(x, a.y + t * (b.y - a.y))
}

fn at_y(a: &Point, b: &Point, y: f64) -> Point {
    let t = (y - a.y) / (b.y - a.y);
    Point::new(a.x + t * (b.x - a.x), y)
}

/// Rasterize every polygon onto a fresh `width × height` canvas.
pub(crate) fn rasterize_all<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    polygons: &[Polygon],
    width: usize,
    height: usize,
) -> Mask {
    let mut canvas = Mask::blank(width, height);
    for polygon in polygons {
        rasterizer.draw_poly(&mut canvas, polygon);
    }
    canvas
}
