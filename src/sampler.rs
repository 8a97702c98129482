/*!
 * Gradient Noise Sampling
 *
 * Evaluates classic 2D gradient ("Perlin") noise at a single point:
 *
 * 1. Floor the coordinate to find the lattice cell `(gx, gy)`
 * 2. Take the four corner gradients of that cell
 * 3. Dot each gradient with the vector from its corner to the point
 * 4. Ease the in-cell offsets with `3t² - 2t³`
 * 5. Blend the four dot products bilinearly with the eased offsets
 *
 * Sampling is a pure function of the coordinate and the field. The field
 * must cover `gx + 1` and `gy + 1`; anything else is a contract violation
 * and panics.
 */

use crate::gradient::GradientField;

/// A point in continuous noise space (pixel index × scale factor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Coordinate {
    /// Create a coordinate from its components
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Map pixel `(px, py)` into noise space
    pub fn from_pixel(px: usize, py: usize, scale_factor: f64) -> Self {
        Self {
            x: px as f64 * scale_factor,
            y: py as f64 * scale_factor,
        }
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Cubic ease curve `3t² - 2t³`, flat at both ends of [0, 1]
#[inline]
pub fn smooth_step(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Lattice cell containing `value`.
fn cell_index(value: f64, axis: char) -> usize {
    let cell = value.floor();
    assert!(
        cell.is_finite() && cell >= 0.0,
        "noise coordinate {} = {} has no lattice cell",
        axis,
        value
    );
    cell as usize
}

/**
 * Sample gradient noise at `coordinate`
 *
 * The result lies in [-1, 1], in practice well inside it.
 *
 * # Panics
 *
 * When the coordinate is negative or non-finite, or when the cell's far
 * corners fall outside `field`.
 */
pub fn sample_noise(coordinate: Coordinate, field: &GradientField) -> f64 {
    let gx = cell_index(coordinate.x, 'x');
    let gy = cell_index(coordinate.y, 'y');

    let top_left = field.get(gx, gy);
    let top_right = field.get(gx + 1, gy);
    let bottom_left = field.get(gx, gy + 1);
    let bottom_right = field.get(gx + 1, gy + 1);

    // Offset from the (gx, gy) corner, each in [0, 1)
    let ox = coordinate.x - gx as f64;
    let oy = coordinate.y - gy as f64;

    let dot_tl = top_left.dot(ox, oy);
    let dot_tr = top_right.dot(ox - 1.0, oy);
    let dot_bl = bottom_left.dot(ox, oy - 1.0);
    let dot_br = bottom_right.dot(ox - 1.0, oy - 1.0);

    let sx = smooth_step(ox);
    let sy = smooth_step(oy);

    let top = lerp(dot_tl, dot_tr, sx);
    let bottom = lerp(dot_bl, dot_br, sx);
    lerp(top, bottom, sy)
}
