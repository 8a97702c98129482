/*!
 * Gradient Field Construction
 *
 * Builds the square lattice of pseudo-random unit vectors that gradient noise
 * interpolates between. Every lattice point carries one vector whose angle is
 * drawn uniformly from [0, 2π), so each vector has unit length.
 *
 * The random source is injected rather than taken from a process-wide
 * generator. Passing a seeded RNG yields the same field on every run; passing
 * an entropy-seeded RNG gives a fresh field per call.
 */

use rand::Rng;
use std::f64::consts::TAU;

/// A 2D unit vector stored at one lattice point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientVector {
    /// Horizontal component, `cos θ`
    pub x: f64,
    /// Vertical component, `sin θ`
    pub y: f64,
}

impl GradientVector {
    /// Create the unit vector pointing at `angle` radians
    pub fn from_angle(angle: f64) -> Self {
        let (y, x) = angle.sin_cos();
        Self { x, y }
    }

    /// Euclidean length of the vector
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product with the offset `(dx, dy)`
    #[inline]
    pub fn dot(&self, dx: f64, dy: f64) -> f64 {
        self.x * dx + self.y * dy
    }
}

/// Square grid of gradient vectors, stored row-major
#[derive(Debug, Clone)]
pub struct GradientField {
    size: usize,
    vectors: Vec<GradientVector>,
}

impl GradientField {
    /**
     * Build a `size × size` field, drawing one angle per cell from `rng`
     *
     * Cells are filled row by row, so a seeded RNG always produces the same
     * field. `size == 0` yields an empty field.
     */
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let vectors = (0..size * size)
            .map(|_| GradientVector::from_angle(rng.gen_range(0.0..TAU)))
            .collect();

        Self { size, vectors }
    }

    /// Wrap an explicit set of row-major vectors.
    ///
    /// Returns `None` when `vectors.len() != size * size`.
    pub fn from_vectors(size: usize, vectors: Vec<GradientVector>) -> Option<Self> {
        (vectors.len() == size * size).then_some(Self { size, vectors })
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of vectors (`size²`)
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the field holds no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /**
     * Gradient at column `x`, row `y`
     *
     * Panics when either index is outside the grid. Reading past the edge
     * means the caller sized the field too small for its coordinates, which
     * is a bug in the caller and must not be papered over by clamping.
     */
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> GradientVector {
        assert!(
            x < self.size && y < self.size,
            "gradient index ({}, {}) out of range for field of size {}",
            x,
            y,
            self.size
        );
        self.vectors[y * self.size + x]
    }

    /// All vectors in row-major order
    pub fn vectors(&self) -> &[GradientVector] {
        &self.vectors
    }
}
