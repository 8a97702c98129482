/*!
 * Canvas Rendering
 *
 * Paints a grayscale heightmap onto an RGBA pixel surface, the way an
 * interactive canvas shows it: every gray value `g` becomes `(g, g, g, 255)`.
 *
 * The canvas is driven by two inputs: a size exponent (the image is
 * `2^exponent` pixels square) and a scale factor. Both are range-checked
 * before anything is generated.
 */

use crate::generator::{GeneratorError, NoiseImage, PerlinNoiseConfig, PerlinNoiseGenerator};
use image::RgbaImage;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

/// Accepted size exponents (64 to 1024 pixels)
pub const EXPONENT_RANGE: RangeInclusive<u32> = 6..=10;

/// Accepted scale factors
pub const SCALE_FACTOR_RANGE: RangeInclusive<f64> = 0.01..=0.3;

/// Error types for canvas rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// Size exponent outside `EXPONENT_RANGE`
    #[error(
        "Size exponent must be between {min} and {max}, got {0}",
        min = EXPONENT_RANGE.start(),
        max = EXPONENT_RANGE.end()
    )]
    InvalidExponent(u32),

    /// Scale factor outside `SCALE_FACTOR_RANGE`
    #[error(
        "Scale factor must be between {min} and {max}, got {0}",
        min = SCALE_FACTOR_RANGE.start(),
        max = SCALE_FACTOR_RANGE.end()
    )]
    ScaleOutOfRange(f64),

    /// Pixel buffer does not match the surface dimensions
    #[error("Buffer of {len} bytes does not fit a {size}×{size} surface")]
    BufferSizeMismatch {
        /// Bytes supplied
        len: usize,
        /// Surface side length
        size: usize,
    },

    /// Heightmap generation failed
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Failed to save the surface
    #[error("Failed to save image: {0}")]
    ImageSaveError(#[from] image::ImageError),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Inputs of the canvas controls
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    /// Image side length is `2^exponent`
    pub exponent: u32,
    /// Pixel-to-noise-space multiplier
    pub scale_factor: f64,
    /// Optional random seed
    pub seed: Option<u64>,
    /// Show progress indicators
    pub verbose: bool,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            exponent: 8,
            scale_factor: 0.05,
            seed: None,
            verbose: false,
        }
    }
}

/// Image side length for a size exponent
pub fn image_size_from_exponent(exponent: u32) -> Result<usize> {
    if !EXPONENT_RANGE.contains(&exponent) {
        return Err(RenderError::InvalidExponent(exponent));
    }
    Ok(1usize << exponent)
}

/// Scale factor as shown next to its control
pub fn format_scale_factor(scale_factor: f64) -> String {
    format!("{:.2}", scale_factor)
}

/// Expand a grayscale buffer to RGBA with opaque alpha
pub fn expand_to_rgba(gray: &[u8]) -> Vec<u8> {
    gray.iter().flat_map(|&g| [g, g, g, 255]).collect()
}

/**
 * Paint a square grayscale buffer onto a `size × size` RGBA surface
 */
pub fn paint(gray: &[u8], size: usize) -> Result<RgbaImage> {
    let mismatch = || RenderError::BufferSizeMismatch {
        len: gray.len(),
        size,
    };

    if size.checked_mul(size) != Some(gray.len()) {
        return Err(mismatch());
    }
    let side = u32::try_from(size).map_err(|_| mismatch())?;

    RgbaImage::from_raw(side, side, expand_to_rgba(gray)).ok_or_else(mismatch)
}

/// Paint a generated heightmap
pub fn to_rgba_image(noise: &NoiseImage) -> Result<RgbaImage> {
    paint(&noise.data, noise.size)
}

/**
 * Generate and paint a heightmap from the canvas controls
 */
pub fn render_canvas(options: &CanvasOptions) -> Result<RgbaImage> {
    let image_size = image_size_from_exponent(options.exponent)?;
    if !SCALE_FACTOR_RANGE.contains(&options.scale_factor) {
        return Err(RenderError::ScaleOutOfRange(options.scale_factor));
    }

    let config = PerlinNoiseConfig {
        image_size,
        scale_factor: options.scale_factor,
        seed: options.seed,
        verbose: options.verbose,
        ..Default::default()
    };

    let noise = PerlinNoiseGenerator::new(config)?.generate()?;
    to_rgba_image(&noise)
}

/**
 * Save a painted surface to a PNG file
 */
pub fn save_rgba_to_png<P: AsRef<Path>>(surface: &RgbaImage, filename: P) -> Result<()> {
    surface.save(&filename)?;
    println!("Saved canvas to {}", filename.as_ref().display());

    Ok(())
}
