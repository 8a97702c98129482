/*!
 * Perlin Noise Heightmap Generator
 *
 * Turns the gradient noise field into a square 8-bit grayscale image.
 *
 * PIPELINE
 * ========
 *
 * 1. Size the gradient grid: `ceil(image_size × scale_factor) + 2`
 *    - The largest sampled coordinate is `(image_size - 1) × scale_factor`
 *    - Its floor plus one (the far corner) stays strictly below the grid size
 *
 * 2. Build one gradient field of that size from the configured RNG
 *
 * 3. Rasterize: sample pixel `(x, y)` at `(x × scale, y × scale)`
 *    - Rows are independent, so they can be sampled in parallel against the
 *      shared, read-only field without changing the result
 *
 * 4. Quantize: `floor((v + 1) × 127.5)`
 *    - Noise of -1 maps to 0, +1 maps to 255, 0 maps to 127
 *    - The affine map is unclamped; how values outside [0, 255] are stored in
 *      the byte buffer is chosen by `QuantizeMode`
 *
 * 5. Pack row-major into a single-channel buffer of `image_size²` bytes
 *
 * RANDOMNESS
 * ==========
 * The field is the only random part. With `seed: Some(n)` the whole image is
 * reproducible; with `seed: None` every run draws a fresh entropy seed.
 */

use crate::gradient::GradientField;
use crate::sampler::{sample_noise, Coordinate};
use image::GrayImage;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Largest accepted image side length
pub const MAX_IMAGE_SIZE: usize = 16_384;

/// Largest accepted number of gradient grid cells (`grid_size²`), 256 MiB of vectors
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// How quantized pixel values outside [0, 255] are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantizeMode {
    /// Keep the low eight bits (value modulo 256), as a plain byte store does
    #[default]
    Wrap,
    /// Saturate into [0, 255]
    Clamp,
}

impl QuantizeMode {
    /// Store an unclamped pixel value as a byte
    pub fn pack(self, pixel: i32) -> u8 {
        match self {
            // `as` keeps the low byte, i.e. rem_euclid(256)
            QuantizeMode::Wrap => pixel as u8,
            QuantizeMode::Clamp => pixel.clamp(0, 255) as u8,
        }
    }
}

/// Configuration for heightmap generation
#[derive(Debug, Clone)]
pub struct PerlinNoiseConfig {
    /// Width and height of the square output in pixels
    pub image_size: usize,
    /// Pixel-to-noise-space multiplier (smaller = smoother, larger features)
    pub scale_factor: f64,
    /// Optional random seed for reproducible results
    pub seed: Option<u64>,
    /// Byte packing of out-of-range pixel values
    pub quantize: QuantizeMode,
    /// Sample rows on the rayon thread pool
    pub parallel: bool,
    /// Show progress indicators
    pub verbose: bool,
}

impl Default for PerlinNoiseConfig {
    fn default() -> Self {
        Self {
            image_size: 256,
            scale_factor: 0.1,
            seed: None,
            quantize: QuantizeMode::Wrap,
            parallel: true,
            verbose: false,
        }
    }
}

/// Error types for heightmap generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Image size is zero or too large
    #[error("Image size must be between 1 and {max}, got {0}", max = MAX_IMAGE_SIZE)]
    InvalidImageSize(usize),

    /// Scale factor is zero, negative, or not finite
    #[error("Scale factor must be a positive finite number, got {0}")]
    InvalidScaleFactor(f64),

    /// The gradient grid needed for this size and scale is too large
    #[error(
        "Image size {image_size} at scale {scale_factor} needs more than {max} gradient cells",
        max = MAX_GRID_CELLS
    )]
    GridTooLarge {
        /// Requested image size
        image_size: usize,
        /// Requested scale factor
        scale_factor: f64,
    },

    /// Pixel buffer does not match the image dimensions
    #[error("Buffer of {len} bytes does not fit a {size}×{size} image")]
    BufferSizeMismatch {
        /// Bytes supplied
        len: usize,
        /// Image side length
        size: usize,
    },

    /// Failed to save generated image
    #[error("Failed to save image: {0}")]
    ImageSaveError(#[from] image::ImageError),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/**
 * Side length of the gradient grid for `image_size` pixels at `scale_factor`
 *
 * Always greater than `floor((image_size - 1) × scale_factor) + 1`, the
 * largest far-corner index any pixel reads.
 */
pub fn grid_size_for(image_size: usize, scale_factor: f64) -> usize {
    (image_size as f64 * scale_factor).ceil() as usize + 2
}

/// Square 2D array of noise values, row-major by `(row = y, col = x)`
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseArray {
    size: usize,
    values: Vec<f64>,
}

impl NoiseArray {
    /// Build from explicit rows; `None` unless every row is as long as there are rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }

        Some(Self {
            size,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.size + x]
    }

    /// All values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Sample one row of pixels into `row`.
fn rasterize_row(row: &mut [f64], y: usize, scale_factor: f64, field: &GradientField) {
    for (x, value) in row.iter_mut().enumerate() {
        *value = sample_noise(Coordinate::from_pixel(x, y, scale_factor), field);
    }
}

/**
 * Sample `field` at every pixel of a `size × size` image
 *
 * `field` must be at least `grid_size_for(size, scale_factor)` wide.
 */
pub fn create_noise_array(size: usize, scale_factor: f64, field: &GradientField) -> NoiseArray {
    let mut values = vec![0.0; size * size];
    for (y, row) in values.chunks_mut(size.max(1)).enumerate() {
        rasterize_row(row, y, scale_factor, field);
    }

    NoiseArray { size, values }
}

/// Parallel form of [`create_noise_array`]; produces identical values.
pub fn create_noise_array_parallel(
    size: usize,
    scale_factor: f64,
    field: &GradientField,
) -> NoiseArray {
    create_noise_array_with_progress(size, scale_factor, field, true, None)
}

fn create_noise_array_with_progress(
    size: usize,
    scale_factor: f64,
    field: &GradientField,
    parallel: bool,
    progress: Option<&ProgressBar>,
) -> NoiseArray {
    let mut values = vec![0.0; size * size];
    let fill = |(y, row): (usize, &mut [f64])| {
        rasterize_row(row, y, scale_factor, field);
        if let Some(pb) = progress {
            pb.inc(1);
        }
    };

    if parallel {
        values.par_chunks_mut(size.max(1)).enumerate().for_each(fill);
    } else {
        values.chunks_mut(size.max(1)).enumerate().for_each(fill);
    }

    NoiseArray { size, values }
}

/// Map a noise value in [-1, 1] to a pixel value in [0, 255], unclamped
pub fn noise_to_pixel(noise: f64) -> i32 {
    ((noise + 1.0) * 127.5).floor() as i32
}

/// Quantize every value of `noise` into a row-major grayscale buffer
pub fn create_image_buffer(noise: &NoiseArray, mode: QuantizeMode) -> Vec<u8> {
    noise
        .values()
        .iter()
        .map(|&v| mode.pack(noise_to_pixel(v)))
        .collect()
}

/// Generated heightmap: a square single-channel image
#[derive(Debug, Clone)]
pub struct NoiseImage {
    /// Grayscale pixel data (0-255), row-major, `size²` bytes
    pub data: Vec<u8>,
    /// Width and height of the image
    pub size: usize,
}

impl NoiseImage {
    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.size
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.size
    }

    /// Channels per pixel (grayscale)
    pub fn channels(&self) -> usize {
        1
    }

    /// Consume the image, keeping only the pixel buffer
    pub fn into_buffer(self) -> Vec<u8> {
        self.data
    }
}

/**
 * Generator for Perlin noise heightmaps
 */
pub struct PerlinNoiseGenerator {
    image_size: usize,
    scale_factor: f64,
    grid_size: usize,
    quantize: QuantizeMode,
    parallel: bool,
    verbose: bool,
    rng: StdRng,

    // Progress bar
    progress: Option<ProgressBar>,
}

impl PerlinNoiseGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: PerlinNoiseConfig) -> Result<Self> {
        // Validation
        if config.image_size == 0 || config.image_size > MAX_IMAGE_SIZE {
            return Err(GeneratorError::InvalidImageSize(config.image_size));
        }
        if !(config.scale_factor.is_finite() && config.scale_factor > 0.0) {
            return Err(GeneratorError::InvalidScaleFactor(config.scale_factor));
        }
        // Side computed in f64 so huge scales cannot overflow the usize cast
        let grid_side = (config.image_size as f64 * config.scale_factor).ceil() + 2.0;
        if grid_side * grid_side > MAX_GRID_CELLS as f64 {
            return Err(GeneratorError::GridTooLarge {
                image_size: config.image_size,
                scale_factor: config.scale_factor,
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let progress = if config.verbose {
            Some(ProgressBar::new(config.image_size as u64))
        } else {
            None
        };

        if let Some(pb) = &progress {
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len} rows {msg}")
            {
                pb.set_style(style.progress_chars("##-"));
            }
        }

        Ok(Self {
            image_size: config.image_size,
            scale_factor: config.scale_factor,
            grid_size: grid_size_for(config.image_size, config.scale_factor),
            quantize: config.quantize,
            parallel: config.parallel,
            verbose: config.verbose,
            rng,
            progress,
        })
    }

    /// Side length of the gradient grid this generator will build
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /**
     * Build the gradient field and sample every pixel
     *
     * Returns the raw noise values before quantization.
     */
    pub fn generate_noise_array(&mut self) -> NoiseArray {
        let field = GradientField::new(self.grid_size, &mut self.rng);

        if let Some(pb) = &self.progress {
            pb.set_message("Sampling noise");
            pb.set_position(0);
        }

        let noise = create_noise_array_with_progress(
            self.image_size,
            self.scale_factor,
            &field,
            self.parallel,
            self.progress.as_ref(),
        );

        if let Some(pb) = &self.progress {
            pb.finish_with_message("Sampling complete");
        }

        noise
    }

    /**
     * Generate the heightmap
     */
    pub fn generate(mut self) -> Result<NoiseImage> {
        let start_time = std::time::Instant::now();

        if self.verbose {
            println!(
                "Generating {}×{} Perlin noise (scale {})...",
                self.image_size, self.image_size, self.scale_factor
            );
            println!(
                "Gradient grid: {}×{} vectors, {} sampling",
                self.grid_size,
                self.grid_size,
                if self.parallel { "parallel" } else { "sequential" }
            );
        }

        let noise = self.generate_noise_array();
        let data = create_image_buffer(&noise, self.quantize);

        if self.verbose {
            let elapsed = start_time.elapsed();
            println!(
                "Perlin noise generation complete in {:.2}s",
                elapsed.as_secs_f32()
            );
        }

        Ok(NoiseImage {
            data,
            size: self.image_size,
        })
    }
}

/**
 * Convenience function: generate an `image_size²` grayscale buffer
 */
pub fn generate_perlin_noise(image_size: usize, scale_factor: f64) -> Result<Vec<u8>> {
    let config = PerlinNoiseConfig {
        image_size,
        scale_factor,
        ..Default::default()
    };
    let generator = PerlinNoiseGenerator::new(config)?;
    Ok(generator.generate()?.into_buffer())
}

/**
 * Save a heightmap as a single-channel PNG file
 */
pub fn save_noise_to_png<P: AsRef<Path>>(noise: &NoiseImage, filename: P) -> Result<()> {
    let mismatch = || GeneratorError::BufferSizeMismatch {
        len: noise.data.len(),
        size: noise.size,
    };

    if noise.size.checked_mul(noise.size) != Some(noise.data.len()) {
        return Err(mismatch());
    }
    let side = u32::try_from(noise.size).map_err(|_| mismatch())?;

    let img = GrayImage::from_raw(side, side, noise.data.clone()).ok_or_else(mismatch)?;

    img.save(&filename)?;
    println!("Saved Perlin noise to {}", filename.as_ref().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientVector;

    fn seeded(image_size: usize, scale_factor: f64, seed: u64) -> PerlinNoiseConfig {
        PerlinNoiseConfig {
            image_size,
            scale_factor,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_grid_size_for() {
        assert_eq!(grid_size_for(256, 0.1), 28);
        assert_eq!(grid_size_for(16, 0.1), 4);
        assert_eq!(grid_size_for(1, 0.5), 3);
        assert_eq!(grid_size_for(10, 1.0), 12);
    }

    #[test]
    fn test_grid_size_covers_far_corner() {
        let scales = [0.001, 0.01, 0.05, 0.1, 0.3, 0.5, 0.999, 1.0, 1.5, 2.0, 3.7];
        for image_size in 1..300 {
            for &scale in &scales {
                let max_coord = (image_size - 1) as f64 * scale;
                let far_corner = max_coord.floor() as usize + 1;
                assert!(
                    grid_size_for(image_size, scale) > far_corner,
                    "size {} scale {}",
                    image_size,
                    scale
                );
            }
        }
    }

    #[test]
    fn test_noise_to_pixel() {
        assert_eq!(noise_to_pixel(-1.0), 0);
        assert_eq!(noise_to_pixel(1.0), 255);
        assert_eq!(noise_to_pixel(0.0), 127);
        assert_eq!(noise_to_pixel(0.5), 191);
    }

    #[test]
    fn test_noise_to_pixel_unclamped() {
        assert_eq!(noise_to_pixel(1.1), 267);
        assert_eq!(noise_to_pixel(-1.1), -13);
    }

    #[test]
    fn test_quantize_modes() {
        assert_eq!(QuantizeMode::Wrap.pack(127), 127);
        assert_eq!(QuantizeMode::Wrap.pack(256), 0);
        assert_eq!(QuantizeMode::Wrap.pack(267), 11);
        assert_eq!(QuantizeMode::Wrap.pack(-1), 255);

        assert_eq!(QuantizeMode::Clamp.pack(267), 255);
        assert_eq!(QuantizeMode::Clamp.pack(-13), 0);
        assert_eq!(QuantizeMode::Clamp.pack(42), 42);
    }

    #[test]
    fn test_create_image_buffer_row_major() {
        let noise = NoiseArray::from_rows(vec![vec![-1.0, 0.0], vec![0.5, 1.0]]).unwrap();
        assert_eq!(
            create_image_buffer(&noise, QuantizeMode::Wrap),
            vec![0, 127, 191, 255]
        );
    }

    #[test]
    fn test_create_image_buffer_out_of_range() {
        let noise = NoiseArray::from_rows(vec![vec![-1.1, 1.1], vec![0.0, 0.0]]).unwrap();
        assert_eq!(
            create_image_buffer(&noise, QuantizeMode::Wrap),
            vec![243, 11, 127, 127]
        );
        assert_eq!(
            create_image_buffer(&noise, QuantizeMode::Clamp),
            vec![0, 255, 127, 127]
        );
    }

    #[test]
    fn test_noise_array_from_rows() {
        let noise = NoiseArray::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(noise.size(), 2);
        assert_eq!(noise.get(1, 0), 2.0);
        assert_eq!(noise.get(0, 1), 3.0);

        assert!(NoiseArray::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
        assert!(NoiseArray::from_rows(vec![vec![1.0, 2.0]]).is_none());
    }

    #[test]
    fn test_create_noise_array_matches_sampler() {
        let vectors: Vec<GradientVector> = (0..16)
            .map(|i| GradientVector::from_angle(i as f64 * 0.7))
            .collect();
        let field = GradientField::from_vectors(4, vectors).unwrap();

        let noise = create_noise_array(8, 0.25, &field);
        assert_eq!(noise.size(), 8);
        for y in 0..8 {
            for x in 0..8 {
                let expected = sample_noise(Coordinate::from_pixel(x, y, 0.25), &field);
                assert_eq!(noise.get(x, y), expected);
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = GradientField::new(grid_size_for(64, 0.2), &mut rng);

        let sequential = create_noise_array(64, 0.2, &field);
        let parallel = create_noise_array_parallel(64, 0.2, &field);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_config_validation() {
        assert!(PerlinNoiseGenerator::new(seeded(64, 0.1, 1)).is_ok());

        let result = PerlinNoiseGenerator::new(seeded(0, 0.1, 1));
        assert!(matches!(result, Err(GeneratorError::InvalidImageSize(0))));

        let result = PerlinNoiseGenerator::new(seeded(MAX_IMAGE_SIZE + 1, 0.1, 1));
        assert!(matches!(result, Err(GeneratorError::InvalidImageSize(_))));

        for scale in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let result = PerlinNoiseGenerator::new(seeded(64, scale, 1));
            assert!(matches!(result, Err(GeneratorError::InvalidScaleFactor(_))));
        }

        let result = PerlinNoiseGenerator::new(seeded(1024, 100.0, 1));
        assert!(matches!(result, Err(GeneratorError::GridTooLarge { .. })));
    }

    #[test]
    fn test_grid_cell_limit() {
        // Side lengths fine on their own, cell counts far beyond the limit
        for (size, scale) in [(16384, 3.99), (4096, 10.0), (MAX_IMAGE_SIZE, 1.0)] {
            let result = PerlinNoiseGenerator::new(seeded(size, scale, 1));
            assert!(
                matches!(result, Err(GeneratorError::GridTooLarge { .. })),
                "size {} scale {}",
                size,
                scale
            );
        }

        // 4094 + 2 = 4096 per side is exactly the limit
        let generator = PerlinNoiseGenerator::new(seeded(4094, 1.0, 1)).unwrap();
        assert_eq!(generator.grid_size() * generator.grid_size(), MAX_GRID_CELLS);
        assert!(PerlinNoiseGenerator::new(seeded(4095, 1.0, 1)).is_err());

        // Largest CLI inputs stay inside it
        assert!(PerlinNoiseGenerator::new(seeded(4096, 0.5, 1)).is_ok());
        assert!(PerlinNoiseGenerator::new(seeded(MAX_IMAGE_SIZE, 0.1, 1)).is_ok());
    }

    #[test]
    fn test_save_rejects_mismatched_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");

        let noise = NoiseImage {
            data: vec![0; 5],
            size: 2,
        };
        let result = save_noise_to_png(&noise, &path);
        assert!(matches!(
            result,
            Err(GeneratorError::BufferSizeMismatch { len: 5, size: 2 })
        ));
        assert!(!path.exists());

        let noise = NoiseImage {
            data: Vec::new(),
            size: usize::MAX,
        };
        assert!(matches!(
            save_noise_to_png(&noise, &path),
            Err(GeneratorError::BufferSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_generator_grid_size() {
        let generator = PerlinNoiseGenerator::new(seeded(256, 0.1, 1)).unwrap();
        assert_eq!(generator.grid_size(), 28);
    }

    #[test]
    fn test_generate_small_heightmap() {
        let generator = PerlinNoiseGenerator::new(seeded(16, 0.1, 42)).unwrap();
        let result = generator.generate().unwrap();

        assert_eq!(result.width(), 16);
        assert_eq!(result.height(), 16);
        assert_eq!(result.channels(), 1);
        assert_eq!(result.data.len(), 256);
    }

    #[test]
    fn test_generate_stays_in_band() {
        // Noise inside [-1, 1] never needs wrapping or clamping
        let wrapped = PerlinNoiseGenerator::new(seeded(128, 0.07, 9))
            .unwrap()
            .generate()
            .unwrap();
        let clamped = PerlinNoiseGenerator::new(PerlinNoiseConfig {
            quantize: QuantizeMode::Clamp,
            ..seeded(128, 0.07, 9)
        })
        .unwrap()
        .generate()
        .unwrap();

        assert_eq!(wrapped.data, clamped.data);
    }

    #[test]
    fn test_generate_reproducible() {
        let a = PerlinNoiseGenerator::new(seeded(32, 0.15, 12345))
            .unwrap()
            .generate()
            .unwrap();
        let b = PerlinNoiseGenerator::new(seeded(32, 0.15, 12345))
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(a.data, b.data);
    }

    #[test]
    fn test_generate_different_seeds() {
        let a = PerlinNoiseGenerator::new(seeded(32, 0.15, 111))
            .unwrap()
            .generate()
            .unwrap();
        let b = PerlinNoiseGenerator::new(seeded(32, 0.15, 222))
            .unwrap()
            .generate()
            .unwrap();

        assert_ne!(a.data, b.data);
    }

    #[test]
    fn test_generate_sequential_matches_parallel() {
        let parallel = PerlinNoiseGenerator::new(seeded(48, 0.12, 7))
            .unwrap()
            .generate()
            .unwrap();
        let sequential = PerlinNoiseGenerator::new(PerlinNoiseConfig {
            parallel: false,
            ..seeded(48, 0.12, 7)
        })
        .unwrap()
        .generate()
        .unwrap();

        assert_eq!(parallel.data, sequential.data);
    }

    #[test]
    fn test_generate_verbose() {
        let config = PerlinNoiseConfig {
            verbose: true,
            ..seeded(8, 0.3, 3)
        };
        let result = PerlinNoiseGenerator::new(config).unwrap().generate().unwrap();
        assert_eq!(result.data.len(), 64);
    }

    #[test]
    fn test_origin_pixel_is_midgray() {
        // (0, 0) is a lattice point, where noise is exactly zero
        let result = PerlinNoiseGenerator::new(seeded(8, 0.3, 3))
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(result.data[0], 127);
    }

    #[test]
    fn test_convenience_function() {
        let buffer = generate_perlin_noise(16, 0.1).unwrap();
        assert_eq!(buffer.len(), 256);

        assert!(generate_perlin_noise(0, 0.1).is_err());
        assert!(generate_perlin_noise(16, 0.0).is_err());
    }

    #[test]
    fn test_single_pixel_image() {
        let buffer = generate_perlin_noise(1, 0.5).unwrap();
        assert_eq!(buffer, vec![127]);
    }

    #[test]
    fn test_default_config() {
        let config = PerlinNoiseConfig::default();
        assert_eq!(config.image_size, 256);
        assert_eq!(config.scale_factor, 0.1);
        assert_eq!(config.seed, None);
        assert_eq!(config.quantize, QuantizeMode::Wrap);
        assert!(config.parallel);
        assert!(!config.verbose);
    }
}
