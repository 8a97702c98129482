//! Perlin Terrain
//!
//! Generates 2D grayscale heightmaps from classic gradient ("Perlin") noise
//! and hands them to an image sink: a single-channel PNG file, or an RGBA
//! surface as an interactive canvas would display it.
//!
//! # Features
//!
//! - Gradient fields built from an injected, seedable random source
//! - Bilinear gradient interpolation with a `3t² - 2t³` ease curve
//! - Grid sizing that keeps every sample inside the field
//! - Parallel row rasterization with rayon
//! - Grayscale PNG output and RGBA canvas expansion
//!
//! # Quick Start
//!
//! ```no_run
//! use perlin_terrain::{PerlinNoiseConfig, PerlinNoiseGenerator, save_noise_to_png};
//!
//! let config = PerlinNoiseConfig {
//!     image_size: 256,
//!     scale_factor: 0.1,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let generator = PerlinNoiseGenerator::new(config).unwrap();
//! let heightmap = generator.generate().unwrap();
//! save_noise_to_png(&heightmap, "noise.png").unwrap();
//! ```
//!
//! ## Building blocks
//!
//! ```
//! use perlin_terrain::{sample_noise, Coordinate, GradientField};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let field = GradientField::new(4, &mut rng);
//! let value = sample_noise(Coordinate::new(1.25, 2.5), &field);
//! assert!(value.abs() <= 1.0);
//! ```
//!
//! # Algorithm
//!
//! 1. Size a square gradient grid as `ceil(image_size × scale) + 2`
//! 2. Fill it with unit vectors at uniformly random angles
//! 3. Sample every pixel `(x, y)` at noise coordinate `(x × scale, y × scale)`
//! 4. Quantize each value with `floor((v + 1) × 127.5)`

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Heightmap generation and quantization module
pub mod generator;
/// Gradient field module
pub mod gradient;
/// RGBA canvas rendering module
pub mod render;
/// Single-point noise sampling module
pub mod sampler;

// Re-export main types for convenience
pub use generator::{
    create_image_buffer, create_noise_array, create_noise_array_parallel, generate_perlin_noise,
    grid_size_for, noise_to_pixel, save_noise_to_png, GeneratorError, NoiseArray, NoiseImage,
    PerlinNoiseConfig, PerlinNoiseGenerator, QuantizeMode,
};
pub use gradient::{GradientField, GradientVector};
pub use render::{
    expand_to_rgba, format_scale_factor, image_size_from_exponent, paint, render_canvas,
    save_rgba_to_png, to_rgba_image, CanvasOptions, RenderError,
};
pub use sampler::{lerp, sample_noise, smooth_step, Coordinate};
