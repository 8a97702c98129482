/*!
 * Example: Generate a Perlin noise heightmap
 *
 * Generates a 256×256 grayscale heightmap with a fixed seed and saves it
 * as a single-channel PNG.
 *
 * Run with:
 *   cargo run --example generate_heightmap
 */

use perlin_terrain::{save_noise_to_png, PerlinNoiseConfig, PerlinNoiseGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating Perlin noise heightmap...\n");

    let config = PerlinNoiseConfig {
        image_size: 256,
        scale_factor: 0.1,
        seed: Some(42), // Use a seed for reproducibility
        verbose: true,
        ..Default::default()
    };

    let generator = PerlinNoiseGenerator::new(config)?;
    let heightmap = generator.generate()?;

    save_noise_to_png(&heightmap, "example-heightmap-256.png")?;

    println!("\nHeightmap saved to example-heightmap-256.png");
    println!("Size: {}×{} pixels", heightmap.width(), heightmap.height());
    println!("Data points: {}", heightmap.data.len());

    Ok(())
}
