/*!
 * Example: Compare scale factors
 *
 * Generates heightmaps of the same size and seed at several scale factors
 * to show how the scale controls feature size, and reports how long each
 * one took.
 *
 * Run with:
 *   cargo run --release --example compare_scales
 */

use perlin_terrain::{save_noise_to_png, PerlinNoiseConfig, PerlinNoiseGenerator};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Comparing Perlin noise scale factors\n");

    let scales = [0.01, 0.02, 0.05, 0.1, 0.2, 0.3];

    for &scale_factor in &scales {
        let config = PerlinNoiseConfig {
            image_size: 512,
            scale_factor,
            seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let generator = PerlinNoiseGenerator::new(config)?;
        let grid_size = generator.grid_size();
        let heightmap = generator.generate()?;
        let elapsed = start.elapsed();

        let min = heightmap.data.iter().min().copied().unwrap_or(0);
        let max = heightmap.data.iter().max().copied().unwrap_or(0);

        let filename = format!("example-scale-{:.2}.png", scale_factor);
        save_noise_to_png(&heightmap, &filename)?;

        println!(
            "  scale {:.2}: {}×{} grid, range {}-{}, {:.1}ms",
            scale_factor,
            grid_size,
            grid_size,
            min,
            max,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    println!("\nAll heightmaps generated!");

    Ok(())
}
