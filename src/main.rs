/*!
 * Perlin Terrain CLI - generate gradient-noise heightmaps from the command line
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use perlin_terrain::render::{EXPONENT_RANGE, SCALE_FACTOR_RANGE};
use perlin_terrain::{
    format_scale_factor, image_size_from_exponent, render_canvas, save_noise_to_png,
    save_rgba_to_png, CanvasOptions, PerlinNoiseConfig, PerlinNoiseGenerator, QuantizeMode,
};

/// Perlin noise heightmap tools
#[derive(Parser)]
#[command(name = "perlin-terrain")]
#[command(version)]
#[command(about = "Perlin noise heightmap generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a grayscale heightmap PNG
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "noise.png")]
        output: PathBuf,

        /// Image size (width and height)
        #[arg(short, long, default_value = "256")]
        size: usize,

        /// Scale factor (smaller = smoother terrain)
        #[arg(long, default_value = "0.1")]
        scale: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Saturate out-of-range pixels instead of wrapping them
        #[arg(long)]
        clamp: bool,

        /// Sample on a single thread
        #[arg(long)]
        sequential: bool,

        /// Show detailed generation progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a heightmap the way the canvas shows it (RGBA PNG)
    Canvas {
        /// Output file path
        #[arg(short, long, default_value = "canvas.png")]
        output: PathBuf,

        /// Size exponent: the image is 2^exponent pixels square
        #[arg(short, long, default_value = "8")]
        exponent: u32,

        /// Scale factor (smaller = smoother terrain)
        #[arg(long, default_value = "0.05")]
        scale: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Show detailed generation progress
        #[arg(short, long)]
        verbose: bool,
    },
}

fn create_parent_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output,
            size,
            scale,
            seed,
            clamp,
            sequential,
            verbose,
        } => {
            // Validate inputs
            if !(1..=4096).contains(&size) {
                anyhow::bail!("Size must be between 1 and 4096");
            }
            if !(scale > 0.0 && scale <= 0.5) {
                anyhow::bail!("Scale must be greater than 0 and at most 0.5");
            }

            if !verbose {
                println!("Generating {}×{} Perlin noise heightmap", size, size);
                println!("Scale: {}", scale);
                if let Some(s) = seed {
                    println!("Seed: {}", s);
                }
                println!("Output: {}", output.display());
                println!();
            }

            create_parent_dir(&output)?;

            let config = PerlinNoiseConfig {
                image_size: size,
                scale_factor: scale,
                seed,
                quantize: if clamp {
                    QuantizeMode::Clamp
                } else {
                    QuantizeMode::Wrap
                },
                parallel: !sequential,
                verbose,
            };

            let generator =
                PerlinNoiseGenerator::new(config).context("Failed to create generator")?;
            let heightmap = generator
                .generate()
                .context("Failed to generate Perlin noise")?;

            save_noise_to_png(&heightmap, &output).context("Failed to save heightmap")?;

            println!();
            println!("Done!");
        }

        Commands::Canvas {
            output,
            exponent,
            scale,
            seed,
            verbose,
        } => {
            // Validate inputs
            let size = image_size_from_exponent(exponent).with_context(|| {
                format!(
                    "Exponent must be between {} and {}",
                    EXPONENT_RANGE.start(),
                    EXPONENT_RANGE.end()
                )
            })?;
            if !SCALE_FACTOR_RANGE.contains(&scale) {
                anyhow::bail!(
                    "Scale must be between {} and {}",
                    SCALE_FACTOR_RANGE.start(),
                    SCALE_FACTOR_RANGE.end()
                );
            }

            println!("Canvas: {}×{} pixels", size, size);
            println!("Scale: {}", format_scale_factor(scale));
            println!("Output: {}", output.display());
            println!();

            create_parent_dir(&output)?;

            let options = CanvasOptions {
                exponent,
                scale_factor: scale,
                seed,
                verbose,
            };

            let surface = render_canvas(&options).context("Failed to render canvas")?;
            save_rgba_to_png(&surface, &output).context("Failed to save canvas")?;

            println!();
            println!("Done!");
        }
    }

    Ok(())
}
