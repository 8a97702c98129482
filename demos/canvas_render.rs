/*!
 * Example: Canvas-style rendering
 *
 * Reproduces what the interactive page does on submit: read the size
 * exponent and scale factor, generate a heightmap, expand it to RGBA and
 * paint it onto a surface of matching size.
 *
 * Run with:
 *   cargo run --example canvas_render
 */

use perlin_terrain::{
    format_scale_factor, image_size_from_exponent, render_canvas, save_rgba_to_png,
    CanvasOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Canvas rendering example\n");

    for (exponent, scale_factor) in [(6, 0.3), (7, 0.1), (8, 0.05), (9, 0.01)] {
        let size = image_size_from_exponent(exponent)?;
        println!(
            "Rendering {}×{} canvas at scale {}",
            size,
            size,
            format_scale_factor(scale_factor)
        );

        let options = CanvasOptions {
            exponent,
            scale_factor,
            seed: Some(12345),
            verbose: false,
        };
        let surface = render_canvas(&options)?;

        let filename = format!("example-canvas-{}.png", size);
        save_rgba_to_png(&surface, &filename)?;
    }

    println!("\nCanvas example complete!");

    Ok(())
}
