/// Basic example: Convert a simple test image to ASCII art
///
/// This draws a ring and a diagonal line and prints the shape-matched output
use shape_rendr::{GridRenderer, PixelBuffer, RenderOptions};
use image::{Rgba, RgbaImage};

fn main() {
    println!("Shape Renderer - Basic Example");
    println!("==============================\n");

    let width = 320;
    let height = 240;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));

    // White ring in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 90.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if (dist - radius).abs() < 6.0 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
    }

    // Diagonal line
    for i in 0..height {
        for t in 0..4 {
            img.put_pixel(i + t, i, Rgba([255, 255, 255, 255]));
        }
    }

    println!("Created test image: {}x{}", width, height);

    let options = RenderOptions {
        columns: 64,
        contrast: 1.5,
        invert: false,
        ..Default::default()
    }
    .with_aspect_rows(width, height);

    println!("Rendering with options:");
    println!("  - Grid: {}x{}", options.columns, options.rows);
    println!("  - Contrast: {}", options.contrast);
    println!("  - Invert: {}", options.invert);
    println!();

    let mut renderer = GridRenderer::new(options).expect("Invalid options");
    let art = renderer.render(&PixelBuffer::from(&img));
    println!("{}", art);

    let stats = renderer.cache_stats();
    println!(
        "\nCache: {} hits, {} misses, {} entries",
        stats.hits, stats.misses, stats.entries
    );
}
