//! Synthetic test images for the `demo` command

use clap::ValueEnum;
use image::{Rgba, RgbaImage};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// Filled circle with a soft rim
    Circle,
    /// Left-to-right luminance ramp
    Gradient,
    /// Alternating squares
    Checker,
}

/// Generate a `size` x `size` pattern, white ink on black
pub fn generate(pattern: Pattern, size: u32) -> RgbaImage {
    let size = size.max(1);

    RgbaImage::from_fn(size, size, |x, y| {
        let v = match pattern {
            Pattern::Circle => circle(x, y, size),
            Pattern::Gradient => ((x as f32 + 0.5) / size as f32 * 255.0) as u8,
            Pattern::Checker => {
                let square = (size / 8).max(1);
                if ((x / square) + (y / square)) % 2 == 0 { 255 } else { 0 }
            }
        };
        Rgba([v, v, v, 255])
    })
}

fn circle(x: u32, y: u32, size: u32) -> u8 {
    let center = size as f32 / 2.0;
    let radius = size as f32 * 0.4;
    let dx = x as f32 + 0.5 - center;
    let dy = y as f32 + 0.5 - center;
    let dist = (dx * dx + dy * dy).sqrt();

    // Linear falloff over a rim a tenth of the radius wide
    let rim = radius * 0.1;
    let t = ((radius - dist) / rim).clamp(0.0, 1.0);
    (t * 255.0) as u8
}
