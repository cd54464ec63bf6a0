//! Text to pixel buffer, via fontdue
//!
//! White glyph coverage is drawn onto a black canvas so that ink reads as
//! high luminance, the same convention images use.

use anyhow::{Context, Result, anyhow, bail};
use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};
use log::debug;
use std::path::Path;

/// Blank margin around the text, in pixels
const PADDING: u32 = 4;

/// One rasterized glyph, positioned relative to the pen and baseline
#[derive(Debug, Clone)]
pub struct Glyph {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
    /// Row-major coverage, `width * height` bytes
    pub coverage: Vec<u8>,
}

pub fn load_font(path: &Path) -> Result<Font> {
    if !path.exists() {
        bail!("font not found: {}", path.display());
    }

    let data =
        std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    Font::from_bytes(data, FontSettings::default())
        .map_err(|e| anyhow!("failed to parse font {}: {}", path.display(), e))
}

/// Rasterize `text` (possibly multi-line) at `px` pixels
pub fn rasterize(font: &Font, text: &str, px: f32) -> Result<RgbaImage> {
    let metrics = font
        .horizontal_line_metrics(px)
        .ok_or_else(|| anyhow!("font has no horizontal line metrics"))?;

    let lines: Vec<Vec<Glyph>> = text
        .lines()
        .map(|line| {
            line.chars()
                .map(|ch| {
                    let (m, coverage) = font.rasterize(ch, px);
                    Glyph {
                        xmin: m.xmin,
                        ymin: m.ymin,
                        width: m.width,
                        height: m.height,
                        advance: m.advance_width,
                        coverage,
                    }
                })
                .collect()
        })
        .collect();

    let line_height = metrics.new_line_size.ceil().max(1.0) as u32;
    debug!(
        "Text metrics: ascent={:.1}, descent={:.1}, line={}",
        metrics.ascent, metrics.descent, line_height
    );

    Ok(compose(&lines, metrics.ascent.ceil() as u32, line_height))
}

/// Draw positioned glyphs onto a padded canvas
///
/// Overlapping glyphs keep the stronger coverage.
pub fn compose(lines: &[Vec<Glyph>], ascent: u32, line_height: u32) -> RgbaImage {
    let text_width = lines
        .iter()
        .map(|line| line.iter().map(|g| g.advance).sum::<f32>().ceil() as u32)
        .max()
        .unwrap_or(0);
    let width = text_width + 2 * PADDING;
    let height = lines.len().max(1) as u32 * line_height + 2 * PADDING;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));

    for (row, line) in lines.iter().enumerate() {
        let baseline = (PADDING + row as u32 * line_height + ascent) as i32;
        let mut pen_x = PADDING as f32;

        for glyph in line {
            let left = pen_x.round() as i32 + glyph.xmin;
            let top = baseline - glyph.ymin - glyph.height as i32;

            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let x = left + gx as i32;
                    let y = top + gy as i32;
                    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                        continue;
                    }

                    let c = glyph.coverage[gy * glyph.width + gx];
                    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                    if c > pixel[0] {
                        *pixel = Rgba([c, c, c, 255]);
                    }
                }
            }

            pen_x += glyph.advance;
        }
    }

    canvas
}
