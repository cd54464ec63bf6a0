use crate::buffer::{LUMA_SCALE, PixelBuffer};
use crate::config::RenderOptions;
use crate::shapes::SamplingVector;

/// Horizontal sample positions as a fraction of cell width
const SAMPLE_COLS: [f32; 2] = [0.25, 0.75];

/// Vertical sample positions as a fraction of cell height
const SAMPLE_ROWS: [f32; 3] = [1.0 / 6.0, 0.5, 5.0 / 6.0];

/// Disk radius as a fraction of the shorter cell side
const RADIUS_SCALE: f32 = 0.15;

/// A cell in source pixel coordinates
///
/// Bounds are fractional: grid cells rarely land on whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Source rectangle for the grid cell at (column, row)
pub fn cell_rect(buffer: &PixelBuffer, options: &RenderOptions, column: u32, row: u32) -> CellRect {
    let width = buffer.width() as f32 / options.columns as f32;
    let height = buffer.height() as f32 / options.rows as f32;

    CellRect {
        x: column as f32 * width,
        y: row as f32 * height,
        width,
        height,
    }
}

/// Sample the six regions of a cell
///
/// Each region value is the mean luminance of the pixels whose unit square
/// touches a disk of radius `0.15 * min(width, height)` around the region's
/// sample point. Counting touching squares keeps cells only a few pixels
/// wide from sampling empty disks.
///
/// # Returns
/// Region densities ordered TL, TR, ML, MR, BL, BR
pub fn sample_cell(buffer: &PixelBuffer, cell: &CellRect) -> SamplingVector {
    sample_cell_with(buffer, cell, false)
}

/// Like [`sample_cell`], optionally returning `1 - v` for every region
///
/// Inversion is applied to the integer luminance sums before dividing, so
/// sampling the complement of a buffer and sampling the buffer inverted give
/// bit-identical vectors. An empty disk samples 0, or 1 when inverted.
pub fn sample_cell_with(buffer: &PixelBuffer, cell: &CellRect, invert: bool) -> SamplingVector {
    let radius = RADIUS_SCALE * cell.width.min(cell.height);
    let mut vector = [0.0; 6];

    for (row, fy) in SAMPLE_ROWS.iter().enumerate() {
        for (col, fx) in SAMPLE_COLS.iter().enumerate() {
            let cx = cell.x + cell.width * fx;
            let cy = cell.y + cell.height * fy;
            vector[row * 2 + col] = sample_disk(buffer, cx, cy, radius, invert);
        }
    }

    vector
}

/// Mean luminance of the pixels whose unit square touches the disk
///
/// Returns 0.0 when no pixel qualifies (1.0 when inverted).
fn sample_disk(buffer: &PixelBuffer, cx: f32, cy: f32, radius: f32, invert: bool) -> f32 {
    let (width, height) = buffer.dimensions();

    // Floor the lower bound, ceil the upper bound, clamp to the buffer
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil().max(0.0) as u32).min(width);
    let y1 = ((cy + radius).ceil().max(0.0) as u32).min(height);

    let radius_sq = radius * radius;
    let mut sum = 0u64;
    let mut count = 0u64;

    for py in y0..y1 {
        // Distance from the centre to the nearest point of the pixel square
        let dy = cy - (cy.clamp(py as f32, (py + 1) as f32));
        for px in x0..x1 {
            let dx = cx - (cx.clamp(px as f32, (px + 1) as f32));
            if dx * dx + dy * dy <= radius_sq {
                sum += buffer.weighted_luminance(px, py) as u64;
                count += 1;
            }
        }
    }

    let total = count * LUMA_SCALE as u64;
    if total == 0 {
        return if invert { 1.0 } else { 0.0 };
    }

    let ink = if invert { total - sum } else { sum };
    (ink as f64 / total as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> Vec<u8> {
        [value, value, value, 255].repeat((width * height) as usize)
    }

    #[test]
    fn test_cell_rect_fractional() {
        let data = solid(10, 7, 0);
        let buffer = PixelBuffer::new(10, 7, &data).unwrap();
        let options = RenderOptions {
            columns: 4,
            rows: 2,
            ..Default::default()
        };

        let rect = cell_rect(&buffer, &options, 3, 1);
        assert_eq!(rect.width, 2.5);
        assert_eq!(rect.height, 3.5);
        assert_eq!(rect.x, 7.5);
        assert_eq!(rect.y, 3.5);
    }

    #[test]
    fn test_white_cell_samples_one() {
        let data = solid(2, 2, 255);
        let buffer = PixelBuffer::new(2, 2, &data).unwrap();
        let rect = CellRect {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 2.0,
        };
        assert_eq!(sample_cell(&buffer, &rect), [1.0; 6]);
    }

    #[test]
    fn test_black_cell_samples_zero() {
        let data = solid(8, 8, 0);
        let buffer = PixelBuffer::new(8, 8, &data).unwrap();
        let rect = CellRect {
            x: 0.0,
            y: 0.0,
            width: 8.0,
            height: 8.0,
        };
        assert_eq!(sample_cell(&buffer, &rect), [0.0; 6]);
    }

    #[test]
    fn test_empty_buffer_samples_zero() {
        let buffer = PixelBuffer::new(0, 0, &[]).unwrap();
        let rect = CellRect {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(sample_cell(&buffer, &rect), [0.0; 6]);
    }

    #[test]
    fn test_left_half_white() {
        // 8x12 cell, left four columns white
        let mut data = solid(8, 12, 0);
        for y in 0..12 {
            for x in 0..4 {
                let idx = (y * 8 + x) * 4;
                data[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        let buffer = PixelBuffer::new(8, 12, &data).unwrap();
        let rect = CellRect {
            x: 0.0,
            y: 0.0,
            width: 8.0,
            height: 12.0,
        };

        let v = sample_cell(&buffer, &rect);
        assert_eq!(v, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bottom_band() {
        // 8x12 cell, bottom third white
        let mut data = solid(8, 12, 0);
        for y in 8..12 {
            for x in 0..8 {
                let idx = (y * 8 + x) * 4;
                data[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        let buffer = PixelBuffer::new(8, 12, &data).unwrap();
        let rect = CellRect {
            x: 0.0,
            y: 0.0,
            width: 8.0,
            height: 12.0,
        };

        let v = sample_cell(&buffer, &rect);
        assert_eq!(v, [0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_disk_clamped_to_buffer() {
        // A cell hanging off the right edge still samples the pixels it covers
        let data = solid(4, 4, 255);
        let buffer = PixelBuffer::new(4, 4, &data).unwrap();
        let v = sample_disk(&buffer, 3.9, 2.0, 1.0, false);
        assert_eq!(v, 1.0);

        let v = sample_disk(&buffer, 10.0, 2.0, 1.0, false);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_sub_pixel_cell_hits_one_pixel() {
        let mut data = solid(2, 1, 0);
        data[4..7].copy_from_slice(&[255, 255, 255]);
        let buffer = PixelBuffer::new(2, 1, &data).unwrap();

        // Tiny disk inside the second pixel
        assert_eq!(sample_disk(&buffer, 1.5, 0.5, 0.01, false), 1.0);
        assert_eq!(sample_disk(&buffer, 0.5, 0.5, 0.01, false), 0.0);
    }

    #[test]
    fn test_inverted_sampling() {
        let mut data = solid(2, 1, 0);
        data[4..7].copy_from_slice(&[255, 255, 255]);
        let buffer = PixelBuffer::new(2, 1, &data).unwrap();

        assert_eq!(sample_disk(&buffer, 1.5, 0.5, 0.01, true), 0.0);
        assert_eq!(sample_disk(&buffer, 0.5, 0.5, 0.01, true), 1.0);
        // Disk off the buffer: blank, or full ink when inverted
        assert_eq!(sample_disk(&buffer, 9.0, 0.5, 0.5, true), 1.0);
    }

    #[test]
    fn test_inverted_matches_complement() {
        // Mid-grey and coloured pixels on a fractional cell
        let data: Vec<u8> = (0..9 * 7)
            .flat_map(|i: u32| {
                let v = (i * 37 % 256) as u8;
                [v, v.wrapping_mul(3), 255 - v, 255]
            })
            .collect();
        let complement: Vec<u8> = data
            .chunks(4)
            .flat_map(|p| [255 - p[0], 255 - p[1], 255 - p[2], p[3]])
            .collect();

        let original = PixelBuffer::new(9, 7, &data).unwrap();
        let flipped = PixelBuffer::new(9, 7, &complement).unwrap();
        let rect = CellRect {
            x: 0.7,
            y: 0.3,
            width: 7.6,
            height: 6.1,
        };

        assert_eq!(
            sample_cell_with(&original, &rect, true),
            sample_cell(&flipped, &rect)
        );
    }
}
