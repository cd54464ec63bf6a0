use crate::error::RenderError;
use image::RgbaImage;

/// Weighted luminance of a pure white pixel: (299 + 587 + 114) * 255
pub const LUMA_SCALE: u32 = 255_000;

/// Read-only view of a row-major RGBA pixel buffer
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wrap raw RGBA bytes
    ///
    /// Zero width or height is accepted and renders as blank output.
    ///
    /// # Errors
    /// Returns `RenderError::BufferSize` if `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Perceptual luminance of the pixel at (x, y) in [0.0, 1.0]
    ///
    /// Formula: L = (0.299*R + 0.587*G + 0.114*B) / 255, alpha ignored.
    /// Integer weights keep pure white at exactly 1.0.
    ///
    /// Coordinates must be in bounds.
    pub fn luminance_at(&self, x: u32, y: u32) -> f32 {
        self.weighted_luminance(x, y) as f32 / LUMA_SCALE as f32
    }

    /// Luminance at (x, y) scaled to the integer range [0, LUMA_SCALE]
    ///
    /// The complement pixel (255 - R, 255 - G, 255 - B) has weighted
    /// luminance exactly `LUMA_SCALE - weighted_luminance(x, y)`.
    pub fn weighted_luminance(&self, x: u32, y: u32) -> u32 {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let r = self.data[idx] as u32;
        let g = self.data[idx + 1] as u32;
        let b = self.data[idx + 2] as u32;

        299 * r + 587 * g + 114 * b
    }
}

impl<'a> From<&'a RgbaImage> for PixelBuffer<'a> {
    fn from(img: &'a RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.as_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_buffer_size_mismatch() {
        let data = vec![0u8; 15];
        let err = PixelBuffer::new(2, 2, &data).unwrap_err();
        assert_eq!(
            err,
            RenderError::BufferSize {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_empty_buffer_is_accepted() {
        let buffer = PixelBuffer::new(0, 5, &[]).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.dimensions(), (0, 5));
    }

    #[test]
    fn test_luminance_extremes() {
        let data = [255, 255, 255, 255, 0, 0, 0, 255];
        let buffer = PixelBuffer::new(2, 1, &data).unwrap();
        assert_eq!(buffer.luminance_at(0, 0), 1.0);
        assert_eq!(buffer.luminance_at(1, 0), 0.0);
    }

    #[test]
    fn test_luminance_weights() {
        // Pure green is brighter than pure red, which is brighter than pure blue
        let data = [255, 0, 0, 0, 0, 255, 0, 0, 0, 0, 255, 0];
        let buffer = PixelBuffer::new(3, 1, &data).unwrap();
        let (r, g, b) = (
            buffer.luminance_at(0, 0),
            buffer.luminance_at(1, 0),
            buffer.luminance_at(2, 0),
        );
        assert!((r - 0.299).abs() < 1e-6);
        assert!((g - 0.587).abs() < 1e-6);
        assert!((b - 0.114).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_luminance_complement() {
        let data = [12, 200, 97, 255, 243, 55, 158, 255];
        let buffer = PixelBuffer::new(2, 1, &data).unwrap();
        assert_eq!(
            buffer.weighted_luminance(0, 0) + buffer.weighted_luminance(1, 0),
            LUMA_SCALE
        );
    }

    #[test]
    fn test_from_rgba_image() {
        let img = RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 0]));
        let buffer = PixelBuffer::from(&img);
        assert_eq!(buffer.dimensions(), (4, 3));
        // Alpha is ignored
        assert_eq!(buffer.luminance_at(3, 2), 1.0);
    }
}
