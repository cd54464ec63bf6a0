use crate::error::RenderError;

/// Default contrast exponent for photographs and other raster input
pub const IMAGE_CONTRAST: f32 = 1.5;

/// Default contrast exponent for rasterized text
pub const TEXT_CONTRAST: f32 = 2.0;

/// Terminal cells are roughly twice as tall as they are wide
const CHAR_ASPECT: f32 = 0.5;

/// Options for one render invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Output grid
    pub columns: u32, // characters per line, default 80
    pub rows: u32,    // lines, default 40

    /// Matching
    pub contrast: f32, // exponent > 0, default 1.5
    pub invert: bool,  // treat dark pixels as ink, default false
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 40,
            contrast: IMAGE_CONTRAST,
            invert: false,
        }
    }
}

impl RenderOptions {
    /// Defaults tuned for rendered text (stronger contrast)
    pub fn for_text() -> Self {
        Self {
            contrast: TEXT_CONTRAST,
            ..Self::default()
        }
    }

    /// Derive `rows` from `columns` and the source aspect ratio
    ///
    /// The row count is halved to compensate for the tall shape of terminal
    /// character cells. At least one row is always produced.
    pub fn with_aspect_rows(mut self, width: u32, height: u32) -> Self {
        if width > 0 {
            let rows = (self.columns as f32 * height as f32 / width as f32 * CHAR_ASPECT).round();
            self.rows = (rows as u32).max(1);
        }
        self
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.columns == 0 {
            return Err(RenderError::InvalidConfig(
                "columns must be positive, got 0".to_string(),
            ));
        }
        if self.rows == 0 {
            return Err(RenderError::InvalidConfig(
                "rows must be positive, got 0".to_string(),
            ));
        }
        if !self.contrast.is_finite() || self.contrast <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "contrast must be a finite positive number, got {}",
                self.contrast
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        let options = RenderOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.contrast, IMAGE_CONTRAST);
    }

    #[test]
    fn test_text_defaults() {
        let options = RenderOptions::for_text();
        assert_eq!(options.contrast, TEXT_CONTRAST);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_grid() {
        let mut options = RenderOptions::default();
        options.columns = 0;
        assert!(options.validate().is_err());

        let mut options = RenderOptions::default();
        options.rows = 0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_invalid_contrast() {
        let mut options = RenderOptions::default();
        options.contrast = 0.0;
        assert!(options.validate().is_err());

        options.contrast = -1.0;
        assert!(options.validate().is_err());

        options.contrast = f32::NAN;
        assert!(options.validate().is_err());

        options.contrast = f32::INFINITY;
        assert!(matches!(
            options.validate(),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_aspect_rows() {
        let options = RenderOptions {
            columns: 80,
            ..Default::default()
        }
        .with_aspect_rows(800, 600);
        assert_eq!(options.rows, 30);

        // Very wide images still get one row
        let options = RenderOptions {
            columns: 10,
            ..Default::default()
        }
        .with_aspect_rows(1000, 1);
        assert_eq!(options.rows, 1);
    }
}
