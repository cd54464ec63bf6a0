use crate::buffer::PixelBuffer;
use crate::config::RenderOptions;
use crate::enhance::enhance_contrast;
use crate::error::RenderError;
use crate::matcher::{CacheMode, CacheStats, CharacterMatcher};
use crate::sampler::{cell_rect, sample_cell_with};
use crate::shapes::ShapeLibrary;
use image::RgbaImage;
use log::debug;
use rayon::prelude::*;

/// Renders pixel buffers to text, one character per grid cell
///
/// A renderer is one render session: its match cache persists across calls
/// to [`GridRenderer::render`] and is dropped with the renderer.
#[derive(Debug, Clone)]
pub struct GridRenderer<'a> {
    options: RenderOptions,
    matcher: CharacterMatcher<'a>,
}

impl GridRenderer<'static> {
    /// Create a renderer over the built-in shape library
    ///
    /// # Errors
    /// Returns `RenderError::InvalidConfig` if `options` fail validation.
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        Self::with_library(options, ShapeLibrary::standard())
    }
}

impl<'a> GridRenderer<'a> {
    /// Create a renderer over a custom shape library
    pub fn with_library(
        options: RenderOptions,
        library: &'a ShapeLibrary,
    ) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self {
            options,
            matcher: CharacterMatcher::new(library),
        })
    }

    /// Switch cache mode, discarding any cached matches
    pub fn with_cache_mode(mut self, mode: CacheMode) -> Self {
        self.matcher = CharacterMatcher::with_mode(self.matcher.library(), mode);
        self
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.matcher.cache_stats()
    }

    /// Convert a pixel buffer to ASCII art
    ///
    /// Pipeline per cell:
    /// 1. Sample six region densities
    /// 2. Invert them if requested (`v -> 1 - v`, exact, see
    ///    [`sample_cell_with`](crate::sampler::sample_cell_with))
    /// 3. Sharpen contrast
    /// 4. Match against the shape library
    ///
    /// # Returns
    /// `rows` lines of `columns` characters joined by `\n`, no trailing newline
    pub fn render(&mut self, buffer: &PixelBuffer) -> String {
        self.log_geometry(buffer);

        let lines: Vec<String> = (0..self.options.rows)
            .map(|row| render_row(&self.options, buffer, row, &mut self.matcher))
            .collect();

        log_cache(&self.matcher.cache_stats());
        lines.join("\n")
    }

    /// Same output as [`GridRenderer::render`], with rows spread over the
    /// rayon pool
    ///
    /// Each worker matches through its own private cache; the session cache
    /// is not touched.
    ///
    /// # Returns
    /// The text and the worker cache counters summed. `entries` counts a key
    /// once per worker that resolved it.
    pub fn render_parallel(&self, buffer: &PixelBuffer) -> (String, CacheStats) {
        self.log_geometry(buffer);

        let rows: Vec<(String, CacheStats)> = (0..self.options.rows)
            .into_par_iter()
            .map_init(
                || self.matcher.fresh(),
                |matcher, row| {
                    let before = matcher.cache_stats();
                    let line = render_row(&self.options, buffer, row, matcher);
                    (line, matcher.cache_stats().since(before))
                },
            )
            .collect();

        let stats = rows
            .iter()
            .fold(CacheStats::default(), |acc, (_, row_stats)| acc.merge(*row_stats));
        log_cache(&stats);

        let lines: Vec<String> = rows.into_iter().map(|(line, _)| line).collect();
        (lines.join("\n"), stats)
    }

    fn log_geometry(&self, buffer: &PixelBuffer) {
        debug!(
            "Rendering {}x{} buffer to {}x{} grid",
            buffer.width(),
            buffer.height(),
            self.options.columns,
            self.options.rows
        );
    }
}

fn log_cache(stats: &CacheStats) {
    debug!(
        "Match cache: {} hits, {} misses, {} entries",
        stats.hits, stats.misses, stats.entries
    );
}

/// Render one grid row
fn render_row(
    options: &RenderOptions,
    buffer: &PixelBuffer,
    row: u32,
    matcher: &mut CharacterMatcher,
) -> String {
    let mut line = String::with_capacity(options.columns as usize);

    for column in 0..options.columns {
        let cell = cell_rect(buffer, options, column, row);
        let vector = sample_cell_with(buffer, &cell, options.invert);
        let vector = enhance_contrast(vector, options.contrast);
        line.push(matcher.match_vector(&vector));
    }

    line
}

/// Converts an image to ASCII art with a fresh render session
///
/// # Errors
/// Returns `RenderError::InvalidConfig` if `options` fail validation.
pub fn process_image(input: &RgbaImage, options: &RenderOptions) -> Result<String, RenderError> {
    let mut renderer = GridRenderer::new(options.clone())?;
    Ok(renderer.render(&PixelBuffer::from(input)))
}
