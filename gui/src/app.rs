use eframe::egui;
use image::RgbaImage;
use log::{debug, warn};
use shape_rendr::{CacheMode, CacheStats, GridRenderer, PixelBuffer, RenderOptions};
use std::time::Instant;

/// Starting width of the controls side panel
pub const CONTROL_PANEL_WIDTH: f32 = 250.0;
/// Share of the central panel given to the source image
pub const INPUT_SHARE: f32 = 0.35;
/// Starting point size of the monospace output
pub const OUTPUT_FONT_SIZE: f32 = 8.0;

/// Main application state for the shape renderer GUI
pub struct ShapeApp {
    /// Input image (original)
    input_image: Option<RgbaImage>,
    /// Rendered ASCII art
    output_text: Option<String>,
    /// Render parameters
    options: RenderOptions,

    /// Texture handle for input image display
    input_texture: Option<egui::TextureHandle>,

    /// Derive rows from the image aspect ratio instead of the slider
    auto_rows: bool,
    /// Memoize matches by quantized key
    cache_enabled: bool,
    /// Render rows on the rayon pool
    parallel: bool,
    /// Point size of the monospace output
    output_font_size: f32,

    /// Whether to automatically reprocess when parameters change
    auto_process: bool,
    /// Flag indicating parameters have changed and reprocessing is needed
    needs_reprocess: bool,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Cache counters from the last render, summed over workers when parallel
    last_stats: Option<CacheStats>,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl Default for ShapeApp {
    fn default() -> Self {
        Self {
            input_image: None,
            output_text: None,
            options: RenderOptions::default(),
            input_texture: None,
            auto_rows: true,
            cache_enabled: true,
            parallel: false,
            output_font_size: OUTPUT_FONT_SIZE,
            auto_process: true,
            needs_reprocess: false,
            last_process_time_ms: 0.0,
            last_stats: None,
            error_message: None,
        }
    }
}

impl ShapeApp {
    /// Create a new shape renderer application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Load an image from file path
    pub fn load_image(&mut self, path: &std::path::Path) {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                debug!("Loaded {} ({}x{})", path.display(), rgba.width(), rgba.height());

                self.input_image = Some(rgba);
                self.input_texture = None; // Clear old texture
                self.output_text = None;
                self.needs_reprocess = true;
                self.error_message = None;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Save the rendered text to file
    pub fn save_output(&self, path: &std::path::Path) -> Result<(), String> {
        match &self.output_text {
            Some(text) => std::fs::write(path, format!("{}\n", text))
                .map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No output to save".to_string()),
        }
    }

    /// Options for the current image, with auto rows applied
    fn effective_options(&self, input: &RgbaImage) -> RenderOptions {
        if self.auto_rows {
            self.options
                .clone()
                .with_aspect_rows(input.width(), input.height())
        } else {
            self.options.clone()
        }
    }

    /// Render the input image with current options
    fn process(&mut self) {
        let Some(ref input) = self.input_image else {
            return;
        };

        let start = Instant::now();
        let options = self.effective_options(input);
        let mode = if self.cache_enabled {
            CacheMode::Enabled
        } else {
            CacheMode::Disabled
        };

        match GridRenderer::new(options) {
            Ok(renderer) => {
                let mut renderer = renderer.with_cache_mode(mode);
                let buffer = PixelBuffer::from(input);

                let (text, stats) = if self.parallel {
                    renderer.render_parallel(&buffer)
                } else {
                    let text = renderer.render(&buffer);
                    (text, renderer.cache_stats())
                };
                self.last_stats = Some(stats);

                self.last_process_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.output_text = Some(text);
                self.needs_reprocess = false;
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(format!("Invalid options: {}", e));
            }
        }
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.heading("Controls");
        ui.separator();

        // Grid settings
        ui.collapsing("Grid", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.options.columns, 10..=300).text("Columns"))
                .on_hover_text("Characters per line")
                .changed();

            changed |= ui
                .checkbox(&mut self.auto_rows, "Rows from aspect ratio")
                .on_hover_text("Derive the line count from the image shape")
                .changed();

            ui.add_enabled_ui(!self.auto_rows, |ui| {
                changed |= ui
                    .add(egui::Slider::new(&mut self.options.rows, 5..=200).text("Rows"))
                    .on_hover_text("Number of lines")
                    .changed();
            });
        });

        ui.add_space(8.0);

        // Matching settings
        ui.collapsing("Matching", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.options.contrast, 0.5..=4.0).text("Contrast"))
                .on_hover_text("Exponent applied to each cell relative to its peak")
                .changed();

            changed |= ui
                .checkbox(&mut self.options.invert, "Invert")
                .on_hover_text("Treat dark pixels as ink (light backgrounds)")
                .changed();

            changed |= ui
                .checkbox(&mut self.cache_enabled, "Match Cache")
                .on_hover_text("Reuse matches for cells with the same quantized shape")
                .changed();

            changed |= ui
                .checkbox(&mut self.parallel, "Parallel Rows")
                .on_hover_text("Spread rows across CPU cores")
                .changed();
        });

        ui.add_space(8.0);

        ui.collapsing("Display", |ui| {
            ui.add(egui::Slider::new(&mut self.output_font_size, 4.0..=16.0).text("Font Size"));
        });

        ui.add_space(16.0);
        ui.separator();

        // Auto-process toggle
        ui.checkbox(&mut self.auto_process, "Auto-process")
            .on_hover_text("Automatically reprocess when parameters change");

        // Manual process button
        ui.add_enabled_ui(!self.auto_process || !self.needs_reprocess, |ui| {
            if ui.button("Process").clicked() {
                self.process();
            }
        });

        // Show processing time and cache counters
        if self.last_process_time_ms > 0.0 {
            ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
        }
        if let Some(stats) = self.last_stats {
            ui.label(format!(
                "Cache: {} hits / {} misses ({} keys)",
                stats.hits, stats.misses, stats.entries
            ));
        }

        changed
    }

    /// Convert RgbaImage to egui ColorImage
    fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| egui::Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();

        egui::ColorImage {
            size: [width as usize, height as usize],
            source_size: egui::Vec2::new(width as f32, height as f32),
            pixels,
        }
    }

    /// Display the source image
    fn display_input(
        ui: &mut egui::Ui,
        image: Option<&RgbaImage>,
        texture: &mut Option<egui::TextureHandle>,
    ) {
        ui.vertical(|ui| {
            ui.heading("Original");

            let Some(img) = image else {
                ui.label("No image loaded");
                return;
            };

            // Update texture if needed
            if texture.is_none() {
                *texture = Some(ui.ctx().load_texture(
                    "input",
                    Self::rgba_to_color_image(img),
                    egui::TextureOptions::default(),
                ));
            }

            if let Some(tex) = texture {
                let size = tex.size_vec2();
                let max_size = ui.available_size();
                let scale = ((max_size.x / size.x).min(max_size.y / size.y)).min(4.0);

                ui.image((tex.id(), size * scale));
                ui.label(format!("{}x{}", img.width(), img.height()));
            }
        });
    }

    /// Display the rendered text in a scrollable monospace block
    fn display_output(ui: &mut egui::Ui, text: Option<&str>, font_size: f32) {
        ui.vertical(|ui| {
            ui.heading("ASCII Output");

            match text {
                Some(text) => {
                    egui::ScrollArea::both().show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(text).monospace().size(font_size),
                            )
                            .wrap_mode(egui::TextWrapMode::Extend),
                        );
                    });
                }
                None => {
                    ui.label("Nothing rendered yet");
                }
            }
        });
    }
}

impl eframe::App for ShapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Save Output...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Text", &["txt"])
                            .save_file()
                            && let Err(e) = self.save_output(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    if ui.button("Copy to Clipboard").clicked() {
                        if let Some(ref text) = self.output_text {
                            ctx.copy_text(text.clone());
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.error_message = Some(
                            "Shape Renderer\nPicks each character by matching cell shape\n\nBuilt with Rust + egui".to_string()
                        );
                        ui.close();
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(CONTROL_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.render_controls(ui) {
                        self.needs_reprocess = true;
                    }
                });
            });

        // Central panel: image and text
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            if self.auto_process && self.needs_reprocess && self.input_image.is_some() {
                self.process();
            }

            ui.horizontal(|ui| {
                let available_width = ui.available_width();
                let input_width = available_width * INPUT_SHARE;

                ui.allocate_ui_with_layout(
                    egui::vec2(input_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_input(ui, self.input_image.as_ref(), &mut self.input_texture);
                    },
                );

                ui.separator();

                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width(), ui.available_height()),
                    egui::Layout::top_down(egui::Align::Min),
                    |ui| {
                        Self::display_output(
                            ui,
                            self.output_text.as_deref(),
                            self.output_font_size,
                        );
                    },
                );
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_process_renders_loaded_image() {
        let mut app = ShapeApp {
            input_image: Some(RgbaImage::from_pixel(64, 32, Rgba([255, 255, 255, 255]))),
            ..Default::default()
        };
        app.options.columns = 16;
        app.process();

        let text = app.output_text.as_deref().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4); // 16 * 32 / 64 * 0.5
        assert!(lines.iter().all(|l| *l == "@".repeat(16)));
        assert!(app.last_stats.is_some());
    }

    #[test]
    fn test_manual_rows() {
        let mut app = ShapeApp {
            input_image: Some(RgbaImage::new(64, 32)),
            auto_rows: false,
            ..Default::default()
        };
        app.options.columns = 10;
        app.options.rows = 7;
        app.process();
        assert_eq!(app.output_text.as_deref().unwrap().lines().count(), 7);
    }

    #[test]
    fn test_parallel_reports_stats() {
        let mut app = ShapeApp {
            input_image: Some(RgbaImage::from_pixel(64, 32, Rgba([90, 90, 90, 255]))),
            auto_rows: false,
            parallel: true,
            ..Default::default()
        };
        app.options.columns = 12;
        app.options.rows = 5;
        app.process();

        let stats = app.last_stats.unwrap();
        assert_eq!(stats.hits + stats.misses, 12 * 5);
    }

    #[test]
    fn test_save_without_output_fails() {
        let app = ShapeApp::default();
        assert!(app.save_output(std::path::Path::new("out.txt")).is_err());
    }
}
