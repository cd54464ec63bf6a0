mod app;

use app::{CONTROL_PANEL_WIDTH, INPUT_SHARE, OUTPUT_FONT_SIZE, ShapeApp};
use eframe::egui;
use shape_rendr::RenderOptions;

/// Monospace advance width per point of font size
const GLYPH_ADVANCE: f32 = 0.6;
/// Line height per point of font size
const LINE_HEIGHT: f32 = 1.25;
/// Menu bar, headings, separators and panel margins
const CHROME: egui::Vec2 = egui::vec2(40.0, 96.0);

fn main() -> eframe::Result {
    env_logger::init();

    // Open wide enough for a default-sized grid without scrolling
    let grid = RenderOptions::default();
    let size = window_size(grid.columns, grid.rows, OUTPUT_FONT_SIZE);
    let min_size = window_size(grid.columns / 2, grid.rows / 2, OUTPUT_FONT_SIZE);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size(min_size)
            .with_title("Shape Renderer")
            .with_app_id("shape-rendr")
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "Shape Renderer",
        options,
        Box::new(|cc| Ok(Box::new(ShapeApp::new(cc)))),
    )
}

/// Window size that shows `columns` x `rows` of output at `font_size`
///
/// The output pane takes what the source image pane leaves of the central
/// panel, beside the controls panel.
fn window_size(columns: u32, rows: u32, font_size: f32) -> egui::Vec2 {
    let text = egui::vec2(
        columns as f32 * font_size * GLYPH_ADVANCE,
        rows as f32 * font_size * LINE_HEIGHT,
    );
    let central_width = text.x / (1.0 - INPUT_SHARE);

    egui::vec2(CONTROL_PANEL_WIDTH + central_width, text.y) + CHROME
}

/// Application icon: a slash and a dot on dark gray
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;

            let on_slash = (x + y).abs_diff(icon_size) <= 2 && y < 24;
            let on_dot = (14..18).contains(&x) && (26..30).contains(&y);

            let v = if on_slash || on_dot { 235 } else { 40 };
            pixels[idx..idx + 4].copy_from_slice(&[v, v, v, 255]);
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
