mod patterns;
mod text;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use image::RgbaImage;
use log::{debug, info};
use patterns::Pattern;
use shape_rendr::{GridRenderer, PixelBuffer, RenderOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render images and text as shape-matched ASCII art
#[derive(Parser, Debug)]
#[command(name = "shape-ascii")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output width in characters
    #[arg(short, long, global = true, default_value = "80")]
    columns: u32,

    /// Output height in lines (default: follow the source aspect ratio)
    #[arg(short, long, global = true)]
    rows: Option<u32>,

    /// Contrast exponent (default: 1.5 for images, 2.0 for text)
    #[arg(long, global = true)]
    contrast: Option<f32>,

    /// Treat dark pixels as ink (for light terminal backgrounds)
    #[arg(short, long, global = true)]
    invert: bool,

    /// Spread rows across all CPU cores
    #[arg(long, global = true)]
    parallel: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image file
    Image {
        /// Path to a PNG, JPEG, BMP or other supported image
        path: PathBuf,
    },
    /// Render a string with a TrueType/OpenType font, then convert it
    Text {
        /// Text to render (use \n for multiple lines)
        text: String,

        /// Font file
        #[arg(short, long)]
        font: PathBuf,

        /// Font size in pixels
        #[arg(long, default_value = "48")]
        size: f32,
    },
    /// Convert a generated test pattern
    Demo {
        #[arg(value_enum, default_value = "circle")]
        pattern: Pattern,

        /// Pattern size in pixels (square)
        #[arg(long, default_value = "256")]
        size: u32,
    },
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let (source, base) = match &args.command {
        Command::Image { path } => (load_image(path)?, RenderOptions::default()),
        Command::Text { text, font, size } => {
            let font = text::load_font(font)?;
            let text = text.replace("\\n", "\n");
            (text::rasterize(&font, &text, *size)?, RenderOptions::for_text())
        }
        Command::Demo { pattern, size } => {
            (patterns::generate(*pattern, *size), RenderOptions::default())
        }
    };

    let options = build_options(&args, base, &source);
    debug!("Render options: {:?}", options);

    let start = Instant::now();
    let buffer = PixelBuffer::from(&source);
    let mut renderer = GridRenderer::new(options)?;
    let (art, stats) = if args.parallel {
        renderer.render_parallel(&buffer)
    } else {
        let art = renderer.render(&buffer);
        (art, renderer.cache_stats())
    };
    info!(
        "Rendered {}x{} source in {:.1} ms ({} cache hits, {} misses)",
        source.width(),
        source.height(),
        start.elapsed().as_secs_f64() * 1000.0,
        stats.hits,
        stats.misses
    );

    match &args.output {
        Some(path) => std::fs::write(path, format!("{}\n", art))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", art),
    }

    Ok(())
}

/// Merge command-line overrides into the mode's defaults
fn build_options(args: &Args, base: RenderOptions, source: &RgbaImage) -> RenderOptions {
    let mut options = RenderOptions {
        columns: args.columns,
        contrast: args.contrast.unwrap_or(base.contrast),
        invert: args.invert,
        ..base
    };

    match args.rows {
        Some(rows) => options.rows = rows,
        None => options = options.with_aspect_rows(source.width(), source.height()),
    }

    options
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        bail!("image not found: {}", path.display());
    }

    let img = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());

    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_command() {
        let args = Args::try_parse_from(["shape-ascii", "image", "cat.png", "-c", "120", "--invert"])
            .unwrap();
        assert_eq!(args.columns, 120);
        assert!(args.invert);
        assert!(args.rows.is_none());
        assert!(matches!(args.command, Command::Image { .. }));
    }

    #[test]
    fn test_parse_text_requires_font() {
        assert!(Args::try_parse_from(["shape-ascii", "text", "hello"]).is_err());

        let args =
            Args::try_parse_from(["shape-ascii", "text", "hello", "--font", "mono.ttf"]).unwrap();
        match args.command {
            Command::Text { size, .. } => assert_eq!(size, 48.0),
            _ => panic!("expected text command"),
        }
    }

    #[test]
    fn test_build_options_uses_mode_contrast() {
        let args = Args::try_parse_from(["shape-ascii", "demo", "-c", "40"]).unwrap();
        let source = RgbaImage::new(200, 100);

        let options = build_options(&args, RenderOptions::for_text(), &source);
        assert_eq!(options.contrast, 2.0);
        assert_eq!(options.columns, 40);
        assert_eq!(options.rows, 10);
    }

    #[test]
    fn test_build_options_explicit_overrides() {
        let args = Args::try_parse_from([
            "shape-ascii",
            "demo",
            "--rows",
            "7",
            "--contrast",
            "3.5",
        ])
        .unwrap();
        let source = RgbaImage::new(200, 100);

        let options = build_options(&args, RenderOptions::default(), &source);
        assert_eq!(options.rows, 7);
        assert_eq!(options.contrast, 3.5);
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().contains("image not found"));
    }
}
