//! Shape Renderer - image to ASCII art by glyph shape matching
//!
//! Instead of mapping cell brightness onto a character ramp, every output
//! cell is sampled in six regions and matched against the six-region
//! signature of each printable character, so edges and strokes come out as
//! the glyphs that look most like them.
//!
//! # Example
//! ```no_run
//! use shape_rendr::{process_image, RenderOptions};
//! use image;
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let options = RenderOptions::default().with_aspect_rows(input.width(), input.height());
//! let art = process_image(&input, &options).unwrap();
//! println!("{}", art);
//! ```

pub mod buffer;
pub mod config;
pub mod enhance;
pub mod error;
pub mod matcher;
pub mod renderer;
pub mod sampler;
pub mod shapes;

// Re-export main types for convenience
pub use buffer::PixelBuffer;
pub use config::RenderOptions;
pub use error::RenderError;
pub use matcher::{CacheMode, CacheStats, CharacterMatcher};
pub use renderer::{GridRenderer, process_image};
pub use shapes::{CharacterShape, SamplingVector, ShapeLibrary};
