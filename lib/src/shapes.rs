//! Character shape signatures
//!
//! Each printable character is described by six ink densities, one per
//! sampling region of a cell:
//!
//! ```text
//!  TL | TR
//!  ML | MR
//!  BL | BR
//! ```
//!
//! Values are hand-tuned approximations in [0.0, 1.0]. Catalog order is the
//! tie-breaking order used by the matcher: when two signatures are equally
//! close, the one listed first wins.

use crate::error::RenderError;
use std::sync::LazyLock;

/// Six region densities, ordered TL, TR, ML, MR, BL, BR
pub type SamplingVector = [f32; 6];

/// A character together with its geometric signature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterShape {
    pub ch: char,
    pub signature: SamplingVector,
}

const fn shape(ch: char, signature: SamplingVector) -> CharacterShape {
    CharacterShape { ch, signature }
}

/// Built-in catalog, lightest to heaviest
///
/// `@` is the saturation ceiling: every other signature is at or below 0.8
/// in every region.
pub const CATALOG: [CharacterShape; 37] = [
    // Blank
    shape(' ', [0.00, 0.00, 0.00, 0.00, 0.00, 0.00]),
    // Punctuation and thin marks
    shape('.', [0.00, 0.00, 0.00, 0.00, 0.15, 0.15]),
    shape(',', [0.00, 0.00, 0.00, 0.00, 0.25, 0.10]),
    shape('`', [0.25, 0.05, 0.00, 0.00, 0.00, 0.00]),
    shape('\'', [0.15, 0.15, 0.00, 0.00, 0.00, 0.00]),
    shape('^', [0.30, 0.30, 0.05, 0.05, 0.00, 0.00]),
    shape(':', [0.00, 0.00, 0.20, 0.20, 0.15, 0.15]),
    shape('_', [0.00, 0.00, 0.00, 0.00, 0.40, 0.40]),
    shape('-', [0.00, 0.00, 0.35, 0.35, 0.00, 0.00]),
    shape('=', [0.05, 0.05, 0.50, 0.50, 0.05, 0.05]),
    shape('+', [0.15, 0.15, 0.45, 0.45, 0.15, 0.15]),
    shape('*', [0.30, 0.30, 0.35, 0.35, 0.05, 0.05]),
    // Lines and bars
    shape('|', [0.30, 0.30, 0.30, 0.30, 0.30, 0.30]),
    shape('/', [0.00, 0.40, 0.25, 0.25, 0.40, 0.00]),
    shape('\\', [0.40, 0.00, 0.25, 0.25, 0.00, 0.40]),
    shape('(', [0.05, 0.35, 0.40, 0.05, 0.05, 0.35]),
    shape(')', [0.35, 0.05, 0.05, 0.40, 0.35, 0.05]),
    shape('<', [0.05, 0.30, 0.35, 0.00, 0.05, 0.30]),
    shape('>', [0.30, 0.05, 0.00, 0.35, 0.30, 0.05]),
    // Letters and digits
    shape('L', [0.45, 0.00, 0.45, 0.00, 0.50, 0.45]),
    shape('T', [0.50, 0.50, 0.25, 0.25, 0.25, 0.25]),
    shape('Y', [0.40, 0.40, 0.30, 0.30, 0.25, 0.25]),
    shape('7', [0.45, 0.50, 0.00, 0.35, 0.30, 0.00]),
    shape('J', [0.00, 0.45, 0.00, 0.45, 0.45, 0.40]),
    shape('o', [0.00, 0.00, 0.50, 0.50, 0.50, 0.50]),
    shape('C', [0.50, 0.40, 0.50, 0.00, 0.50, 0.40]),
    shape('U', [0.40, 0.40, 0.40, 0.40, 0.55, 0.55]),
    shape('O', [0.55, 0.55, 0.40, 0.40, 0.55, 0.55]),
    shape('X', [0.45, 0.45, 0.30, 0.30, 0.45, 0.45]),
    shape('H', [0.50, 0.50, 0.60, 0.60, 0.50, 0.50]),
    shape('%', [0.55, 0.40, 0.45, 0.45, 0.40, 0.55]),
    shape('&', [0.50, 0.40, 0.60, 0.45, 0.60, 0.55]),
    shape('M', [0.65, 0.65, 0.60, 0.60, 0.55, 0.55]),
    shape('W', [0.55, 0.55, 0.60, 0.60, 0.65, 0.65]),
    shape('#', [0.60, 0.60, 0.70, 0.70, 0.60, 0.60]),
    shape('B', [0.70, 0.60, 0.70, 0.60, 0.70, 0.60]),
    // Heaviest
    shape('@', [0.80, 0.80, 0.80, 0.80, 0.80, 0.80]),
];

static STANDARD: LazyLock<ShapeLibrary> = LazyLock::new(|| {
    ShapeLibrary::new(CATALOG.to_vec()).expect("built-in shape catalog must contain a blank entry")
});

/// An immutable, validated set of character shapes
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    shapes: Vec<CharacterShape>,
    blank: char,
    heaviest: char,
}

impl ShapeLibrary {
    /// Build a library from a list of shapes, kept in the given order
    ///
    /// # Errors
    /// `EmptyCatalog` if `shapes` is empty, `MissingBlank` if no entry has an
    /// all-zero signature.
    pub fn new(shapes: Vec<CharacterShape>) -> Result<Self, RenderError> {
        if shapes.is_empty() {
            return Err(RenderError::EmptyCatalog);
        }

        let blank = shapes
            .iter()
            .find(|s| s.signature.iter().all(|&v| v == 0.0))
            .map(|s| s.ch)
            .ok_or(RenderError::MissingBlank)?;

        // First entry with the largest total ink
        let mut heaviest = shapes[0];
        for s in &shapes[1..] {
            if s.signature.iter().sum::<f32>() > heaviest.signature.iter().sum::<f32>() {
                heaviest = *s;
            }
        }

        Ok(Self {
            shapes,
            blank,
            heaviest: heaviest.ch,
        })
    }

    /// The process-wide built-in library
    pub fn standard() -> &'static ShapeLibrary {
        &STANDARD
    }

    pub fn shapes(&self) -> &[CharacterShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Character with the all-zero signature
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Character with the most total ink
    pub fn heaviest(&self) -> char {
        self.heaviest
    }

    pub fn get(&self, ch: char) -> Option<&CharacterShape> {
        self.shapes.iter().find(|s| s.ch == ch)
    }
}
