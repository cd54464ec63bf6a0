use thiserror::Error;

/// Errors surfaced by the rendering core
///
/// All of these are precondition failures detected before any cell is
/// rendered. Rendering itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid render options: {0}")]
    InvalidConfig(String),

    #[error("pixel buffer has {actual} bytes, expected {expected} (width * height * 4)")]
    BufferSize { expected: usize, actual: usize },

    #[error("shape catalog is empty")]
    EmptyCatalog,

    #[error("shape catalog has no blank (all-zero) signature")]
    MissingBlank,
}
