//! Texture synthesis failures.
//!
//! Any of these is recoverable: the caller substitutes a flat-color material
//! for the affected body and carries on.

/// Why a bitmap could not be produced or written.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("texture resolution must be non-zero")]
    ZeroResolution,

    #[error("texture resolution {requested} exceeds the limit of {max}")]
    ResolutionTooLarge { requested: u32, max: u32 },

    #[error("failed to allocate {bytes} bytes of pixel storage")]
    Allocation { bytes: usize },

    #[error("ring gradient has no color stops")]
    EmptyGradient,

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
