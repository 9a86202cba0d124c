//! Error types returned by every rendering entry point.

use thiserror::Error;

use crate::geometry::GeometryKind;

/// Everything that can go wrong between receiving a symbol and handing back
/// a finished BMP or SVG buffer.
///
/// No variant is ever accompanied by partial output: a serializer either
/// returns a complete buffer or one of these.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A color token was not of the form `#RRGGBB`.
    #[error("Invalid color: {0}. Color must be in '#RRGGBB' format")]
    InvalidColorFormat(String),

    /// The geometry variant does not fit the requested serializer.
    #[error("Geometry type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: GeometryKind,
        found: GeometryKind,
    },

    /// Size or count inconsistency inside a symbol geometry.
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    /// The bitmap would not fit the 32-bit BMP size fields.
    #[error("Image too large: {width}x{height} does not fit a BMP file")]
    ImageTooLarge { width: u32, height: u32 },

    /// The SVG document would exceed the output bound.
    #[error("Output too large: document exceeds {limit} bytes")]
    OutputTooLarge { limit: usize },

    /// Rotation angle outside 0, 90, 180 and 270.
    #[error("Invalid rotation angle: {0}. Angle must be one of 0, 90, 180, 270")]
    InvalidRotation(i32),

    /// Message propagated verbatim from the upstream symbol encoder.
    #[error("Error while rendering: {0}")]
    EncodingFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations
pub type Result<T, E = RenderError> = std::result::Result<T, E>;
