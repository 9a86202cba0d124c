//! # barcode-render
//!
//! Serializes already-computed barcode symbols into image formats.
//!
//! `barcode-render` does not encode data into bars or modules. A symbol encoder (any type
//! implementing [`encoder::Encoder`]) lays the symbol out as either a pixel grid or a list of
//! vector primitives, and this crate turns that [`SymbolGeometry`] into bytes:
//!
//! - [`render_bitmap`]: a raster symbol as a 1-bit indexed BMP file.
//! - [`render_vector`]: a vector symbol as an SVG 1.1 document.
//!
//! Both are pure functions of their inputs. They hold no global state, so independent symbols
//! can be rendered from any number of threads at once, and identical inputs always produce
//! byte-identical output.
//!
//! ## Features
//!
//! - Foreground and background colors from `#RRGGBB` tokens.
//! - BMP headers in the legacy most-significant-byte-first layout, or the conventional one.
//! - SVG rectangles, hexagons, circles and escaped text labels, in input order.
//! - Size guards instead of silent truncation.
//! - Helpers for PNG output, saving to disk and console previews.
//!
//! ## Example
//!
//! Render a tiny raster symbol as BMP:
//!
//! ```rust
//! use barcode_render::{render_bitmap, Raster, RenderOptions, SymbolGeometry};
//!
//! let raster = Raster::from_rows(&["1.1", ".1.", "1.1"]).unwrap();
//! let options = RenderOptions::default().with_foreground_hex(Some("#1F3A5F")).unwrap();
//! let bmp = render_bitmap(&SymbolGeometry::Raster(raster), &options).unwrap();
//! assert_eq!(bmp.len(), 62 + 3 * 4);
//! ```
//!
//! Render a vector symbol as SVG:
//!
//! ```rust
//! use barcode_render::{render_vector, RenderOptions, Vector};
//!
//! let vector = Vector::new(30.0, 20.0)
//!     .rect(2.0, 0.0, 1.0, 15.0)
//!     .rect(4.0, 0.0, 2.0, 15.0)
//!     .text(15.0, 19.0, 5.0, "A&B");
//! let svg = render_vector(&vector.into(), &RenderOptions::default()).unwrap();
//! assert!(svg.contains("A&amp;B"));
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: The symbol model handed over by encoders.
//! - [`bmp`]: BMP serialization.
//! - [`svg`]: SVG serialization.
//! - [`color`]: Color tokens.
//! - [`options`]: Rendering options.
//! - [`encoder`]: The encoder seam and the [`encoder::Barcode`] facade.
//! - [`helper`]: Utilities for saving and previewing output.

#![forbid(unsafe_code)]

pub mod bmp;
pub mod color;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod helper;
pub mod options;
pub mod svg;

pub use color::{parse_color, Rgb};
pub use encoder::{Barcode, EncodeRequest, Encoder};
pub use error::{RenderError, Result};
pub use geometry::{Circle, GeometryKind, Hexagon, Raster, Rect, SymbolGeometry, TextLabel, Vector};
pub use options::{HeaderByteOrder, RenderOptions, Rotation};

/// Serializes a raster symbol into a 1-bit indexed BMP file.
///
/// See [`bmp::write_bmp`] for the byte layout.
///
/// # Errors
///
/// - [`RenderError::TypeMismatch`] if `geometry` is a vector symbol.
/// - [`RenderError::MalformedGeometry`] if the pixel count is not `width * height`.
/// - [`RenderError::ImageTooLarge`] if the file would not fit the 32-bit size field.
pub fn render_bitmap(geometry: &SymbolGeometry, options: &RenderOptions) -> Result<Vec<u8>> {
    bmp::write_bmp(geometry.as_raster()?, options)
}

/// Serializes a vector symbol into an SVG document.
///
/// See [`svg::to_svg_string`] for the element structure.
///
/// # Errors
///
/// - [`RenderError::TypeMismatch`] if `geometry` is a raster symbol.
/// - [`RenderError::MalformedGeometry`] if a coordinate is not finite or a
///   label holds a character XML cannot carry.
/// - [`RenderError::OutputTooLarge`] if the document would exceed [`svg::MAX_SVG_LEN`].
pub fn render_vector(geometry: &SymbolGeometry, options: &RenderOptions) -> Result<String> {
    svg::to_svg_string(geometry.as_vector()?, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch() {
        let raster: SymbolGeometry = Raster::from_rows(&["1"]).unwrap().into();
        let vector: SymbolGeometry = Vector::new(1.0, 1.0).into();
        let options = RenderOptions::default();

        assert!(matches!(
            render_bitmap(&vector, &options),
            Err(RenderError::TypeMismatch { expected: GeometryKind::Raster, found: GeometryKind::Vector })
        ));
        assert!(matches!(
            render_vector(&raster, &options),
            Err(RenderError::TypeMismatch { expected: GeometryKind::Vector, found: GeometryKind::Raster })
        ));
    }

    #[test]
    fn test_rotation_does_not_change_output() {
        let raster: SymbolGeometry = Raster::from_rows(&["11.", "..1"]).unwrap().into();
        let plain = render_bitmap(&raster, &RenderOptions::default()).unwrap();
        let rotated = render_bitmap(&raster, &RenderOptions::default().with_rotation(Rotation::QUARTER)).unwrap();
        assert_eq!(plain, rotated);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RenderError::InvalidColorFormat("red".into()).to_string(),
            "Invalid color: red. Color must be in '#RRGGBB' format"
        );
        let mismatch = RenderError::TypeMismatch {
            expected: GeometryKind::Raster,
            found: GeometryKind::Vector,
        };
        assert_eq!(mismatch.to_string(), "Geometry type mismatch: expected raster, got vector");
        assert_eq!(
            RenderError::EncodingFailed("bad data".into()).to_string(),
            "Error while rendering: bad data"
        );
    }
}
