//! The seam to an external symbol encoder.
//!
//! This crate does not turn data into bars and modules. An [`Encoder`] does
//! that and hands back a [`SymbolGeometry`]; [`Barcode`] ties the two steps
//! together the way a scripting binding would.

use std::fmt;

use tracing::warn;

use crate::error::{RenderError, Result};
use crate::geometry::SymbolGeometry;
use crate::options::{RenderOptions, Rotation};

/// What an encoder is asked to lay out.
#[derive(Copy, Clone, Debug)]
pub struct EncodeRequest<'a> {
    pub data: &'a [u8],
    pub scale: f32,
    pub rotation: Rotation,
}

/// A barcode symbol encoder for one symbology.
///
/// Errors are reported with a human-readable message which is carried
/// verbatim in [`RenderError::EncodingFailed`].
pub trait Encoder {
    type Error: fmt::Display;

    /// Lays out the symbol as a pixel grid.
    fn encode_raster(&self, request: &EncodeRequest) -> Result<SymbolGeometry, Self::Error>;

    /// Lays out the symbol as vector primitives.
    fn encode_vector(&self, request: &EncodeRequest) -> Result<SymbolGeometry, Self::Error>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    type Error = E::Error;

    fn encode_raster(&self, request: &EncodeRequest) -> Result<SymbolGeometry, Self::Error> {
        (**self).encode_raster(request)
    }

    fn encode_vector(&self, request: &EncodeRequest) -> Result<SymbolGeometry, Self::Error> {
        (**self).encode_vector(request)
    }
}

/// Data bound to an encoder, renderable as BMP or SVG.
///
/// # Example
///
/// ```rust
/// use barcode_render::encoder::{Barcode, EncodeRequest, Encoder};
/// use barcode_render::{Raster, RenderOptions, SymbolGeometry, Vector};
///
/// struct Stripes;
///
/// impl Encoder for Stripes {
///     type Error = String;
///
///     fn encode_raster(&self, req: &EncodeRequest) -> Result<SymbolGeometry, String> {
///         let pixels = req.data.iter().map(|b| b % 2 == 1).collect();
///         Raster::new(req.data.len() as u32, 1, pixels)
///             .map(SymbolGeometry::from)
///             .map_err(|e| e.to_string())
///     }
///
///     fn encode_vector(&self, req: &EncodeRequest) -> Result<SymbolGeometry, String> {
///         Ok(Vector::new(req.data.len() as f32, 1.0).into())
///     }
/// }
///
/// let barcode = Barcode::new("ab", Stripes);
/// let bmp = barcode.render_bmp(&RenderOptions::default()).unwrap();
/// assert_eq!(bmp.len(), 62 + 4);
/// ```
#[derive(Clone, Debug)]
pub struct Barcode<E> {
    data: Vec<u8>,
    scale: f32,
    encoder: E,
}

impl<E: Encoder> Barcode<E> {
    /// Binds `data` (raw bytes or UTF-8 text) to `encoder` at scale 1.
    pub fn new(data: impl Into<Vec<u8>>, encoder: E) -> Self {
        Self {
            data: data.into(),
            scale: 1.0,
            encoder,
        }
    }

    /// Sets the scale passed to the encoder.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedGeometry`] unless `scale` is finite
    /// and positive.
    pub fn with_scale(mut self, scale: f32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::MalformedGeometry(format!(
                "scale must be finite and positive, got {scale}"
            )));
        }
        self.scale = scale;
        Ok(self)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    fn request(&self, options: &RenderOptions) -> EncodeRequest<'_> {
        EncodeRequest {
            data: &self.data,
            scale: self.scale,
            rotation: options.rotation,
        }
    }

    /// Encodes the data as a raster and serializes it as BMP.
    pub fn render_bmp(&self, options: &RenderOptions) -> Result<Vec<u8>> {
        let geometry = self
            .encoder
            .encode_raster(&self.request(options))
            .map_err(encoding_failed)?;
        crate::render_bitmap(&geometry, options)
    }

    /// Encodes the data as vector primitives and serializes it as SVG.
    pub fn render_svg(&self, options: &RenderOptions) -> Result<String> {
        let geometry = self
            .encoder
            .encode_vector(&self.request(options))
            .map_err(encoding_failed)?;
        crate::render_vector(&geometry, options)
    }
}

fn encoding_failed<D: fmt::Display>(err: D) -> RenderError {
    let message = err.to_string();
    warn!(%message, "encoder failed");
    RenderError::EncodingFailed(message)
}
