//! Rendering options shared by both serializers.

use serde::{Deserialize, Serialize};

use crate::color::{parse_color, Rgb};
use crate::error::{RenderError, Result};

/// A symbol rotation in degrees: 0, 90, 180 or 270.
///
/// Rotation is applied by the encoder that lays out the symbol. The
/// serializers accept it so callers can pass one options value around, but
/// never transform pixels or coordinates themselves.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rotation(u16);

impl Rotation {
    pub const NONE: Rotation = Rotation(0);
    pub const QUARTER: Rotation = Rotation(90);
    pub const HALF: Rotation = Rotation(180);
    pub const THREE_QUARTERS: Rotation = Rotation(270);

    /// Returns the angle in degrees.
    pub const fn degrees(self) -> u16 {
        self.0
    }
}

impl TryFrom<i32> for Rotation {
    type Error = RenderError;

    fn try_from(angle: i32) -> Result<Self> {
        match angle {
            0 | 90 | 180 | 270 => Ok(Rotation(angle as u16)),
            _ => Err(RenderError::InvalidRotation(angle)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        i32::from(rotation.0)
    }
}

/// Byte order of the size, width and height fields of the BMP header.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderByteOrder {
    /// Most-significant byte first, byte-compatible with the legacy tool.
    #[default]
    Legacy,
    /// Conventional little-endian fields, readable by standard BMP decoders.
    Standard,
}

impl HeaderByteOrder {
    pub(crate) fn encode(self, value: u32) -> [u8; 4] {
        match self {
            Self::Legacy => value.to_be_bytes(),
            Self::Standard => value.to_le_bytes(),
        }
    }
}

/// Options accepted by [`render_bitmap`](crate::render_bitmap) and
/// [`render_vector`](crate::render_vector).
///
/// # Example
///
/// ```rust
/// use barcode_render::{RenderOptions, Rotation};
///
/// let options = RenderOptions::default()
///     .with_rotation(Rotation::HALF)
///     .with_foreground_hex(Some("#112233"))
///     .unwrap()
///     .with_background_hex(None)
///     .unwrap();
/// assert_eq!(options.foreground.to_string(), "#112233");
/// assert_eq!(options.background.to_string(), "#FFFFFF");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub rotation: Rotation,
    pub foreground: Rgb,
    pub background: Rgb,
    pub header_byte_order: HeaderByteOrder,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rotation: Rotation::NONE,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
            header_byte_order: HeaderByteOrder::Legacy,
        }
    }
}

impl RenderOptions {
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_foreground(mut self, color: Rgb) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Sets the foreground from an optional `#RRGGBB` token; `None` keeps
    /// the current color.
    pub fn with_foreground_hex(mut self, token: Option<&str>) -> Result<Self> {
        self.foreground = parse_color(token, self.foreground)?;
        Ok(self)
    }

    /// Sets the background from an optional `#RRGGBB` token; `None` keeps
    /// the current color.
    pub fn with_background_hex(mut self, token: Option<&str>) -> Result<Self> {
        self.background = parse_color(token, self.background)?;
        Ok(self)
    }

    pub fn with_header_byte_order(mut self, order: HeaderByteOrder) -> Self {
        self.header_byte_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_angles() {
        for angle in [0, 90, 180, 270] {
            let rotation = Rotation::try_from(angle).unwrap();
            assert_eq!(i32::from(rotation), angle);
        }
        for angle in [-90, 45, 360, 1] {
            assert!(matches!(
                Rotation::try_from(angle),
                Err(RenderError::InvalidRotation(a)) if a == angle
            ));
        }
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.rotation, Rotation::NONE);
        assert_eq!(options.foreground, Rgb::BLACK);
        assert_eq!(options.background, Rgb::WHITE);
        assert_eq!(options.header_byte_order, HeaderByteOrder::Legacy);
    }

    #[test]
    fn test_hex_setters_keep_previous_on_error() {
        let options = RenderOptions::default();
        assert!(options.with_foreground_hex(Some("red")).is_err());
        assert_eq!(options.foreground, Rgb::BLACK);
    }

    #[test]
    fn test_header_field_encoding() {
        assert_eq!(HeaderByteOrder::Legacy.encode(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(HeaderByteOrder::Standard.encode(0x0102_0304), [4, 3, 2, 1]);
    }

    #[test]
    fn test_options_from_json() {
        let options: RenderOptions =
            serde_json::from_str(r##"{"rotation": 90, "foreground": "#FF0000"}"##).unwrap();
        assert_eq!(options.rotation, Rotation::QUARTER);
        assert_eq!(options.foreground, Rgb::new(0xFF, 0, 0));
        assert_eq!(options.background, Rgb::WHITE);
        assert!(serde_json::from_str::<RenderOptions>(r#"{"rotation": 45}"#).is_err());
    }
}
