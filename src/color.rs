//! 24-bit RGB colors and the `#RRGGBB` token parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// A 24-bit RGB color.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Default foreground.
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    /// Default background.
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels in `[r, g, b]` order.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Parses a `#RRGGBB` color token.
///
/// `None` leaves `default` untouched and is not an error, which lets callers
/// forward optional user arguments straight through.
///
/// # Errors
///
/// Returns [`RenderError::InvalidColorFormat`] if the token does not start
/// with `#`, is not exactly 7 bytes long, or contains non-hex digits. No
/// channel is accepted until the whole token has been validated.
///
/// # Example
///
/// ```rust
/// use barcode_render::color::{parse_color, Rgb};
///
/// assert_eq!(parse_color(Some("#A1B2C3"), Rgb::BLACK).unwrap(), Rgb::new(0xA1, 0xB2, 0xC3));
/// assert_eq!(parse_color(None, Rgb::WHITE).unwrap(), Rgb::WHITE);
/// assert!(parse_color(Some("A1B2C3"), Rgb::BLACK).is_err());
/// ```
pub fn parse_color(token: Option<&str>, default: Rgb) -> Result<Rgb> {
    match token {
        None => Ok(default),
        Some(token) => token.parse(),
    }
}

impl FromStr for Rgb {
    type Err = RenderError;

    fn from_str(token: &str) -> Result<Self> {
        let invalid = || RenderError::InvalidColorFormat(token.to_string());

        let digits = token.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = RenderError;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channels() {
        let color = parse_color(Some("#A1B2C3"), Rgb::BLACK).unwrap();
        assert_eq!(color.channels(), [0xA1, 0xB2, 0xC3]);

        let lower: Rgb = "#0a0b0c".parse().unwrap();
        assert_eq!(lower, Rgb::new(0x0A, 0x0B, 0x0C));
    }

    #[test]
    fn test_absent_keeps_default() {
        assert_eq!(parse_color(None, Rgb::WHITE).unwrap(), Rgb::WHITE);
        assert_eq!(parse_color(None, Rgb::BLACK).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        for token in ["A1B2C3", "", "#", "#12345", "#1234567", "#GG0000", "#12 456", "#+12345", "#ÿÿÿ"] {
            let err = parse_color(Some(token), Rgb::BLACK).unwrap_err();
            assert!(
                matches!(err, RenderError::InvalidColorFormat(ref t) if t == token),
                "token {token:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_string(), "#AB01FF");
        assert_eq!(Rgb::WHITE.to_string(), "#FFFFFF");
    }

    #[test]
    fn test_serde_uses_hex_token() {
        let json = serde_json::to_string(&Rgb::new(0x12, 0x34, 0x56)).unwrap();
        assert_eq!(json, "\"#123456\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(0x12, 0x34, 0x56));
        assert!(serde_json::from_str::<Rgb>("\"123456\"").is_err());
    }
}
