//! The rendered-symbol model handed over by a symbol encoder.
//!
//! A symbol arrives either as a pixel grid ([`Raster`]) or as a list of
//! positioned primitives ([`Vector`]). Element order inside a [`Vector`] is
//! preserved exactly by the serializers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Discriminant of [`SymbolGeometry`], used in error reports.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GeometryKind {
    Raster,
    Vector,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "raster"),
            Self::Vector => write!(f, "vector"),
        }
    }
}

/// A symbol as produced by an encoder, ready for serialization.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SymbolGeometry {
    Raster(Raster),
    Vector(Vector),
}

impl SymbolGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Raster(_) => GeometryKind::Raster,
            Self::Vector(_) => GeometryKind::Vector,
        }
    }

    /// Borrows the raster variant or reports a [`RenderError::TypeMismatch`].
    pub fn as_raster(&self) -> Result<&Raster> {
        match self {
            Self::Raster(raster) => Ok(raster),
            Self::Vector(_) => Err(RenderError::TypeMismatch {
                expected: GeometryKind::Raster,
                found: GeometryKind::Vector,
            }),
        }
    }

    /// Borrows the vector variant or reports a [`RenderError::TypeMismatch`].
    pub fn as_vector(&self) -> Result<&Vector> {
        match self {
            Self::Vector(vector) => Ok(vector),
            Self::Raster(_) => Err(RenderError::TypeMismatch {
                expected: GeometryKind::Vector,
                found: GeometryKind::Raster,
            }),
        }
    }
}

impl From<Raster> for SymbolGeometry {
    fn from(raster: Raster) -> Self {
        Self::Raster(raster)
    }
}

impl From<Vector> for SymbolGeometry {
    fn from(vector: Vector) -> Self {
        Self::Vector(vector)
    }
}

/// A grid of foreground/background pixels stored row-major, top row first.
///
/// Fields are public so encoders can build the grid directly;
/// [`Raster::validate`] checks the size invariant before serialization.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// `true` = foreground. Length must be `width * height`.
    pub pixels: Vec<bool>,
}

impl Raster {
    /// Builds a raster and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedGeometry`] if either dimension is zero
    /// or the pixel count is not `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self> {
        let raster = Self { width, height, pixels };
        raster.validate()?;
        Ok(raster)
    }

    /// Builds a raster from rows of text where `'1'`, `'#'` and `'X'` are
    /// foreground and anything else is background. Handy for fixtures.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut pixels = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(RenderError::MalformedGeometry(format!(
                    "row {row:?} is not {width} pixels wide"
                )));
            }
            pixels.extend(row.chars().map(|c| matches!(c, '1' | '#' | 'X')));
        }
        let width = u32::try_from(width)
            .map_err(|_| RenderError::MalformedGeometry("raster too wide".to_string()))?;
        let height = u32::try_from(height)
            .map_err(|_| RenderError::MalformedGeometry("raster too tall".to_string()))?;
        Self::new(width, height, pixels)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::MalformedGeometry(format!(
                "raster dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = u64::from(self.width) * u64::from(self.height);
        if self.pixels.len() as u64 != expected {
            return Err(RenderError::MalformedGeometry(format!(
                "raster {}x{} needs {} pixels, got {}",
                self.width,
                self.height,
                expected,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Returns the pixel at (x, y), or `false` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied().unwrap_or(false)
    }

    /// Iterates over the logical rows, top row first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[bool]> + ExactSizeIterator {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

/// Axis-aligned filled rectangle, top-left anchored.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Hexagon given by its center and flat-to-flat diameter.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Hexagon {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
}

/// Circle given by its center and diameter.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    /// `true` paints the circle in the background color (a hole in a
    /// foreground area), `false` paints a foreground dot.
    #[serde(default)]
    pub filled: bool,
}

/// Human-readable text, center-aligned on its baseline anchor.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TextLabel {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub text: String,
}

/// A symbol as ordered lists of vector primitives on a canvas.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub rectangles: Vec<Rect>,
    pub hexagons: Vec<Hexagon>,
    pub circles: Vec<Circle>,
    pub text_labels: Vec<TextLabel>,
}

impl Vector {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Self::default()
        }
    }

    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.rectangles.push(Rect { x, y, width, height });
        self
    }

    pub fn hexagon(mut self, x: f32, y: f32, diameter: f32) -> Self {
        self.hexagons.push(Hexagon { x, y, diameter });
        self
    }

    pub fn circle(mut self, x: f32, y: f32, diameter: f32, filled: bool) -> Self {
        self.circles.push(Circle { x, y, diameter, filled });
        self
    }

    pub fn text(mut self, x: f32, y: f32, font_size: f32, text: impl Into<String>) -> Self {
        self.text_labels.push(TextLabel {
            x,
            y,
            font_size,
            text: text.into(),
        });
        self
    }

    /// Checks that every coordinate is finite and the canvas is not negative.
    pub fn validate(&self) -> Result<()> {
        check_finite("canvas", &[self.canvas_width, self.canvas_height])?;
        if self.canvas_width < 0.0 || self.canvas_height < 0.0 {
            return Err(RenderError::MalformedGeometry(format!(
                "canvas size must not be negative, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        for r in &self.rectangles {
            check_finite("rectangle", &[r.x, r.y, r.width, r.height])?;
        }
        for h in &self.hexagons {
            check_finite("hexagon", &[h.x, h.y, h.diameter])?;
        }
        for c in &self.circles {
            check_finite("circle", &[c.x, c.y, c.diameter])?;
        }
        for t in &self.text_labels {
            check_finite("text label", &[t.x, t.y, t.font_size])?;
            if let Some(c) = t.text.chars().find(|&c| !is_xml_char(c)) {
                return Err(RenderError::MalformedGeometry(format!(
                    "text label {:?} contains U+{:04X}, which XML cannot carry",
                    t.text, c as u32
                )));
            }
        }
        Ok(())
    }
}

/// Characters allowed in XML 1.0 documents, escaped or not.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn check_finite(what: &str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RenderError::MalformedGeometry(format!(
            "{what} has a non-finite coordinate: {values:?}"
        )))
    }
}
