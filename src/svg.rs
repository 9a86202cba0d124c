//! SVG 1.1 output for vector symbols.

use tracing::debug;

use crate::color::Rgb;
use crate::error::{RenderError, Result};
use crate::geometry::{Circle, Hexagon, Rect, TextLabel, Vector};
use crate::options::RenderOptions;

/// Upper bound on the size of a generated document, in bytes.
pub const MAX_SVG_LEN: usize = 4 * 1024 * 1024;

/// Horizontal offset of the side vertices of a hexagon, as a fraction of
/// its radius.
const HEX_SIDE: f64 = 0.86;

/// Returns a complete SVG document depicting `vector`.
///
/// The document holds a full-canvas background rectangle followed by every
/// rectangle, hexagon, circle and text label in input order, all inside a
/// group filled with the foreground color. Coordinates are printed with two
/// decimals; the string always uses Unix newlines (\n).
///
/// # Errors
///
/// - [`RenderError::MalformedGeometry`] if a coordinate is not finite or a
///   label holds a character XML cannot carry.
/// - [`RenderError::OutputTooLarge`] if the document would exceed
///   [`MAX_SVG_LEN`] bytes. Output is never truncated.
///
/// # Example
///
/// ```rust
/// use barcode_render::{svg::to_svg_string, RenderOptions, Vector};
///
/// let vector = Vector::new(10.0, 5.0).rect(1.0, 0.0, 2.0, 5.0);
/// let svg = to_svg_string(&vector, &RenderOptions::default()).unwrap();
/// assert!(svg.contains("<rect x=\"1.00\" y=\"0.00\" width=\"2.00\" height=\"5.00\" />"));
/// ```
pub fn to_svg_string(vector: &Vector, options: &RenderOptions) -> Result<String> {
    to_svg_string_bounded(vector, options, MAX_SVG_LEN)
}

/// Like [`to_svg_string`] with a caller-chosen size bound.
pub fn to_svg_string_bounded(vector: &Vector, options: &RenderOptions, limit: usize) -> Result<String> {
    vector.validate()?;

    let fg = options.foreground;
    let bg = options.background;
    let width = vector.canvas_width.ceil() as u64;
    let height = vector.canvas_height.ceil() as u64;

    let mut svg = SvgBuffer::new(limit);
    svg.push("<?xml version=\"1.0\" standalone=\"no\"?>\n")?;
    svg.push("<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\"\n")?;
    svg.push("   \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n")?;
    svg.push(&format!("<svg width=\"{width}\" height=\"{height}\" version=\"1.1\"\n"))?;
    svg.push("   xmlns=\"http://www.w3.org/2000/svg\">\n")?;
    svg.push("   <desc>Barcode Render Generated Symbol\n")?;
    svg.push("   </desc>\n")?;
    svg.push(&format!("\n   <g id=\"barcode\" fill=\"{fg}\">\n"))?;
    svg.push(&format!(
        "      <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{bg}\" />\n"
    ))?;

    for rect in &vector.rectangles {
        svg.push(&rect_element(rect))?;
    }
    for hexagon in &vector.hexagons {
        svg.push(&hexagon_element(hexagon))?;
    }
    for circle in &vector.circles {
        svg.push(&circle_element(circle, fg, bg))?;
    }
    for label in &vector.text_labels {
        svg.push(&text_element(label, fg))?;
    }

    svg.push("   </g>\n")?;
    svg.push("</svg>\n")?;

    let svg = svg.finish();
    debug!(
        width,
        height,
        rotation = options.rotation.degrees(),
        elements = vector.rectangles.len()
            + vector.hexagons.len()
            + vector.circles.len()
            + vector.text_labels.len(),
        bytes = svg.len(),
        "rendered svg"
    );
    Ok(svg)
}

/// Growable document that refuses to pass its size bound.
struct SvgBuffer {
    out: String,
    limit: usize,
}

impl SvgBuffer {
    fn new(limit: usize) -> Self {
        Self {
            out: String::new(),
            limit,
        }
    }

    fn push(&mut self, s: &str) -> Result<()> {
        if self.out.len() + s.len() > self.limit {
            return Err(RenderError::OutputTooLarge { limit: self.limit });
        }
        self.out += s;
        Ok(())
    }

    fn finish(self) -> String {
        self.out
    }
}

fn rect_element(rect: &Rect) -> String {
    format!(
        "      <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" />\n",
        rect.x, rect.y, rect.width, rect.height
    )
}

/// Six vertices starting below the center (`y + r`, SVG y grows downward),
/// then lower-right, upper-right, top, upper-left and lower-left: counter-clockwise
/// on screen. The path closes back to the first vertex.
fn hexagon_points(hexagon: &Hexagon) -> [(f64, f64); 6] {
    let x = f64::from(hexagon.x);
    let y = f64::from(hexagon.y);
    let r = f64::from(hexagon.diameter) / 2.0;
    let side = HEX_SIDE * r;
    [
        (x, y + r),
        (x + side, y + 0.5 * r),
        (x + side, y - 0.5 * r),
        (x, y - r),
        (x - side, y - 0.5 * r),
        (x - side, y + 0.5 * r),
    ]
}

fn hexagon_element(hexagon: &Hexagon) -> String {
    let mut d = String::new();
    for (i, (x, y)) in hexagon_points(hexagon).iter().enumerate() {
        let op = if i == 0 { "M" } else { " L" };
        d += &format!("{op} {x:.2} {y:.2}");
    }
    format!("      <path d=\"{d} Z\" />\n")
}

fn circle_element(circle: &Circle, fg: Rgb, bg: Rgb) -> String {
    let fill = if circle.filled { bg } else { fg };
    format!(
        "      <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{fill}\" />\n",
        circle.x,
        circle.y,
        f64::from(circle.diameter) / 2.0
    )
}

fn text_element(label: &TextLabel, fg: Rgb) -> String {
    let mut element = format!(
        "      <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\"\n",
        label.x, label.y
    );
    element += &format!(
        "         font-family=\"Helvetica\" font-size=\"{:.1}\" fill=\"{fg}\" >\n",
        label.font_size
    );
    element += &format!("         {}\n", escape_html(&label.text));
    element += "      </text>\n";
    element
}

/// Replaces the characters that are unsafe inside XML text with entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped += "&lt;",
            '>' => escaped += "&gt;",
            '"' => escaped += "&quot;",
            '&' => escaped += "&amp;",
            '\'' => escaped += "&#39;",
            c => escaped.push(c),
        }
    }
    escaped
}
