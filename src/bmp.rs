//! 1-bit indexed BMP output.
//!
//! The file is a fixed 62-byte header (file header, `BITMAPINFOHEADER` and a
//! two-entry color table) followed by bottom-up rows of packed pixels.

use tracing::debug;

use crate::error::{RenderError, Result};
use crate::geometry::Raster;
use crate::options::RenderOptions;

/// Size of the file header, info header and color table together.
pub const HEADER_SIZE: usize = 62;

const HEADER_TEMPLATE: [u8; HEADER_SIZE] = [
    0x42, 0x4d, // "BM"
    0x00, 0x00, 0x00, 0x00, // file size
    0x00, 0x00, 0x00, 0x00, // reserved
    0x3e, 0x00, 0x00, 0x00, // pixel data offset (62)
    0x28, 0x00, 0x00, 0x00, // info header size (40)
    0x00, 0x00, 0x00, 0x00, // width
    0x00, 0x00, 0x00, 0x00, // height
    0x01, 0x00, 0x01, 0x00, // planes, bits per pixel
    0x00, 0x00, 0x00, 0x00, // compression
    0x00, 0x00, 0x00, 0x00, // image size
    0xc4, 0x0e, 0x00, 0x00, // x pixels per meter
    0xc4, 0x0e, 0x00, 0x00, // y pixels per meter
    0x02, 0x00, 0x00, 0x00, // colors in table
    0x02, 0x00, 0x00, 0x00, // important colors
    0x00, 0x00, 0x00, 0x00, // entry 0: foreground
    0xff, 0xff, 0xff, 0xff, // entry 1: background
];

const FILE_SIZE_OFFSET: usize = 2;
const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const FOREGROUND_OFFSET: usize = 54;
const BACKGROUND_OFFSET: usize = 58;

/// Row geometry of a packed 1-bit bitmap.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RowLayout {
    /// Bytes carrying pixels, `ceil(width / 8)`.
    pub bytes_per_row: usize,
    /// Zero bytes appended so each row is a multiple of 4 bytes.
    pub padding: usize,
}

impl RowLayout {
    pub const fn new(width: u32) -> Self {
        let bytes_per_row = (width as usize + 7) / 8;
        let padding = (4 - bytes_per_row % 4) % 4;
        Self { bytes_per_row, padding }
    }

    /// Bytes per stored row, padding included.
    pub const fn stride(self) -> usize {
        self.bytes_per_row + self.padding
    }
}

/// Returns the exact length of the BMP produced for a `width` x `height`
/// raster.
///
/// # Errors
///
/// Returns [`RenderError::ImageTooLarge`] if the file would not fit the
/// 32-bit size field or a dimension exceeds the signed 32-bit header field.
pub fn bmp_len(width: u32, height: u32) -> Result<usize> {
    let too_large = || RenderError::ImageTooLarge { width, height };
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large());
    }
    let stride = RowLayout::new(width).stride() as u64;
    let total = stride
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_add(HEADER_SIZE as u64))
        .filter(|&total| total <= u64::from(u32::MAX))
        .ok_or_else(too_large)?;
    usize::try_from(total).map_err(|_| too_large())
}

/// Serializes a raster into a 1-bit indexed BMP.
///
/// Rows are written bottom-up, so the first logical row ends the file. Each
/// byte packs 8 pixels most-significant bit first with `1` for foreground;
/// rows are zero-padded to a multiple of 4 bytes. The color table holds the
/// foreground then the background color as R, G, B plus a reserved byte.
///
/// `options.rotation` is not applied here: rotated symbols are laid out by
/// the encoder.
///
/// # Errors
///
/// - [`RenderError::ImageTooLarge`] if the file would overflow the header.
///   Checked before the pixel buffer.
/// - [`RenderError::MalformedGeometry`] if the raster fails validation.
///
/// # Example
///
/// ```rust
/// use barcode_render::{bmp::write_bmp, Raster, RenderOptions};
///
/// let raster = Raster::from_rows(&["1"]).unwrap();
/// let bytes = write_bmp(&raster, &RenderOptions::default()).unwrap();
/// assert_eq!(bytes.len(), 62 + 4);
/// assert_eq!(bytes[62], 0x80);
/// ```
pub fn write_bmp(raster: &Raster, options: &RenderOptions) -> Result<Vec<u8>> {
    // Size first: an oversized raster cannot hold a matching pixel buffer.
    let total = bmp_len(raster.width, raster.height)?;
    raster.validate()?;
    let layout = RowLayout::new(raster.width);

    let mut bmp = Vec::with_capacity(total);
    bmp.extend_from_slice(&header(raster, options, total)?);

    for row in raster.rows().rev() {
        pack_row(row, layout, &mut bmp);
    }

    debug_assert_eq!(bmp.len(), total);
    debug!(
        width = raster.width,
        height = raster.height,
        rotation = options.rotation.degrees(),
        bytes = bmp.len(),
        "rendered bmp"
    );
    Ok(bmp)
}

fn header(raster: &Raster, options: &RenderOptions, total: usize) -> Result<[u8; HEADER_SIZE]> {
    let total = u32::try_from(total).map_err(|_| RenderError::ImageTooLarge {
        width: raster.width,
        height: raster.height,
    })?;
    let order = options.header_byte_order;

    let mut header = HEADER_TEMPLATE;
    header[FILE_SIZE_OFFSET..FILE_SIZE_OFFSET + 4].copy_from_slice(&order.encode(total));
    header[WIDTH_OFFSET..WIDTH_OFFSET + 4].copy_from_slice(&order.encode(raster.width));
    header[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&order.encode(raster.height));
    header[FOREGROUND_OFFSET..FOREGROUND_OFFSET + 3].copy_from_slice(&options.foreground.channels());
    header[BACKGROUND_OFFSET..BACKGROUND_OFFSET + 3].copy_from_slice(&options.background.channels());
    Ok(header)
}

/// Appends one packed row, MSB first, followed by its padding bytes.
fn pack_row(row: &[bool], layout: RowLayout, out: &mut Vec<u8>) {
    let start = out.len();
    out.resize(start + layout.stride(), 0);
    let bytes = &mut out[start..start + layout.bytes_per_row];
    for (i, &on) in row.iter().enumerate() {
        if on {
            bytes[i >> 3] |= 0x80 >> (i & 7);
        }
    }
}
