use crate::error::Result;
use crate::geometry::Raster;
use crate::options::RenderOptions;

use image::{ImageBuffer, Rgb as Pixel, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

/// Directory used when the caller does not name one.
pub const DEFAULT_DIRECTORY: &str = "generated";

/// Returns a block-character preview of a raster, one text line per pixel
/// row, two characters per pixel so the aspect ratio roughly holds.
pub fn raster_to_text(raster: &Raster) -> String {
    let mut result = String::new();
    for row in raster.rows() {
        for &on in row {
            let c: char = if on { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}

/// Prints a raster preview to the console.
pub fn print_raster(raster: &Raster) {
    println!("{}", raster_to_text(raster));
}

/// Converts a raster into an RGB image buffer.
///
/// # Arguments
///
/// * `raster` - The pixel grid to convert.
/// * `options` - Supplies the foreground and background colors.
/// * `module_size` - Width and height in image pixels of one raster pixel. Zero is treated as 1.
///
/// # Example
///
/// ```rust
/// use barcode_render::{helper::to_image_buffer, Raster, RenderOptions};
///
/// let raster = Raster::from_rows(&["1.", ".1"]).unwrap();
/// let img = to_image_buffer(&raster, &RenderOptions::default(), 4);
/// assert_eq!(img.dimensions(), (8, 8));
/// ```
pub fn to_image_buffer(raster: &Raster, options: &RenderOptions, module_size: u32) -> RgbImage {
    let module_size = module_size.max(1);
    let fg = Pixel(options.foreground.channels());
    let bg = Pixel(options.background.channels());

    let width = raster.width.saturating_mul(module_size);
    let height = raster.height.saturating_mul(module_size);
    let mut img: RgbImage = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if raster.get(x / module_size, y / module_size) {
            fg
        } else {
            bg
        };
    }

    img
}

/// Writes `bytes` to `<directory>/<filename>.<extension>` and returns the path.
///
/// # Arguments
///
/// * `bytes` - File contents, e.g. the output of [`render_bitmap`](crate::render_bitmap).
/// * `directory` - Optional. Defaults to [`DEFAULT_DIRECTORY`]; created if it does not exist.
/// * `filename` - Optional. Without one a timestamp-based filename is used.
/// * `extension` - File extension without the dot.
///
/// # Errors
///
/// Returns [`RenderError::Io`](crate::RenderError::Io) if the directory or file cannot be written.
pub fn save_bytes(
    bytes: &[u8],
    directory: Option<&Path>,
    filename: Option<&str>,
    extension: &str,
) -> Result<PathBuf> {
    let path = output_path(directory, filename, extension)?;
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Renders a raster as PNG through [`to_image_buffer`] and saves it.
///
/// Directory and filename defaults are those of [`save_bytes`].
pub fn save_png(
    raster: &Raster,
    options: &RenderOptions,
    module_size: u32,
    directory: Option<&Path>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    raster.validate()?;
    let path = output_path(directory, filename, "png")?;
    to_image_buffer(raster, options, module_size).save(&path)?;
    Ok(path)
}

fn output_path(directory: Option<&Path>, filename: Option<&str>, extension: &str) -> Result<PathBuf> {
    let directory = directory.unwrap_or_else(|| Path::new(DEFAULT_DIRECTORY));
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("{}", since_the_epoch.as_nanos())
        }
    };

    // Check if the directory exists, create it if it doesn't
    if !directory.exists() {
        fs::create_dir_all(directory)?;
    }

    Ok(directory.join(format!("{filename}.{extension}")))
}
