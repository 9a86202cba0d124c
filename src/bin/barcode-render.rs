//! Command-line barcode renderer
//!
//! Loads a symbol geometry from a JSON file and writes it as BMP, SVG or PNG.

use std::fs;
use std::path::PathBuf;

use barcode_render::helper::{print_raster, save_bytes, save_png};
use barcode_render::{
    render_bitmap, render_vector, HeaderByteOrder, RenderError, RenderOptions, Rotation, SymbolGeometry,
};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Render a computed barcode symbol to an image file
#[derive(Parser)]
#[command(name = "barcode-render")]
#[command(version)]
#[command(about = "Render a computed barcode symbol to an image file", long_about = None)]
struct Args {
    /// Input symbol geometry (JSON, tagged with "kind": "raster" or "vector")
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "bmp")]
    format: OutputFormat,

    /// Foreground color, '#RRGGBB'
    #[arg(long)]
    fg: Option<String>,

    /// Background color, '#RRGGBB'
    #[arg(long)]
    bg: Option<String>,

    /// Rotation the encoder applied: 0, 90, 180 or 270
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    angle: i32,

    /// Write conventional little-endian BMP header fields
    #[arg(long)]
    standard_header: bool,

    /// Pixels per module for PNG output
    #[arg(long, default_value = "1")]
    module_size: u32,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file name without extension
    #[arg(short, long)]
    name: Option<String>,

    /// Print a raster preview to the console
    #[arg(long)]
    preview: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// 1-bit indexed BMP (raster input)
    Bmp,
    /// SVG document (vector input)
    Svg,
    /// PNG image (raster input)
    Png,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let path = run(&args)?;
    info!(path = %path.display(), "wrote symbol");
    Ok(())
}

/// Builds the render options from the color, angle and header flags.
fn render_options(args: &Args) -> Result<RenderOptions, RenderError> {
    let header_byte_order = if args.standard_header {
        HeaderByteOrder::Standard
    } else {
        HeaderByteOrder::Legacy
    };
    Ok(RenderOptions::default()
        .with_rotation(Rotation::try_from(args.angle)?)
        .with_foreground_hex(args.fg.as_deref())?
        .with_background_hex(args.bg.as_deref())?
        .with_header_byte_order(header_byte_order))
}

/// Loads the input symbol, renders it and returns the path written.
fn run(args: &Args) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let options = render_options(args)?;

    let json = fs::read_to_string(&args.input)?;
    let geometry: SymbolGeometry = serde_json::from_str(&json)?;
    info!(input = %args.input.display(), kind = %geometry.kind(), "loaded symbol");

    if args.preview {
        if let SymbolGeometry::Raster(raster) = &geometry {
            print_raster(raster);
        }
    }

    let directory = args.output.as_deref();
    let name = args.name.as_deref();
    let path = match args.format {
        OutputFormat::Bmp => save_bytes(&render_bitmap(&geometry, &options)?, directory, name, "bmp")?,
        OutputFormat::Svg => save_bytes(render_vector(&geometry, &options)?.as_bytes(), directory, name, "svg")?,
        OutputFormat::Png => save_png(geometry.as_raster()?, &options, args.module_size, directory, name)?,
    };
    Ok(path)
}
