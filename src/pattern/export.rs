//! Export sizing and the render-to-PNG pipeline
//!
//! Physical sizes are converted to pixels at the export DPI, checked
//! against the pixel ceiling before anything is allocated, composited onto
//! a fresh transparent surface, serialized and tagged with a `pHYs` chunk.

use clap::ValueEnum;
use image::RgbaImage;

use crate::io::configuration::{
    DEFAULT_DPI, DEFAULT_EXPORT_SIZE, MAX_PIXELS, MILLIMETERS_PER_INCH, OUTPUT_PREFIX,
    PREVIEW_MAX_HEIGHT, PREVIEW_MAX_WIDTH, PREVIEW_MIN_SIZE,
};
use crate::io::error::{PatternError, Result, invalid_parameter};
use crate::io::image::encode_png;
use crate::pattern::compositor::{PatternConfig, composite_observed};
use crate::pattern::source::SourceImage;
use crate::png::resolution::inject_resolution;

/// Unit of the requested export width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Unit {
    /// Device pixels
    #[default]
    #[value(name = "px")]
    Pixel,
    /// Millimeters at the export DPI
    #[value(name = "mm")]
    Millimeter,
    /// Inches at the export DPI
    #[value(name = "in")]
    Inch,
}

/// What to do when the requested pixel count exceeds [`MAX_PIXELS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CeilingPolicy {
    /// Refuse the export
    #[default]
    Reject,
    /// Shrink both sides by the same factor until the count fits
    Downscale,
}

/// Integer output dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelSize {
    /// Total number of pixels
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Requested export size, unit and resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSpec {
    /// Width in `unit`
    pub width: f64,
    /// Height in `unit`
    pub height: f64,
    /// Unit of `width` and `height`
    pub unit: Unit,
    /// Dots per inch, written to the PNG and used for physical units
    pub dpi: u32,
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_EXPORT_SIZE,
            height: DEFAULT_EXPORT_SIZE,
            unit: Unit::Pixel,
            dpi: DEFAULT_DPI,
        }
    }
}

impl ExportSpec {
    /// Convert to pixels without applying the ceiling
    ///
    /// # Errors
    ///
    /// Returns an error if the DPI is zero or a dimension is not a positive
    /// finite number
    pub fn requested_pixels(&self) -> Result<(u64, u64)> {
        if self.dpi == 0 {
            return Err(invalid_parameter("dpi", &self.dpi, &"must be at least 1"));
        }
        Ok((
            to_pixels("width", self.width, self.unit, self.dpi)?,
            to_pixels("height", self.height, self.unit, self.dpi)?,
        ))
    }

    /// Convert to pixels and enforce the pixel ceiling
    ///
    /// # Errors
    ///
    /// Returns an error if the spec is invalid, or if the size exceeds the
    /// ceiling under [`CeilingPolicy::Reject`]
    pub fn resolve(&self, policy: CeilingPolicy) -> Result<PixelSize> {
        let (width, height) = self.requested_pixels()?;
        enforce_ceiling(width, height, MAX_PIXELS, policy)
    }

    /// Size of an on-screen preview with the export's aspect ratio
    ///
    /// The preview fits inside 1024x768 with each side at least 200 pixels.
    /// An invalid spec falls back to the full preview box.
    pub fn preview_size(&self) -> PixelSize {
        let Ok((width, height)) = self.requested_pixels() else {
            return PixelSize {
                width: PREVIEW_MAX_WIDTH,
                height: PREVIEW_MAX_HEIGHT,
            };
        };
        let (width, height) = (width as f64, height as f64);
        let scale = (f64::from(PREVIEW_MAX_WIDTH) / width)
            .min(f64::from(PREVIEW_MAX_HEIGHT) / height);
        PixelSize {
            width: ((width * scale).floor() as u32).max(PREVIEW_MIN_SIZE),
            height: ((height * scale).floor() as u32).max(PREVIEW_MIN_SIZE),
        }
    }
}

/// Convert one dimension to whole pixels, at least 1
///
/// # Errors
///
/// Returns an error if `value` is not a positive finite number
pub fn to_pixels(parameter: &'static str, value: f64, unit: Unit, dpi: u32) -> Result<u64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid_parameter(
            parameter,
            &value,
            &"must be a positive number",
        ));
    }
    let dpi = f64::from(dpi);
    let pixels = match unit {
        Unit::Pixel => value.floor(),
        Unit::Inch => (value * dpi).floor(),
        Unit::Millimeter => (value / MILLIMETERS_PER_INCH * dpi).floor(),
    };
    // Float to integer casts saturate
    Ok((pixels as u64).max(1))
}

/// Apply the pixel ceiling to a requested size
///
/// # Errors
///
/// Returns [`PatternError::OutputTooLarge`] when the size exceeds `limit`
/// under [`CeilingPolicy::Reject`]
pub fn enforce_ceiling(
    width: u64,
    height: u64,
    limit: u64,
    policy: CeilingPolicy,
) -> Result<PixelSize> {
    let too_large = || PatternError::OutputTooLarge {
        width,
        height,
        limit,
    };
    let requested = width.saturating_mul(height);

    let (width_px, height_px) = if requested <= limit {
        (width, height)
    } else {
        match policy {
            CeilingPolicy::Reject => return Err(too_large()),
            CeilingPolicy::Downscale => {
                let scale = (limit as f64 / requested as f64).sqrt();
                log::warn!(
                    "output {width}x{height} exceeds {limit} pixels, scaling by {scale:.4}"
                );
                downscale(width, height, scale, limit)
            }
        }
    };

    match (u32::try_from(width_px), u32::try_from(height_px)) {
        (Ok(width), Ok(height)) if width_px.saturating_mul(height_px) <= limit => {
            Ok(PixelSize { width, height })
        }
        _ => Err(too_large()),
    }
}

// A side that floors to zero is held at one pixel and the other side is
// capped so the product stays within `limit`
fn downscale(width: u64, height: u64, scale: f64, limit: u64) -> (u64, u64) {
    let shrink = |side: u64| (side as f64 * scale).floor() as u64;
    match (shrink(width), shrink(height)) {
        (0, 0) => (1, 1),
        (0, height) => (1, height.min(limit)),
        (width, 0) => (width.min(limit), 1),
        sides => sides,
    }
}

/// Suggested download name, e.g. `pattern_2480x3507_300dpi.png`
pub fn suggested_filename(size: PixelSize, dpi: u32) -> String {
    format!(
        "{OUTPUT_PREFIX}_{}x{}_{dpi}dpi.png",
        size.width, size.height
    )
}

/// Composite onto a fresh transparent surface of the given size
pub fn render_surface(
    size: PixelSize,
    config: &PatternConfig,
    images: &[Option<SourceImage>],
    on_row: impl FnMut(u32),
) -> RgbaImage {
    let mut surface = RgbaImage::new(size.width, size.height);
    composite_observed(&mut surface, config, images, on_row);
    surface
}

/// A finished export
#[derive(Debug, Clone)]
pub struct ExportedPng {
    /// PNG bytes carrying a `pHYs` chunk
    pub bytes: Vec<u8>,
    /// Pixel dimensions of the image
    pub size: PixelSize,
    /// Resolution written to the file
    pub dpi: u32,
    /// Suggested file name
    pub filename: String,
}

/// Render, encode and tag a pattern for export
///
/// Missing images and oversized requests are rejected before any surface
/// is allocated.
///
/// # Errors
///
/// Returns an error if:
/// - No image is loaded
/// - The export spec is invalid or exceeds the pixel ceiling under `policy`
/// - The surface cannot be encoded as PNG
pub fn render_png(
    spec: &ExportSpec,
    policy: CeilingPolicy,
    config: &PatternConfig,
    images: &[Option<SourceImage>],
    on_row: impl FnMut(u32),
) -> Result<ExportedPng> {
    if images.iter().flatten().next().is_none() {
        return Err(PatternError::NoImages);
    }
    let size = spec.resolve(policy)?;
    log::info!(
        "rendering {}x{} at {} dpi, seed {}",
        size.width,
        size.height,
        spec.dpi,
        config.seed
    );

    let surface = render_surface(size, config, images, on_row);
    let encoded = encode_png(&surface)?;

    Ok(ExportedPng {
        bytes: inject_resolution(&encoded, spec.dpi),
        size,
        dpi: spec.dpi,
        filename: suggested_filename(size, spec.dpi),
    })
}
