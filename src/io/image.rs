//! Decoding source files and writing PNG output

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader, RgbaImage};

use crate::io::error::{PatternError, Result, WithPath};
use crate::pattern::source::SourceImage;

/// Decode an image file, retrying with content sniffing if the extension
/// based decode fails
///
/// # Errors
///
/// Returns [`PatternError::ImageDecode`] carrying both failures when
/// neither strategy produces an image
pub fn decode_with_fallback(path: &Path) -> Result<DynamicImage> {
    let primary = match image::open(path) {
        Ok(image) => return Ok(image),
        Err(err) => err,
    };
    log::debug!(
        "decoding '{}' by extension failed ({primary}), sniffing content",
        path.display()
    );

    let fallback = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(ImageError::IoError)
        .and_then(ImageReader::decode);

    fallback.map_err(|fallback| PatternError::ImageDecode {
        path: path.to_path_buf(),
        primary,
        fallback,
    })
}

/// Load a file as a source image named after the file
///
/// # Errors
///
/// Returns an error if the file cannot be decoded
pub fn load_source_image(path: &Path) -> Result<SourceImage> {
    let decoded = decode_with_fallback(path)?;
    let image = SourceImage::new(decoded.to_rgba8());
    log::debug!(
        "loaded '{}' ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(match path.file_name() {
        Some(name) => image.with_name(name.to_string_lossy()),
        None => image,
    })
}

/// Serialize a surface as an 8-bit RGBA PNG
///
/// # Errors
///
/// Returns an error if the encoder rejects the surface
pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| PatternError::ImageEncode { source })?;
    Ok(bytes)
}

/// Write encoded bytes to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn write_png(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    std::fs::write(path, bytes).with_path(path, "write")?;
    log::debug!("wrote {} bytes to '{}'", bytes.len(), path.display());
    Ok(())
}
