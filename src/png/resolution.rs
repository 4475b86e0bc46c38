//! Physical resolution metadata (`pHYs`) for exported PNG files
//!
//! The payload is nine bytes: X and Y pixels per unit as big-endian `u32`,
//! then a unit byte where 1 means meters. Exports always write X = Y in
//! pixels per meter.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::io::configuration::INCHES_PER_METER;
use crate::io::error::{Result, malformed_png};
use crate::png::chunk::{ChunkStream, ChunkType, chunk_crc, encode_chunk, read_u32_be};

/// Unit byte meaning "pixels per meter"
pub const UNIT_METER: u8 = 1;

/// Length of the `pHYs` payload
pub const PHYS_DATA_LENGTH: usize = 9;

/// Prefix of a base64 PNG data URL
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Pixels per meter for a DPI value, rounded to the nearest integer
pub fn pixels_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) * INCHES_PER_METER).round() as u32
}

/// Decoded `pHYs` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Pixels per unit along X
    pub x_pixels_per_unit: u32,
    /// Pixels per unit along Y
    pub y_pixels_per_unit: u32,
    /// Unit byte, [`UNIT_METER`] or 0 for aspect ratio only
    pub unit: u8,
}

impl Resolution {
    /// Square pixels at `dpi`, expressed per meter
    pub fn from_dpi(dpi: u32) -> Self {
        let ppm = pixels_per_meter(dpi);
        Self {
            x_pixels_per_unit: ppm,
            y_pixels_per_unit: ppm,
            unit: UNIT_METER,
        }
    }

    /// Decode a payload, `None` unless it is exactly nine bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != PHYS_DATA_LENGTH {
            return None;
        }
        Some(Self {
            x_pixels_per_unit: read_u32_be(data, 0)?,
            y_pixels_per_unit: read_u32_be(data, 4)?,
            unit: *data.get(8)?,
        })
    }

    /// Encode the payload
    pub fn to_bytes(&self) -> [u8; PHYS_DATA_LENGTH] {
        let mut data = [0_u8; PHYS_DATA_LENGTH];
        let (x, rest) = data.split_at_mut(4);
        let (y, unit) = rest.split_at_mut(4);
        x.copy_from_slice(&self.x_pixels_per_unit.to_be_bytes());
        y.copy_from_slice(&self.y_pixels_per_unit.to_be_bytes());
        unit.fill(self.unit);
        data
    }

    /// Horizontal DPI, when the unit is meters
    pub fn dpi(&self) -> Option<f64> {
        (self.unit == UNIT_METER).then(|| f64::from(self.x_pixels_per_unit) / INCHES_PER_METER)
    }
}

/// Tag a PNG byte stream with `dpi`, returning the input unchanged if it is
/// not a well-formed PNG
///
/// See [`try_inject_resolution`] for placement rules.
pub fn inject_resolution(bytes: &[u8], dpi: u32) -> Vec<u8> {
    try_inject_resolution(bytes, dpi).unwrap_or_else(|err| {
        log::warn!("leaving PNG untagged: {err}");
        bytes.to_vec()
    })
}

/// Tag a PNG byte stream with `dpi`
///
/// An existing nine-byte `pHYs` chunk is overwritten in place. A `pHYs`
/// chunk of any other length is replaced by a fresh record at the same
/// position. Otherwise a new record is inserted before the first `IDAT`,
/// or right after `IHDR` when the stream has no image data.
///
/// # Errors
///
/// Returns an error if the signature does not match, the chunk stream is
/// truncated, or neither `IHDR` nor `IDAT` is present
pub fn try_inject_resolution(bytes: &[u8], dpi: u32) -> Result<Vec<u8>> {
    let stream = ChunkStream::parse(bytes)?;
    let payload = Resolution::from_dpi(dpi).to_bytes();

    let mut ihdr_end = None;
    let mut first_idat = None;
    let mut existing = None;
    for record in stream.records() {
        match record.chunk_type {
            ChunkType::IHDR if ihdr_end.is_none() => ihdr_end = Some(record.end()),
            ChunkType::IDAT if first_idat.is_none() => first_idat = Some(record.offset),
            ChunkType::PHYS if existing.is_none() => existing = Some(*record),
            _ => {}
        }
    }

    if let Some(record) = existing {
        if record.length as usize == PHYS_DATA_LENGTH {
            let mut out = bytes.to_vec();
            let crc = chunk_crc(ChunkType::PHYS, &payload);
            if let Some(data) = out.get_mut(record.data_start()..record.data_end()) {
                data.copy_from_slice(&payload);
            }
            if let Some(stored) = out.get_mut(record.data_end()..record.end()) {
                stored.copy_from_slice(&crc.to_be_bytes());
            }
            log::debug!("overwrote pHYs at offset {} with {dpi} dpi", record.offset);
            return Ok(out);
        }
        log::debug!(
            "replacing {}-byte pHYs at offset {}",
            record.length,
            record.offset
        );
        let replacement = encode_chunk(ChunkType::PHYS, &payload)?;
        return splice(bytes, record.offset, record.end(), &replacement);
    }

    let insert_at = first_idat
        .or(ihdr_end)
        .ok_or_else(|| malformed_png(&"no IHDR or IDAT chunk to anchor pHYs"))?;
    log::debug!("inserting pHYs at offset {insert_at} with {dpi} dpi");
    let record = encode_chunk(ChunkType::PHYS, &payload)?;
    splice(bytes, insert_at, insert_at, &record)
}

// Replace bytes[start..end] with `record`
fn splice(bytes: &[u8], start: usize, end: usize, record: &[u8]) -> Result<Vec<u8>> {
    let (before, after) = bytes
        .get(..start)
        .zip(bytes.get(end..))
        .ok_or_else(|| malformed_png(&format!("splice range {start}..{end} out of bounds")))?;
    let mut out = Vec::with_capacity(before.len() + record.len() + after.len());
    out.extend_from_slice(before);
    out.extend_from_slice(record);
    out.extend_from_slice(after);
    Ok(out)
}

/// Resolution stored in a PNG stream, if it carries a valid `pHYs` chunk
pub fn read_resolution(bytes: &[u8]) -> Option<Resolution> {
    let stream = ChunkStream::parse(bytes).ok()?;
    let record = stream.find(ChunkType::PHYS)?;
    Resolution::from_bytes(stream.data(record)?)
}

/// Tag a base64 PNG data URL with `dpi`
///
/// The URL is decoded to raw bytes, tagged with [`try_inject_resolution`]
/// and encoded again. Anything that is not a decodable PNG data URL is
/// returned unchanged.
pub fn inject_resolution_data_url(url: &str, dpi: u32) -> String {
    let Some(encoded) = url.strip_prefix(PNG_DATA_URL_PREFIX) else {
        return url.to_string();
    };
    let tagged = BASE64_STANDARD
        .decode(encoded)
        .map_err(|err| malformed_png(&err))
        .and_then(|bytes| try_inject_resolution(&bytes, dpi));
    match tagged {
        Ok(bytes) => format!("{PNG_DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(bytes)),
        Err(err) => {
            log::warn!("leaving data URL untagged: {err}");
            url.to_string()
        }
    }
}
