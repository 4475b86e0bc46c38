//! PNG chunk stream layout
//!
//! After the 8-byte signature a PNG is a sequence of records, each made of a
//! 4-byte big-endian data length, a 4-byte type tag, the data, and a CRC32
//! over type and data. Scanning stops after `IEND`; trailing bytes are
//! ignored.

use std::fmt;

use crate::io::error::{Result, invalid_parameter, malformed_png};
use crate::png::crc::Crc32;

/// Fixed PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Bytes a chunk record occupies besides its data
pub const CHUNK_OVERHEAD: usize = 12;

// PNG caps chunk data lengths at 2^31 - 1
const MAX_CHUNK_LENGTH: u32 = 0x7FFF_FFFF;

/// Four-byte chunk type tag
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Image header
    pub const IHDR: Self = Self(*b"IHDR");
    /// Image data
    pub const IDAT: Self = Self(*b"IDAT");
    /// Image trailer
    pub const IEND: Self = Self(*b"IEND");
    /// Physical pixel dimensions
    pub const PHYS: Self = Self(*b"pHYs");

    /// Raw tag bytes
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({self})")
    }
}

/// Position of one chunk record inside a byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRecord {
    /// Offset of the length field
    pub offset: usize,
    /// Length of the data
    pub length: u32,
    /// Type tag
    pub chunk_type: ChunkType,
}

impl ChunkRecord {
    /// Offset of the first data byte
    pub const fn data_start(&self) -> usize {
        self.offset + 8
    }

    /// Offset just past the data, where the CRC starts
    pub const fn data_end(&self) -> usize {
        self.data_start() + self.length as usize
    }

    /// Offset just past the CRC
    pub const fn end(&self) -> usize {
        self.data_end() + 4
    }
}

/// Whether `bytes` starts with the PNG signature
pub fn has_signature(bytes: &[u8]) -> bool {
    bytes.get(..PNG_SIGNATURE.len()) == Some(&PNG_SIGNATURE[..])
}

/// Read a big-endian `u32` at `offset`
pub fn read_u32_be(bytes: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let raw: [u8; 4] = bytes.get(offset..end)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}

/// CRC32 of a chunk's type tag followed by its data
pub fn chunk_crc(chunk_type: ChunkType, data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(&chunk_type.bytes());
    crc.update(data);
    crc.finish()
}

/// Serialize a complete chunk record
///
/// # Errors
///
/// Returns an error if `data` is longer than a PNG chunk may be
pub fn encode_chunk(chunk_type: ChunkType, data: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(data.len())
        .ok()
        .filter(|length| *length <= MAX_CHUNK_LENGTH)
        .ok_or_else(|| invalid_parameter("data", &data.len(), &"exceeds PNG chunk length limit"))?;

    let mut record = Vec::with_capacity(CHUNK_OVERHEAD + data.len());
    record.extend_from_slice(&length.to_be_bytes());
    record.extend_from_slice(&chunk_type.bytes());
    record.extend_from_slice(data);
    record.extend_from_slice(&chunk_crc(chunk_type, data).to_be_bytes());
    Ok(record)
}

/// Parsed record layout of a PNG byte stream
#[derive(Debug, Clone)]
pub struct ChunkStream<'a> {
    bytes: &'a [u8],
    records: Vec<ChunkRecord>,
}

impl<'a> ChunkStream<'a> {
    /// Walk the chunk records of a PNG stream
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The signature does not match
    /// - A record's header or body runs past the end of the stream
    /// - A record declares a length above the PNG limit
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if !has_signature(bytes) {
            return Err(malformed_png(&"signature mismatch"));
        }

        let mut records = Vec::new();
        let mut offset = PNG_SIGNATURE.len();
        while offset < bytes.len() {
            let length = read_u32_be(bytes, offset).ok_or_else(|| {
                malformed_png(&format!("truncated chunk header at offset {offset}"))
            })?;
            if length > MAX_CHUNK_LENGTH {
                return Err(malformed_png(&format!(
                    "chunk length {length} at offset {offset} exceeds limit"
                )));
            }
            let tag: [u8; 4] = bytes
                .get(offset + 4..offset + 8)
                .and_then(|tag| tag.try_into().ok())
                .ok_or_else(|| {
                    malformed_png(&format!("truncated chunk type at offset {offset}"))
                })?;

            let record = ChunkRecord {
                offset,
                length,
                chunk_type: ChunkType(tag),
            };
            if record.end() > bytes.len() {
                return Err(malformed_png(&format!(
                    "{} chunk at offset {offset} runs past end of stream",
                    record.chunk_type
                )));
            }

            records.push(record);
            offset = record.end();
            if record.chunk_type == ChunkType::IEND {
                break;
            }
        }

        Ok(Self { bytes, records })
    }

    /// Underlying bytes
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Records in stream order
    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    /// First record of a type
    pub fn find(&self, chunk_type: ChunkType) -> Option<&ChunkRecord> {
        self.records
            .iter()
            .find(|record| record.chunk_type == chunk_type)
    }

    /// Number of records of a type
    pub fn count(&self, chunk_type: ChunkType) -> usize {
        self.records
            .iter()
            .filter(|record| record.chunk_type == chunk_type)
            .count()
    }

    /// Data bytes of a record
    pub fn data(&self, record: &ChunkRecord) -> Option<&'a [u8]> {
        self.bytes.get(record.data_start()..record.data_end())
    }

    /// CRC stored after a record's data
    pub fn stored_crc(&self, record: &ChunkRecord) -> Option<u32> {
        read_u32_be(self.bytes, record.data_end())
    }

    /// Whether a record's stored CRC matches its type and data
    pub fn verify_crc(&self, record: &ChunkRecord) -> bool {
        match (self.data(record), self.stored_crc(record)) {
            (Some(data), Some(stored)) => chunk_crc(record.chunk_type, data) == stored,
            _ => false,
        }
    }
}
