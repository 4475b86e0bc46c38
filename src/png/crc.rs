//! IEEE CRC32 (reflected, polynomial `0xEDB88320`) as used by PNG chunks

const POLYNOMIAL: u32 = 0xEDB8_8320;

// Bounded loops over a fixed-size table
#[allow(clippy::indexing_slicing)]
const fn build_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 == 1 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = build_table();

/// Incremental CRC32, seeded with all ones and complemented on finish
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    /// Start a new checksum
    pub const fn new() -> Self {
        Self { state: u32::MAX }
    }

    /// Feed more bytes
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let index = ((self.state ^ u32::from(byte)) & 0xFF) as usize;
            let entry = CRC_TABLE.get(index).copied().unwrap_or_default();
            self.state = entry ^ (self.state >> 8);
        }
    }

    /// Final checksum value
    pub const fn finish(self) -> u32 {
        self.state ^ u32::MAX
    }
}

/// Checksum of a single buffer
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finish()
}
