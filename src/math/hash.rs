//! Xorshift-mixed hashing of grid coordinates

use crate::io::configuration::{COL_HASH_PRIME, ROW_HASH_PRIME};

/// Mix a seed and a grid cell into a well-spread 32-bit value
///
/// The row and column are multiplied by large primes and folded into the
/// seed, then three xorshift rounds (13, 17, 5) spread the bits. All
/// arithmetic wraps at 32 bits so the same triple always hashes the same.
pub const fn cell_hash(seed: u32, row: u32, col: u32) -> u32 {
    let mut state =
        seed ^ row.wrapping_mul(ROW_HASH_PRIME) ^ col.wrapping_mul(COL_HASH_PRIME);
    state ^= state << 13;
    state ^= state >> 17;
    state ^= state << 5;
    state
}
