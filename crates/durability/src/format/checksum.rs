//! Hash file format
//!
//! A snapshot's `.hash` file holds exactly [`HASH_FILE_SIZE`] bytes: the
//! big-endian encoding of the checksum of the corresponding `.json` file's
//! raw bytes.
//!
//! # Checksum
//!
//! Two 32-bit accumulators `a = 1`, `b = 0` and modulus `65521`. For each
//! byte `c`: `a = (a + c) % 65521`, then `b = (b + a) % 65521`. The result
//! is `(b << 16) | a`.

use byteorder::{BigEndian, ByteOrder};

/// Size of a hash file in bytes
pub const HASH_FILE_SIZE: usize = 4;

/// Modulus of both accumulators
const MOD_ADLER: u32 = 65521;

/// Compute the checksum of `data`
pub fn checksum(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &c in data {
        a = (a + c as u32) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }
    (b << 16) | a
}

/// Encode a checksum as hash file contents (most significant byte first)
pub fn encode(hash: u32) -> [u8; HASH_FILE_SIZE] {
    let mut buf = [0u8; HASH_FILE_SIZE];
    BigEndian::write_u32(&mut buf, hash);
    buf
}

/// Decode hash file contents
///
/// Returns `None` unless `stored` is exactly [`HASH_FILE_SIZE`] bytes.
pub fn decode(stored: &[u8]) -> Option<u32> {
    if stored.len() != HASH_FILE_SIZE {
        return None;
    }
    Some(BigEndian::read_u32(stored))
}

/// Check `data` against stored hash file contents
pub fn verify(data: &[u8], stored: &[u8]) -> bool {
    decode(stored) == Some(checksum(data))
}
