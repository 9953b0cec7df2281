//! On-disk byte formats.
//!
//! Snapshot data is plain JSON text (see `codec`); this module holds the
//! binary side of the format, the integrity checksum stored next to each
//! snapshot.
//!
//! # Module Structure
//!
//! - `checksum`: Checksum algorithm and the 4-byte hash file encoding

pub mod checksum;

pub use checksum::{checksum, decode, encode, verify, HASH_FILE_SIZE};
