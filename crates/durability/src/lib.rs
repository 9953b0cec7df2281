//! Durability layer for the key-value store
//!
//! This crate handles everything that touches disk:
//!
//! - Paths: File naming for defaults, snapshots and hash files
//! - Format: Checksum algorithm and 4-byte hash file encoding
//! - Codec: JSON text ↔ value model conversion
//! - Disk snapshot: Verified loading and crash-safe writing of snapshot files
//! - Snapshot: Generation rotation, persistence and restore

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec; // JSON ↔ KvsValue conversion
pub mod disk_snapshot; // Verified reads, crash-safe writes
pub mod format; // Checksum and hash file format
pub mod paths; // File naming
pub mod snapshot; // Generation rotation and restore

// === Re-exports ===
pub use disk_snapshot::{open_json, NeedFile, VerifyHash};
pub use paths::KvsPaths;
pub use snapshot::SnapshotManager;
