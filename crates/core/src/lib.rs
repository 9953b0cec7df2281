//! Core types and traits for the key-value store
//!
//! This crate defines the foundational types used throughout the system:
//! - KvsValue: Recursive value enum (Null, Boolean, Number, String, Array, Object)
//! - ErrorCode / KvsError: Error taxonomy with stable numeric codes
//! - InstanceId, SnapshotId: Store and generation identifiers
//! - OpenNeedDefaults, OpenNeedKvs: Open-time file policies
//! - KvsApi: Client interface implemented by store engines
//! - Limits: Key validation

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod error;
pub mod limits;
pub mod traits;
pub mod types;
pub mod value;

// Re-export commonly used types and traits
pub use error::{message_for_code, ErrorCode, KvsError, KvsResult, UNKNOWN_ERROR_MESSAGE};
pub use limits::{validate_key, MAX_KEY_SIZE};
pub use traits::KvsApi;
pub use types::{InstanceId, OpenNeedDefaults, OpenNeedKvs, SnapshotId, MAX_SNAPSHOTS};
pub use value::{KvsMap, KvsValue, ValueType};
