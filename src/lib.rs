//! KVS - Embedded file-backed key-value store
//!
//! A store keeps a mutable current map and a read-only default map per
//! instance. The current map is persisted as JSON snapshot generations,
//! each paired with a 4-byte checksum file that is verified on load.
//!
//! # Quick Start
//!
//! ```ignore
//! use kvs::{Kvs, KvsBuilder, KvsValue, InstanceId};
//!
//! let kvs = KvsBuilder::new(InstanceId::new(0)).dir("/var/lib/app").build()?;
//! kvs.set_value("number", KvsValue::from(123.0))?;
//! let value = kvs.get_value("number")?;
//! kvs.flush()?;
//! ```
//!
//! # Architecture
//!
//! - `kvs-core`: values, errors, identifiers and the [`KvsApi`] trait
//! - `kvs-durability`: file naming, checksums, JSON codec, snapshot rotation
//! - `kvs-engine`: the [`Kvs`] handle and its configuration

pub use kvs_core::*;
pub use kvs_durability::{codec, format, KvsPaths, SnapshotManager};
pub use kvs_engine::{Kvs, KvsBuilder, KvsConfig};
