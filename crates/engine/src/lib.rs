//! Store engine
//!
//! This crate ties the lower layers together:
//! - Kvs: The store handle with open, CRUD, flush and restore
//! - KvsBuilder / KvsConfig: Open-time configuration
//!
//! The engine is the only component that owns in-memory state. File layout,
//! hashing and rotation live in `kvs-durability`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod store;

pub use store::{Kvs, KvsBuilder, KvsConfig};
