//! Client interface of a store
//!
//! This module defines the `KvsApi` trait: the narrow surface through which
//! callers (or a binding layer) use a store. The in-process engine implements
//! it; a remote or cross-language engine can implement the same trait without
//! changing callers.

use std::path::PathBuf;

use crate::error::KvsResult;
use crate::types::SnapshotId;
use crate::value::KvsValue;

/// Store operations exposed to callers
///
/// Thread safety: all methods take `&self` and must be safe to call
/// concurrently from multiple threads (requires Send + Sync).
pub trait KvsApi: Send + Sync {
    /// Enable or disable the implicit flush when the store is dropped
    fn set_flush_on_exit(&self, flush_on_exit: bool);

    /// Clear the current map (defaults and on-disk snapshots are untouched)
    fn reset(&self) -> KvsResult<()>;

    /// All keys of the current map
    fn get_all_keys(&self) -> KvsResult<Vec<String>>;

    /// Whether `key` is present in the current map
    fn key_exists(&self, key: &str) -> KvsResult<bool>;

    /// Value for `key`, falling back to the default map
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is in neither map.
    fn get_value(&self, key: &str) -> KvsResult<KvsValue>;

    /// Default value for `key`
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key has no default.
    fn get_default_value(&self, key: &str) -> KvsResult<KvsValue>;

    /// Whether `key` currently resolves to its default value
    fn is_value_default(&self, key: &str) -> KvsResult<bool>;

    /// Insert or replace `key` in the current map
    fn set_value(&self, key: &str, value: KvsValue) -> KvsResult<()>;

    /// Remove `key` from the current map
    fn remove_key(&self, key: &str) -> KvsResult<()>;

    /// Persist the current map as snapshot generation 0
    fn flush(&self) -> KvsResult<()>;

    /// Number of snapshot generations on disk
    fn snapshot_count(&self) -> usize;

    /// Maximum number of snapshot generations kept on disk
    fn max_snapshot_count(&self) -> usize;

    /// Replace the current map with a stored generation
    fn snapshot_restore(&self, id: SnapshotId) -> KvsResult<()>;

    /// Path of the JSON file for a generation
    fn get_kvs_filename(&self, id: SnapshotId) -> KvsResult<PathBuf>;

    /// Path of the hash file for a generation
    fn get_hash_filename(&self, id: SnapshotId) -> KvsResult<PathBuf>;
}
