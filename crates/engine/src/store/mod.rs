//! Store struct and open/close logic
//!
//! A [`Kvs`] owns two maps behind one lock:
//!
//! - the current map, loaded from snapshot generation 0 and mutated by callers
//! - the default map, loaded once from `kvs_<id>_default.json` and read-only
//!
//! Reads of a key absent from the current map fall back to the default map.
//! Writes only ever touch the current map. `flush` persists the current map
//! as a new generation 0; dropping the store flushes as well unless
//! flush-on-exit has been disabled.
//!
//! ## Open Protocol
//!
//! 1. Validate the configuration
//! 2. Finish a flush interrupted between its commits, then remove any
//!    temporary files still left behind (failures here are only logged)
//! 3. Load the defaults file (no hash check)
//! 4. Load generation 0 (hash checked)
//!
//! Any other failing step aborts the open; no store is returned.

pub mod builder;
pub mod config;

pub use builder::KvsBuilder;
pub use config::KvsConfig;

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use kvs_core::{
    validate_key, InstanceId, KvsApi, KvsError, KvsMap, KvsResult, KvsValue, OpenNeedDefaults,
    OpenNeedKvs, SnapshotId,
};
use kvs_durability::{open_json, KvsPaths, NeedFile, SnapshotManager, VerifyHash};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct KvsState {
    kvs: KvsMap,
    defaults: KvsMap,
}

/// A persistent key-value store instance
///
/// All operations take `&self`; the store is `Send + Sync` and can be
/// shared between threads behind an `Arc`. Every map access, flush and
/// restore is serialized by a single internal lock.
///
/// # Example
///
/// ```ignore
/// use kvs_engine::Kvs;
/// use kvs_core::{InstanceId, KvsValue, OpenNeedDefaults, OpenNeedKvs};
///
/// let kvs = Kvs::open(InstanceId::new(0), OpenNeedDefaults::Optional, OpenNeedKvs::Optional, None)?;
/// kvs.set_value("number", KvsValue::from(123.0))?;
/// kvs.flush()?;
/// ```
#[derive(Debug)]
pub struct Kvs {
    instance_id: InstanceId,
    state: Mutex<KvsState>,
    snapshots: SnapshotManager,
    flush_on_exit: AtomicBool,
}

impl Kvs {
    /// Open a store in `dir` (working directory if `None`)
    ///
    /// # Errors
    ///
    /// - `KvsFileReadError`: a required file could not be read
    /// - `KvsHashFileReadError`: generation 0 exists but its hash file does not
    /// - `ValidationFailed`: generation 0 does not match its hash
    /// - `JsonParserError` / `ConversionFailed`: a file is not valid store JSON
    pub fn open(
        instance_id: InstanceId,
        need_defaults: OpenNeedDefaults,
        need_kvs: OpenNeedKvs,
        dir: Option<&Path>,
    ) -> KvsResult<Kvs> {
        let paths = KvsPaths::new(instance_id, dir);
        let snapshots = SnapshotManager::new(paths);

        if let Err(e) = snapshots.recover_interrupted_flush() {
            warn!(target: "kvs::open", instance = %instance_id, error = %e, "Failed to complete interrupted flush");
        }
        match snapshots.cleanup_temp_files() {
            Ok(0) => {}
            Ok(removed) => {
                info!(target: "kvs::open", instance = %instance_id, removed, "Removed leftover temporary files")
            }
            Err(e) => {
                warn!(target: "kvs::open", instance = %instance_id, error = %e, "Failed to clean up temporary files")
            }
        }

        let paths = snapshots.paths();
        let defaults = open_json(
            &paths.default_prefix(),
            NeedFile::from(need_defaults),
            VerifyHash::No,
        )?;
        let kvs = open_json(
            &paths.snapshot_prefix(SnapshotId::new(0)),
            NeedFile::from(need_kvs),
            VerifyHash::Yes,
        )?;

        info!(
            target: "kvs::open",
            instance = %instance_id,
            prefix = %paths.prefix().display(),
            keys = kvs.len(),
            defaults = defaults.len(),
            "Opened KVS"
        );

        Ok(Kvs {
            instance_id,
            state: Mutex::new(KvsState { kvs, defaults }),
            snapshots,
            flush_on_exit: AtomicBool::new(true),
        })
    }

    /// Open a store from a [`KvsConfig`]
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the configured directory is not a directory, or
    /// any error of [`Kvs::open`].
    pub fn open_with_config(instance_id: InstanceId, config: &KvsConfig) -> KvsResult<Kvs> {
        config.validate()?;
        let kvs = Self::open(
            instance_id,
            config.need_defaults_policy(),
            config.need_kvs_policy(),
            config.dir(),
        )?;
        kvs.set_flush_on_exit(config.flush_on_exit);
        Ok(kvs)
    }

    /// Start a [`KvsBuilder`] for `instance_id`
    pub fn builder(instance_id: InstanceId) -> KvsBuilder {
        KvsBuilder::new(instance_id)
    }

    /// Instance this store was opened for
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// Directory holding the store files, if one was given
    pub fn dir(&self) -> Option<&Path> {
        self.snapshots.paths().dir()
    }

    /// Current flush-on-exit flag
    pub fn flush_on_exit(&self) -> bool {
        self.flush_on_exit.load(Ordering::SeqCst)
    }

    /// Enable or disable the flush performed when the store is dropped
    pub fn set_flush_on_exit(&self, flush_on_exit: bool) {
        self.flush_on_exit.store(flush_on_exit, Ordering::SeqCst);
    }

    /// Clear the current map
    ///
    /// Defaults and files on disk are left alone; the cleared map reaches
    /// disk on the next flush.
    pub fn reset(&self) -> KvsResult<()> {
        self.state.lock().kvs.clear();
        debug!(target: "kvs::store", instance = %self.instance_id, "Reset current map");
        Ok(())
    }

    /// Keys of the current map, sorted
    pub fn get_all_keys(&self) -> KvsResult<Vec<String>> {
        let mut keys: Vec<String> = self.state.lock().kvs.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }

    /// Whether `key` is in the current map (defaults are not consulted)
    pub fn key_exists(&self, key: &str) -> KvsResult<bool> {
        Ok(self.state.lock().kvs.contains_key(key))
    }

    /// Value of `key`, from the current map or else the default map
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if neither map holds `key`.
    pub fn get_value(&self, key: &str) -> KvsResult<KvsValue> {
        let state = self.state.lock();
        state
            .kvs
            .get(key)
            .or_else(|| state.defaults.get(key))
            .cloned()
            .ok_or_else(|| KvsError::key_not_found(key))
    }

    /// Default value of `key`
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if `key` has no default.
    pub fn get_default_value(&self, key: &str) -> KvsResult<KvsValue> {
        self.state
            .lock()
            .defaults
            .get(key)
            .cloned()
            .ok_or_else(|| KvsError::key_not_found(key))
    }

    /// Whether `key` resolves to its default
    ///
    /// `true` when `key` is absent from the current map and has a default,
    /// `false` when the current map holds it (even with an equal value).
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if neither map holds `key`.
    pub fn is_value_default(&self, key: &str) -> KvsResult<bool> {
        let state = self.state.lock();
        if state.kvs.contains_key(key) {
            Ok(false)
        } else if state.defaults.contains_key(key) {
            Ok(true)
        } else {
            Err(KvsError::key_not_found(key))
        }
    }

    /// Insert or replace `key` in the current map
    ///
    /// # Errors
    ///
    /// `InvalidKey` if `key` is empty or longer than the key size limit.
    pub fn set_value(&self, key: &str, value: KvsValue) -> KvsResult<()> {
        validate_key(key)?;
        let mut state = self.state.lock();
        state.kvs.insert(key.to_string(), value);
        Ok(())
    }

    /// Remove `key` from the current map
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the current map does not hold `key`. A key that
    /// only has a default cannot be removed.
    pub fn remove_key(&self, key: &str) -> KvsResult<()> {
        match self.state.lock().kvs.remove(key) {
            Some(_) => Ok(()),
            None => Err(KvsError::key_not_found(key)),
        }
    }

    /// Persist the current map as generation 0, rotating older generations
    ///
    /// # Errors
    ///
    /// - `JsonGeneratorError`: a value cannot be written as JSON (NaN, infinity)
    /// - `PhysicalStorageFailure`: the files could not be written
    pub fn flush(&self) -> KvsResult<()> {
        let state = self.state.lock();
        self.snapshots.flush(&state.kvs)?;
        Ok(())
    }

    /// Number of generations on disk
    pub fn snapshot_count(&self) -> usize {
        let _state = self.state.lock();
        self.snapshots.snapshot_count()
    }

    /// Maximum number of generations kept on disk
    pub fn max_snapshot_count(&self) -> usize {
        self.snapshots.max_snapshot_count()
    }

    /// Replace the current map with generation `id`
    ///
    /// On error the current map is unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshotId`: `id` is not below [`Kvs::snapshot_count`]
    /// - any error of the verified load
    pub fn snapshot_restore(&self, id: SnapshotId) -> KvsResult<()> {
        let mut state = self.state.lock();
        state.kvs = self.snapshots.restore(id)?;
        Ok(())
    }

    /// JSON file path of generation `id`
    ///
    /// # Errors
    ///
    /// `InvalidSnapshotId` if `id` is beyond the generation cap.
    pub fn get_kvs_filename(&self, id: SnapshotId) -> KvsResult<PathBuf> {
        self.snapshots.kvs_filename(id)
    }

    /// Hash file path of generation `id`
    ///
    /// # Errors
    ///
    /// `InvalidSnapshotId` if `id` is beyond the generation cap.
    pub fn get_hash_filename(&self, id: SnapshotId) -> KvsResult<PathBuf> {
        self.snapshots.hash_filename(id)
    }

    /// Path of the defaults file
    pub fn get_default_filename(&self) -> PathBuf {
        self.snapshots.paths().default_file()
    }
}

impl KvsApi for Kvs {
    fn set_flush_on_exit(&self, flush_on_exit: bool) {
        Kvs::set_flush_on_exit(self, flush_on_exit)
    }

    fn reset(&self) -> KvsResult<()> {
        Kvs::reset(self)
    }

    fn get_all_keys(&self) -> KvsResult<Vec<String>> {
        Kvs::get_all_keys(self)
    }

    fn key_exists(&self, key: &str) -> KvsResult<bool> {
        Kvs::key_exists(self, key)
    }

    fn get_value(&self, key: &str) -> KvsResult<KvsValue> {
        Kvs::get_value(self, key)
    }

    fn get_default_value(&self, key: &str) -> KvsResult<KvsValue> {
        Kvs::get_default_value(self, key)
    }

    fn is_value_default(&self, key: &str) -> KvsResult<bool> {
        Kvs::is_value_default(self, key)
    }

    fn set_value(&self, key: &str, value: KvsValue) -> KvsResult<()> {
        Kvs::set_value(self, key, value)
    }

    fn remove_key(&self, key: &str) -> KvsResult<()> {
        Kvs::remove_key(self, key)
    }

    fn flush(&self) -> KvsResult<()> {
        Kvs::flush(self)
    }

    fn snapshot_count(&self) -> usize {
        Kvs::snapshot_count(self)
    }

    fn max_snapshot_count(&self) -> usize {
        Kvs::max_snapshot_count(self)
    }

    fn snapshot_restore(&self, id: SnapshotId) -> KvsResult<()> {
        Kvs::snapshot_restore(self, id)
    }

    fn get_kvs_filename(&self, id: SnapshotId) -> KvsResult<PathBuf> {
        Kvs::get_kvs_filename(self, id)
    }

    fn get_hash_filename(&self, id: SnapshotId) -> KvsResult<PathBuf> {
        Kvs::get_hash_filename(self, id)
    }
}

impl Drop for Kvs {
    fn drop(&mut self) {
        if !self.flush_on_exit() {
            debug!(target: "kvs::store", instance = %self.instance_id, "Flush on exit disabled");
            return;
        }
        if let Err(e) = self.flush() {
            warn!(
                target: "kvs::store",
                instance = %self.instance_id,
                error = %e,
                "Flush on exit failed"
            );
        }
    }
}
