//! Snapshot generations
//!
//! A store keeps up to [`MAX_SNAPSHOTS`] generations of its current map on
//! disk, numbered `0..count`, generation 0 being the most recent.
//!
//! # Flush
//!
//! 1. Render the map to JSON and compute its checksum
//! 2. Stage the JSON and hash files next to their final names
//! 3. Rotate: drop the oldest generation if the cap is reached, then move
//!    every generation `k` to `k + 1`, highest first so nothing is
//!    overwritten before it has moved. Generation 0 is linked to 1, not
//!    moved, so a complete generation 0 exists at every point
//! 4. Commit the staged JSON, then the staged hash, over generation 0 and
//!    fsync the directory
//!
//! A crash before step 4 leaves the previous generation 0 in place. A crash
//! between the two commits of step 4 is finished by
//! [`SnapshotManager::recover_interrupted_flush`] on the next open.
//!
//! # Restore
//!
//! Loads generation `N` with the same verification as the open path.

use std::io;
use std::path::PathBuf;

use kvs_core::{ErrorCode, KvsError, KvsMap, KvsResult, SnapshotId, MAX_SNAPSHOTS};
use tracing::{debug, info};

use crate::codec;
use crate::disk_snapshot::writer::{self, StagedFile};
use crate::disk_snapshot::{open_json, NeedFile, VerifyHash};
use crate::format::checksum;
use crate::paths::KvsPaths;

/// Rotation, persistence and restore of snapshot generations
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    paths: KvsPaths,
}

impl SnapshotManager {
    /// Create a manager over the files described by `paths`
    pub fn new(paths: KvsPaths) -> Self {
        SnapshotManager { paths }
    }

    /// File paths of the store
    pub fn paths(&self) -> &KvsPaths {
        &self.paths
    }

    /// Maximum number of generations kept on disk
    pub fn max_snapshot_count(&self) -> usize {
        MAX_SNAPSHOTS
    }

    /// Number of generations present on disk
    ///
    /// Counts contiguous generations starting at 0 whose JSON file exists.
    pub fn snapshot_count(&self) -> usize {
        (0..MAX_SNAPSHOTS)
            .take_while(|&id| self.paths.kvs_file(SnapshotId::new(id)).exists())
            .count()
    }

    /// JSON file name of a generation (no filesystem access)
    ///
    /// # Errors
    ///
    /// `InvalidSnapshotId` if `id` is beyond the generation cap.
    pub fn kvs_filename(&self, id: SnapshotId) -> KvsResult<PathBuf> {
        Self::check_in_range(id)?;
        Ok(self.paths.kvs_file(id))
    }

    /// Hash file name of a generation (no filesystem access)
    ///
    /// # Errors
    ///
    /// `InvalidSnapshotId` if `id` is beyond the generation cap.
    pub fn hash_filename(&self, id: SnapshotId) -> KvsResult<PathBuf> {
        Self::check_in_range(id)?;
        Ok(self.paths.hash_file(id))
    }

    /// Persist `map` as generation 0, shifting older generations
    ///
    /// Returns the generation count after the flush.
    ///
    /// # Errors
    ///
    /// - `JsonGeneratorError`: the map cannot be rendered as JSON
    /// - `PhysicalStorageFailure`: a file could not be written or renamed
    pub fn flush(&self, map: &KvsMap) -> KvsResult<usize> {
        let data = codec::render_json(map)?;
        let hash = checksum::checksum(&data);

        let dir = self.paths.effective_dir();
        std::fs::create_dir_all(dir).map_err(|e| storage_failure("create directory", e))?;

        let current = SnapshotId::new(0);
        let json = StagedFile::write(&self.paths, self.paths.kvs_file(current), &data)
            .map_err(|e| storage_failure("stage JSON file", e))?;
        let hash_file =
            match StagedFile::write(&self.paths, self.paths.hash_file(current), &checksum::encode(hash)) {
                Ok(staged) => staged,
                Err(e) => {
                    json.discard();
                    return Err(storage_failure("stage hash file", e));
                }
            };

        if let Err(e) = self.rotate() {
            json.discard();
            hash_file.discard();
            return Err(storage_failure("rotate snapshots", e));
        }

        json.commit()
            .and_then(|_| hash_file.commit())
            .and_then(|_| writer::sync_dir(dir))
            .map_err(|e| storage_failure("commit snapshot", e))?;

        let count = self.snapshot_count();
        info!(
            target: "kvs::snapshot",
            prefix = %self.paths.prefix().display(),
            bytes = data.len(),
            hash,
            snapshot_count = count,
            "Flushed snapshot"
        );
        Ok(count)
    }

    /// Load generation `id` for restoring
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshotId`: no such generation on disk
    /// - any error of the verified load (`KvsHashFileReadError`,
    ///   `ValidationFailed`, `JsonParserError`, ...)
    pub fn restore(&self, id: SnapshotId) -> KvsResult<KvsMap> {
        if id.id() >= self.snapshot_count() {
            return Err(KvsError::invalid_snapshot(id.id()));
        }

        let map = open_json(
            &self.paths.snapshot_prefix(id),
            NeedFile::Required,
            VerifyHash::Yes,
        )?;
        info!(target: "kvs::snapshot", snapshot = id.id(), keys = map.len(), "Restored snapshot");
        Ok(map)
    }

    /// Remove temporary files left by an interrupted flush
    pub fn cleanup_temp_files(&self) -> io::Result<usize> {
        writer::cleanup_temp_files(&self.paths)
    }

    /// Finish a flush that stopped between its two commits
    ///
    /// The JSON file is committed before the hash file. A staged hash with
    /// no staged JSON next to it therefore belongs to the committed
    /// generation 0; it is committed when it matches that file.
    pub fn recover_interrupted_flush(&self) -> io::Result<bool> {
        let current = SnapshotId::new(0);
        let json_file = self.paths.kvs_file(current);
        let hash_file = self.paths.hash_file(current);
        let staged_hash = self.paths.temp_file(&hash_file);

        if self.paths.temp_file(&json_file).exists() || !staged_hash.exists() {
            return Ok(false);
        }
        let data = match std::fs::read(&json_file) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if !checksum::verify(&data, &std::fs::read(&staged_hash)?) {
            return Ok(false);
        }

        std::fs::rename(&staged_hash, &hash_file)?;
        writer::sync_dir(self.paths.effective_dir())?;
        info!(
            target: "kvs::snapshot",
            prefix = %self.paths.prefix().display(),
            "Completed interrupted flush"
        );
        Ok(true)
    }

    /// Shift every generation up by one, dropping the oldest beyond the cap
    ///
    /// Generation 0 is linked rather than moved, so it stays readable until
    /// the staged files are renamed over it.
    fn rotate(&self) -> io::Result<()> {
        let oldest = SnapshotId::new(MAX_SNAPSHOTS - 1);
        if writer::remove_if_exists(&self.paths.kvs_file(oldest))? {
            debug!(target: "kvs::snapshot", snapshot = oldest.id(), "Discarded oldest snapshot");
        }
        writer::remove_if_exists(&self.paths.hash_file(oldest))?;

        for id in (1..MAX_SNAPSHOTS - 1).rev() {
            let from = SnapshotId::new(id);
            let to = SnapshotId::new(id + 1);
            if writer::rename_if_exists(&self.paths.kvs_file(from), &self.paths.kvs_file(to))? {
                debug!(target: "kvs::snapshot", from = id, to = id + 1, "Rotated snapshot");
            }
            writer::rename_if_exists(&self.paths.hash_file(from), &self.paths.hash_file(to))?;
        }

        let current = SnapshotId::new(0);
        let previous = SnapshotId::new(1);
        if writer::link_or_copy(&self.paths.kvs_file(current), &self.paths.kvs_file(previous))? {
            debug!(target: "kvs::snapshot", from = 0, to = 1, "Rotated snapshot");
        }
        writer::link_or_copy(&self.paths.hash_file(current), &self.paths.hash_file(previous))?;
        Ok(())
    }

    fn check_in_range(id: SnapshotId) -> KvsResult<()> {
        if id.id() >= MAX_SNAPSHOTS {
            return Err(KvsError::invalid_snapshot(id.id()));
        }
        Ok(())
    }
}

fn storage_failure(action: &str, e: io::Error) -> KvsError {
    KvsError::new(
        ErrorCode::PhysicalStorageFailure,
        format!("{}: {}", action, e),
    )
}
