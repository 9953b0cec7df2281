//! Crash-safe file writes
//!
//! Uses the write-fsync-rename pattern so a snapshot file is either the old
//! complete file or the new complete file, never a partial one.
//!
//! # Crash Safety
//!
//! Committing a file follows this pattern:
//! 1. Write to a hidden temporary file (`.kvs_<id>_0.json.tmp`)
//! 2. fsync the temporary file
//! 3. Atomic rename to the final path
//! 4. fsync the parent directory
//!
//! Temporary files left behind by a crash are removed by
//! [`cleanup_temp_files`] the next time the store is opened.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::paths::KvsPaths;

/// A file staged in a temporary location, not yet visible under its final name
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl StagedFile {
    /// Write `data` to the temporary file for `final_path` and fsync it
    pub fn write(paths: &KvsPaths, final_path: PathBuf, data: &[u8]) -> io::Result<Self> {
        let temp_path = paths.temp_file(&final_path);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        Ok(StagedFile {
            temp_path,
            final_path,
        })
    }

    /// Atomically move the staged file to its final path
    pub fn commit(self) -> io::Result<PathBuf> {
        fs::rename(&self.temp_path, &self.final_path)?;
        Ok(self.final_path)
    }

    /// Remove the temporary file without committing it
    pub fn discard(self) {
        let _ = fs::remove_file(&self.temp_path);
    }
}

/// fsync a directory so renames inside it are durable
pub fn sync_dir(dir: &Path) -> io::Result<()> {
    let dir = File::open(dir)?;
    dir.sync_all()
}

/// Rename `from` to `to`; a missing source is not an error
///
/// Returns whether a file was moved.
pub fn rename_if_exists(from: &Path, to: &Path) -> io::Result<bool> {
    match fs::rename(from, to) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Give `from` a second name `to`, replacing any existing `to`
///
/// Hard-links when the filesystem allows it and copies otherwise, so `from`
/// stays in place. Returns whether `from` existed.
pub fn link_or_copy(from: &Path, to: &Path) -> io::Result<bool> {
    remove_if_exists(to)?;
    match fs::hard_link(from, to) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(_) => match fs::copy(from, to) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        },
    }
}

/// Remove `path`; a missing file is not an error
///
/// Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Clean up incomplete temporary files of one store
///
/// Returns the number of files removed.
pub fn cleanup_temp_files(paths: &KvsPaths) -> io::Result<usize> {
    let dir = paths.effective_dir();
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if paths.is_temp_file_name(&name) {
            fs::remove_file(entry.path())?;
            count += 1;
        }
    }

    Ok(count)
}
