//! Store file naming
//!
//! Every file of a store shares the prefix `"<dir>/kvs_<instance>"`
//! (`"kvs_<instance>"` when no directory is configured):
//!
//! ```text
//! <dir>/
//! ├── kvs_<instance>_default.json   # Read-only defaults (no hash)
//! ├── kvs_<instance>_0.json         # Most recent snapshot
//! ├── kvs_<instance>_0.hash         # Checksum of kvs_<instance>_0.json
//! ├── kvs_<instance>_1.json         # Previous generation
//! ├── kvs_<instance>_1.hash
//! └── ...
//! ```
//!
//! Path computation never touches the filesystem.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kvs_core::{InstanceId, SnapshotId};

/// Extension of snapshot and default data files
pub const JSON_EXTENSION: &str = ".json";
/// Extension of checksum files
pub const HASH_EXTENSION: &str = ".hash";
/// Suffix of temporary files written during flush
pub const TEMP_SUFFIX: &str = ".tmp";

/// File paths of one store instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvsPaths {
    /// Directory holding the files, `None` for the working directory
    dir: Option<PathBuf>,
    /// File-name stem, `kvs_<instance>`
    stem: String,
}

impl KvsPaths {
    /// Create paths for an instance
    pub fn new(instance_id: InstanceId, dir: Option<&Path>) -> Self {
        KvsPaths {
            dir: dir.map(Path::to_path_buf),
            stem: format!("kvs_{}", instance_id),
        }
    }

    /// Configured directory, if any
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Directory to create and sync (the working directory when none is set)
    pub fn effective_dir(&self) -> &Path {
        match &self.dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Filename prefix, `<dir>/kvs_<instance>`
    pub fn prefix(&self) -> PathBuf {
        self.join(&self.stem)
    }

    /// Prefix of the defaults file, `<dir>/kvs_<instance>_default`
    pub fn default_prefix(&self) -> PathBuf {
        self.join(&format!("{}_default", self.stem))
    }

    /// Prefix of a snapshot generation, `<dir>/kvs_<instance>_<id>`
    pub fn snapshot_prefix(&self, id: SnapshotId) -> PathBuf {
        self.join(&format!("{}_{}", self.stem, id))
    }

    /// JSON file of a snapshot generation
    pub fn kvs_file(&self, id: SnapshotId) -> PathBuf {
        json_path(&self.snapshot_prefix(id))
    }

    /// Hash file of a snapshot generation
    pub fn hash_file(&self, id: SnapshotId) -> PathBuf {
        hash_path(&self.snapshot_prefix(id))
    }

    /// Defaults JSON file
    pub fn default_file(&self) -> PathBuf {
        json_path(&self.default_prefix())
    }

    /// Temporary file used while committing `final_path`
    ///
    /// Hidden (dot-prefixed) next to the final file: `.kvs_1_0.json.tmp`.
    pub fn temp_file(&self, final_path: &Path) -> PathBuf {
        let name = final_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.join(&format!(".{}{}", name, TEMP_SUFFIX))
    }

    /// Whether a directory entry name is a temporary file of this store
    pub fn is_temp_file_name(&self, name: &str) -> bool {
        name.starts_with(&format!(".{}_", self.stem)) && name.ends_with(TEMP_SUFFIX)
    }

    fn join(&self, name: &str) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// `<prefix>.json`
pub fn json_path(prefix: &Path) -> PathBuf {
    with_suffix(prefix, JSON_EXTENSION)
}

/// `<prefix>.hash`
pub fn hash_path(prefix: &Path) -> PathBuf {
    with_suffix(prefix, HASH_EXTENSION)
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = prefix.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}
