//! Store open configuration
//!
//! Controls which files must exist when a store is opened, where they live,
//! and whether the store flushes itself when dropped.
//!
//! `KvsConfig` derives serde traits so it can be embedded in an
//! application's own configuration file:
//!
//! ```toml
//! need_defaults = false
//! need_kvs = true
//! dir = "/var/lib/app/kvs"
//! flush_on_exit = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use kvs_core::{ErrorCode, KvsError, KvsResult, OpenNeedDefaults, OpenNeedKvs};

/// Store open configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvsConfig {
    /// Fail the open if the defaults file cannot be read
    #[serde(default)]
    pub need_defaults: bool,
    /// Fail the open if the current snapshot cannot be read
    #[serde(default)]
    pub need_kvs: bool,
    /// Directory holding the store files (working directory if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Flush automatically when the store is dropped
    #[serde(default = "default_flush_on_exit")]
    pub flush_on_exit: bool,
}

fn default_flush_on_exit() -> bool {
    true
}

impl Default for KvsConfig {
    fn default() -> Self {
        KvsConfig {
            need_defaults: false,
            need_kvs: false,
            dir: None,
            flush_on_exit: default_flush_on_exit(),
        }
    }
}

impl KvsConfig {
    /// Set the defaults policy
    pub fn with_need_defaults(mut self, required: bool) -> Self {
        self.need_defaults = required;
        self
    }

    /// Set the current-snapshot policy
    pub fn with_need_kvs(mut self, required: bool) -> Self {
        self.need_kvs = required;
        self
    }

    /// Set the directory
    pub fn with_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the flush-on-exit flag
    pub fn with_flush_on_exit(mut self, flush_on_exit: bool) -> Self {
        self.flush_on_exit = flush_on_exit;
        self
    }

    /// Defaults policy as an open flag
    pub fn need_defaults_policy(&self) -> OpenNeedDefaults {
        OpenNeedDefaults::from(self.need_defaults)
    }

    /// Current-snapshot policy as an open flag
    pub fn need_kvs_policy(&self) -> OpenNeedKvs {
        OpenNeedKvs::from(self.need_kvs)
    }

    /// Configured directory
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the directory path exists but is not a directory.
    /// A directory that does not exist yet is valid; it is created on flush.
    pub fn validate(&self) -> KvsResult<()> {
        if let Some(dir) = &self.dir {
            if dir.exists() && !dir.is_dir() {
                return Err(KvsError::new(
                    ErrorCode::FileNotFound,
                    format!("{} is not a directory", dir.display()),
                ));
            }
        }
        Ok(())
    }
}
