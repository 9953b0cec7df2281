//! Store builder for fluent configuration
//!
//! Provides a builder pattern for configuring and opening stores.

use std::path::PathBuf;

use kvs_core::{InstanceId, KvsResult};

use super::config::KvsConfig;
use super::Kvs;

// ============================================================================
// Store Builder Pattern
// ============================================================================

/// Builder for opening a [`Kvs`]
///
/// # Two Ways to Open a Store
///
/// ```ignore
/// use kvs_engine::{Kvs, KvsBuilder};
/// use kvs_core::{InstanceId, OpenNeedDefaults, OpenNeedKvs};
///
/// // 1. Direct open with explicit policies
/// let kvs = Kvs::open(InstanceId::new(0), OpenNeedDefaults::Optional, OpenNeedKvs::Optional, None)?;
///
/// // 2. Builder
/// let kvs = KvsBuilder::new(InstanceId::new(0))
///     .need_defaults(true)
///     .dir("/data/kvs")
///     .build()?;
/// ```
///
/// Both policies default to optional: missing files yield empty maps.
#[derive(Debug, Clone)]
pub struct KvsBuilder {
    instance_id: InstanceId,
    config: KvsConfig,
}

impl KvsBuilder {
    /// Create new builder with defaults
    pub fn new(instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            config: KvsConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(instance_id: InstanceId, config: KvsConfig) -> Self {
        Self {
            instance_id,
            config,
        }
    }

    /// Require the defaults file to exist
    pub fn need_defaults(mut self, flag: bool) -> Self {
        self.config.need_defaults = flag;
        self
    }

    /// Require the current snapshot to exist
    pub fn need_kvs(mut self, flag: bool) -> Self {
        self.config.need_kvs = flag;
        self
    }

    /// Set the directory holding the store files
    pub fn dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.dir = Some(dir.into());
        self
    }

    /// Set whether the store flushes when dropped (default: true)
    pub fn flush_on_exit(mut self, flag: bool) -> Self {
        self.config.flush_on_exit = flag;
        self
    }

    /// Configuration that `build` will use
    pub fn config(&self) -> &KvsConfig {
        &self.config
    }

    /// Open the store
    ///
    /// # Errors
    ///
    /// Returns the first error of the open protocol, see [`Kvs::open`].
    pub fn build(self) -> KvsResult<Kvs> {
        Kvs::open_with_config(self.instance_id, &self.config)
    }
}
