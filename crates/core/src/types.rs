//! Identifier and policy types
//!
//! - InstanceId: Selects which store a process opens
//! - SnapshotId: Generation number of a persisted snapshot (0 = most recent)
//! - OpenNeedDefaults / OpenNeedKvs: Required/Optional policies for open

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of snapshot generations kept on disk
pub const MAX_SNAPSHOTS: usize = 3;

/// Identifier of a store instance
///
/// Combined with an optional directory to form the file-name prefix
/// `"<dir>/kvs_<id>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub usize);

impl InstanceId {
    /// Create a new instance id
    pub fn new(id: usize) -> Self {
        InstanceId(id)
    }

    /// Raw numeric id
    pub fn id(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for InstanceId {
    fn from(id: usize) -> Self {
        InstanceId(id)
    }
}

/// Snapshot generation, `0` is the most recent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotId(pub usize);

impl SnapshotId {
    /// Create a new snapshot id
    pub fn new(id: usize) -> Self {
        SnapshotId(id)
    }

    /// Raw generation number
    pub fn id(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SnapshotId {
    fn from(id: usize) -> Self {
        SnapshotId(id)
    }
}

/// Whether the default file must exist at open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenNeedDefaults {
    /// Use an empty default map if no default file is available
    #[default]
    Optional,
    /// The default file must be readable
    Required,
}

impl From<bool> for OpenNeedDefaults {
    fn from(required: bool) -> Self {
        if required {
            OpenNeedDefaults::Required
        } else {
            OpenNeedDefaults::Optional
        }
    }
}

/// Whether the current snapshot file must exist at open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenNeedKvs {
    /// Use an empty store if no snapshot is available
    #[default]
    Optional,
    /// The current snapshot must already exist
    Required,
}

impl From<bool> for OpenNeedKvs {
    fn from(required: bool) -> Self {
        if required {
            OpenNeedKvs::Required
        } else {
            OpenNeedKvs::Optional
        }
    }
}
