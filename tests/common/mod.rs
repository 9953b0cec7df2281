//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

pub use kvs::format::checksum;
pub use kvs::{
    ErrorCode, InstanceId, Kvs, KvsApi, KvsBuilder, KvsConfig, KvsError, KvsResult,
    KvsValue, OpenNeedDefaults, OpenNeedKvs, SnapshotId, MAX_SNAPSHOTS,
};
use tempfile::TempDir;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process (`RUST_LOG` filters it).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// TestDir - store directory with file fixtures
// ============================================================================

/// Temporary store directory with helpers for writing fixture files.
pub struct TestDir {
    pub dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        init_tracing();
        TestDir {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open instance `id` with explicit policies.
    pub fn open(
        &self,
        id: usize,
        need_defaults: OpenNeedDefaults,
        need_kvs: OpenNeedKvs,
    ) -> KvsResult<Kvs> {
        Kvs::open(InstanceId::new(id), need_defaults, need_kvs, Some(self.path()))
    }

    /// Open instance `id` with both files optional.
    pub fn open_optional(&self, id: usize) -> Kvs {
        self.open(id, OpenNeedDefaults::Optional, OpenNeedKvs::Optional)
            .expect("Failed to open store")
    }

    pub fn kvs_file(&self, id: usize, generation: usize) -> PathBuf {
        self.path().join(format!("kvs_{}_{}.json", id, generation))
    }

    pub fn hash_file(&self, id: usize, generation: usize) -> PathBuf {
        self.path().join(format!("kvs_{}_{}.hash", id, generation))
    }

    pub fn default_file(&self, id: usize) -> PathBuf {
        self.path().join(format!("kvs_{}_default.json", id))
    }

    /// Write a defaults file (never hash-checked).
    pub fn write_defaults(&self, id: usize, json: &str) {
        fs::write(self.default_file(id), json).expect("Failed to write defaults");
    }

    /// Write a snapshot generation together with its correct hash file.
    pub fn write_snapshot(&self, id: usize, generation: usize, json: &str) {
        fs::write(self.kvs_file(id, generation), json).expect("Failed to write snapshot");
        fs::write(self.hash_file(id, generation), checksum::encode(checksum::checksum(json.as_bytes())))
            .expect("Failed to write hash");
    }

    /// XOR one byte of a generation's hash file.
    pub fn flip_hash_byte(&self, id: usize, generation: usize, index: usize) {
        let path = self.hash_file(id, generation);
        let mut bytes = fs::read(&path).expect("Failed to read hash");
        bytes[index] ^= 0xFF;
        fs::write(&path, bytes).expect("Failed to write hash");
    }

    /// Parse a snapshot file back into JSON for inspection.
    pub fn read_snapshot(&self, id: usize, generation: usize) -> serde_json::Value {
        let text = fs::read_to_string(self.kvs_file(id, generation)).expect("Failed to read snapshot");
        serde_json::from_str(&text).expect("Snapshot is not valid JSON")
    }
}

/// Assert that `result` failed with `code`.
pub fn assert_code<T: std::fmt::Debug>(result: KvsResult<T>, code: ErrorCode) {
    match result {
        Ok(v) => panic!("expected {:?}, got Ok({:?})", code, v),
        Err(e) => assert_eq!(e.code(), code, "unexpected error: {}", e),
    }
}
