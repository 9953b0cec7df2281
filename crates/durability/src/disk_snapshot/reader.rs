//! Snapshot reader
//!
//! Loads a `<prefix>.json` file, optionally validates it against
//! `<prefix>.hash`, and converts the document into a store map.
//!
//! # Load Order
//!
//! 1. Read the JSON file. Missing: error when the file is required, empty
//!    map when optional. Present but unreadable: always an error.
//! 2. If hash verification is requested, read the hash file (mandatory
//!    whenever the JSON file exists) and compare checksums.
//! 3. Parse the text and convert the root object.

use std::fs;
use std::io;
use std::path::Path;

use kvs_core::{ErrorCode, KvsError, KvsMap, KvsResult, OpenNeedDefaults, OpenNeedKvs};
use tracing::{debug, error, info};

use crate::codec;
use crate::format::checksum;
use crate::paths::{hash_path, json_path};

/// Whether the JSON file must exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedFile {
    /// Missing file yields an empty map
    Optional,
    /// Missing file is an error
    Required,
}

impl From<OpenNeedDefaults> for NeedFile {
    fn from(need: OpenNeedDefaults) -> Self {
        match need {
            OpenNeedDefaults::Optional => NeedFile::Optional,
            OpenNeedDefaults::Required => NeedFile::Required,
        }
    }
}

impl From<OpenNeedKvs> for NeedFile {
    fn from(need: OpenNeedKvs) -> Self {
        match need {
            OpenNeedKvs::Optional => NeedFile::Optional,
            OpenNeedKvs::Required => NeedFile::Required,
        }
    }
}

/// Whether the JSON file is checked against its hash file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyHash {
    /// Defaults are never integrity-checked
    No,
    /// Snapshots must match their hash file
    Yes,
}

/// Load a JSON file (and optionally its hash) into a store map
///
/// # Errors
///
/// - `KvsFileReadError`: required JSON file missing, or JSON file present
///   but unreadable
/// - `KvsHashFileReadError`: hash file could not be read
/// - `ValidationFailed`: hash file malformed or checksum mismatch
/// - `JsonParserError`: JSON text is invalid
/// - `ConversionFailed`: a JSON node could not be converted
pub fn open_json(prefix: &Path, need_file: NeedFile, verify_hash: VerifyHash) -> KvsResult<KvsMap> {
    let json_file = json_path(prefix);

    let data = match fs::read(&json_file) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound && need_file == NeedFile::Optional => {
            info!(target: "kvs::open", path = %json_file.display(), "File not found, using empty data");
            return Ok(KvsMap::new());
        }
        Err(e) => {
            error!(target: "kvs::open", path = %json_file.display(), error = %e, "File could not be read");
            return Err(KvsError::new(
                ErrorCode::KvsFileReadError,
                format!("{}: {}", json_file.display(), e),
            ));
        }
    };
    debug!(target: "kvs::open", path = %json_file.display(), bytes = data.len(), "Read JSON file");

    if verify_hash == VerifyHash::Yes {
        verify_hash_file(&json_file, &data, &hash_path(prefix))?;
    }

    let root = codec::parse_json(&data)?;
    codec::map_from_json(&root)
}

fn verify_hash_file(json_file: &Path, data: &[u8], hash_file: &Path) -> KvsResult<()> {
    let stored = fs::read(hash_file).map_err(|e| {
        error!(target: "kvs::open", path = %hash_file.display(), error = %e, "Hash file could not be read");
        KvsError::new(
            ErrorCode::KvsHashFileReadError,
            format!("{}: {}", hash_file.display(), e),
        )
    })?;

    let stored_hash = checksum::decode(&stored).ok_or_else(|| {
        error!(target: "kvs::open", path = %hash_file.display(), size = stored.len(), "Hash file has wrong size");
        KvsError::new(
            ErrorCode::ValidationFailed,
            format!(
                "{}: expected {} bytes, found {}",
                hash_file.display(),
                checksum::HASH_FILE_SIZE,
                stored.len()
            ),
        )
    })?;

    let computed = checksum::checksum(data);
    if stored_hash != computed {
        error!(
            target: "kvs::open",
            json = %json_file.display(),
            hash = %hash_file.display(),
            stored = stored_hash,
            computed,
            "KVS data corrupted"
        );
        return Err(KvsError::new(
            ErrorCode::ValidationFailed,
            format!(
                "{}: stored checksum {:#010x}, computed {:#010x}",
                json_file.display(),
                stored_hash,
                computed
            ),
        ));
    }

    debug!(target: "kvs::open", path = %json_file.display(), "JSON data has valid hash");
    Ok(())
}
