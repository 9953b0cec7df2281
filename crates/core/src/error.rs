//! Error types for the key-value store
//!
//! Every fallible operation returns [`KvsResult`]. An error carries a stable
//! numeric [`ErrorCode`] (the value exposed to binding layers) plus a
//! human-readable context string describing what failed.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::fmt;
use thiserror::Error;

/// Result type alias for store operations
pub type KvsResult<T> = std::result::Result<T, KvsError>;

/// Message returned for codes outside the known table
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error!";

/// Stable error codes
///
/// The numeric values are part of the external interface and never change.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Error that was not yet mapped
    UnmappedError = 0,
    /// File not found
    FileNotFound = 1,
    /// KVS file read error
    KvsFileReadError = 2,
    /// KVS hash file read error
    KvsHashFileReadError = 3,
    /// JSON parser error
    JsonParserError = 4,
    /// JSON generator error
    JsonGeneratorError = 5,
    /// Physical storage failure
    PhysicalStorageFailure = 6,
    /// Integrity corrupted
    IntegrityCorrupted = 7,
    /// Validation failed
    ValidationFailed = 8,
    /// Encryption failed
    EncryptionFailed = 9,
    /// Resource is busy
    ResourceBusy = 10,
    /// Out of storage space
    OutOfStorageSpace = 11,
    /// Quota exceeded
    QuotaExceeded = 12,
    /// Authentication failed
    AuthenticationFailed = 13,
    /// Key not found
    KeyNotFound = 14,
    /// Serialization failed
    SerializationFailed = 15,
    /// Invalid snapshot ID
    InvalidSnapshotId = 16,
    /// Conversion failed
    ConversionFailed = 17,
    /// Mutex failed
    MutexLockFailed = 18,
    /// Invalid key
    InvalidKey = 19,
}

impl ErrorCode {
    /// All codes, in numeric order
    pub const ALL: [ErrorCode; 20] = [
        ErrorCode::UnmappedError,
        ErrorCode::FileNotFound,
        ErrorCode::KvsFileReadError,
        ErrorCode::KvsHashFileReadError,
        ErrorCode::JsonParserError,
        ErrorCode::JsonGeneratorError,
        ErrorCode::PhysicalStorageFailure,
        ErrorCode::IntegrityCorrupted,
        ErrorCode::ValidationFailed,
        ErrorCode::EncryptionFailed,
        ErrorCode::ResourceBusy,
        ErrorCode::OutOfStorageSpace,
        ErrorCode::QuotaExceeded,
        ErrorCode::AuthenticationFailed,
        ErrorCode::KeyNotFound,
        ErrorCode::SerializationFailed,
        ErrorCode::InvalidSnapshotId,
        ErrorCode::ConversionFailed,
        ErrorCode::MutexLockFailed,
        ErrorCode::InvalidKey,
    ];

    /// Numeric value of this code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Map a raw numeric code back to an `ErrorCode`
    pub fn from_code(code: u32) -> Option<ErrorCode> {
        Self::ALL.get(code as usize).copied()
    }

    /// Fixed human-readable description
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::UnmappedError => "Error that was not yet mapped",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::KvsFileReadError => "KVS file read error",
            ErrorCode::KvsHashFileReadError => "KVS hash file read error",
            ErrorCode::JsonParserError => "JSON parser error",
            ErrorCode::JsonGeneratorError => "JSON generator error",
            ErrorCode::PhysicalStorageFailure => "Physical storage failure",
            ErrorCode::IntegrityCorrupted => "Integrity corrupted",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::EncryptionFailed => "Encryption failed",
            ErrorCode::ResourceBusy => "Resource is busy",
            ErrorCode::OutOfStorageSpace => "Out of storage space",
            ErrorCode::QuotaExceeded => "Quota exceeded",
            ErrorCode::AuthenticationFailed => "Authentication failed",
            ErrorCode::KeyNotFound => "Key not found",
            ErrorCode::SerializationFailed => "Serialization failed",
            ErrorCode::InvalidSnapshotId => "Invalid snapshot ID",
            ErrorCode::ConversionFailed => "Conversion failed",
            ErrorCode::MutexLockFailed => "Mutex failed",
            ErrorCode::InvalidKey => "Invalid key",
        }
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::UnmappedError
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Description for a raw numeric code; unknown codes never fail the lookup.
pub fn message_for_code(code: u32) -> &'static str {
    ErrorCode::from_code(code)
        .map(ErrorCode::message)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
}

/// Store error: a stable code plus context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {context}")]
pub struct KvsError {
    code: ErrorCode,
    context: String,
}

impl KvsError {
    /// Create an error with the given code and context
    pub fn new(code: ErrorCode, context: impl Into<String>) -> Self {
        KvsError {
            code,
            context: context.into(),
        }
    }

    /// The stable error code
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Context describing the failure (path, key, ...)
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Key absent from the relevant map
    pub fn key_not_found(key: &str) -> Self {
        KvsError::new(ErrorCode::KeyNotFound, format!("key '{}'", key))
    }

    /// Snapshot generation does not exist
    pub fn invalid_snapshot(id: usize) -> Self {
        KvsError::new(ErrorCode::InvalidSnapshotId, format!("snapshot {}", id))
    }

    /// JSON node could not be mapped into the value model
    pub fn conversion(reason: impl Into<String>) -> Self {
        KvsError::new(ErrorCode::ConversionFailed, reason)
    }
}

impl From<ErrorCode> for KvsError {
    fn from(code: ErrorCode) -> Self {
        KvsError::new(code, code.message())
    }
}
