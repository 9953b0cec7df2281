//! Key limits
//!
//! Keys are non-empty strings of at most [`MAX_KEY_SIZE`] bytes.
//! Violations result in `InvalidKey` errors.

use crate::error::{ErrorCode, KvsError, KvsResult};

/// Maximum key length in bytes
pub const MAX_KEY_SIZE: usize = 1024;

/// Validate a key
///
/// Returns `Ok(())` if the key is usable, or an `InvalidKey` error naming
/// the violated rule.
pub fn validate_key(key: &str) -> KvsResult<()> {
    if key.is_empty() {
        return Err(KvsError::new(ErrorCode::InvalidKey, "key is empty"));
    }
    if key.len() > MAX_KEY_SIZE {
        return Err(KvsError::new(
            ErrorCode::InvalidKey,
            format!("key length {} exceeds {} bytes", key.len(), MAX_KEY_SIZE),
        ));
    }
    Ok(())
}
