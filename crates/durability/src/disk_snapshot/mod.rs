//! Snapshot file I/O
//!
//! - `reader`: Load and validate a JSON file (and its hash) into a store map
//! - `writer`: Crash-safe staging and committing of snapshot files

pub mod reader;
pub mod writer;

pub use reader::{open_json, NeedFile, VerifyHash};
pub use writer::{cleanup_temp_files, StagedFile};
