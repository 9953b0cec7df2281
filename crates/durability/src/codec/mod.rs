//! Snapshot codec
//!
//! All snapshot and default files are JSON text. The codec parses that text
//! into the value model and renders the current map back on flush.

pub mod json;

pub use json::{from_json, map_from_json, map_to_json, parse_json, render_json, to_json};
