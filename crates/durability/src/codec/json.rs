//! JSON ↔ value conversion
//!
//! Parsing and generating JSON text is delegated to `serde_json`; this module
//! maps the parsed `serde_json::Value` tree onto [`KvsValue`] and back.
//!
//! Conversion is all-or-nothing: the first child that fails aborts the
//! whole container and no partially built value is returned.

use kvs_core::{ErrorCode, KvsError, KvsMap, KvsResult, KvsValue};
use serde_json::{Map, Number, Value as JsonNode};
use tracing::warn;

/// Convert a parsed JSON node into a value
///
/// # Errors
///
/// `ConversionFailed` if a number cannot be represented as `f64`.
pub fn from_json(node: &JsonNode) -> KvsResult<KvsValue> {
    match node {
        JsonNode::Null => Ok(KvsValue::Null),
        JsonNode::Bool(b) => Ok(KvsValue::Boolean(*b)),
        JsonNode::Number(n) => n
            .as_f64()
            .map(KvsValue::Number)
            .ok_or_else(|| KvsError::conversion(format!("number {} is not an f64", n))),
        JsonNode::String(s) => Ok(KvsValue::String(s.clone())),
        JsonNode::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<KvsResult<Vec<_>>>()
            .map(KvsValue::Array),
        JsonNode::Object(members) => members
            .iter()
            .map(|(k, v)| Ok((k.clone(), from_json(v)?)))
            .collect::<KvsResult<KvsMap>>()
            .map(KvsValue::Object),
    }
}

/// Convert a value into a JSON node
///
/// # Errors
///
/// `JsonGeneratorError` for NaN or infinite numbers, which JSON cannot express.
pub fn to_json(value: &KvsValue) -> KvsResult<JsonNode> {
    match value {
        KvsValue::Null => Ok(JsonNode::Null),
        KvsValue::Boolean(b) => Ok(JsonNode::Bool(*b)),
        KvsValue::Number(n) => Number::from_f64(*n).map(JsonNode::Number).ok_or_else(|| {
            KvsError::new(
                ErrorCode::JsonGeneratorError,
                format!("number {} has no JSON representation", n),
            )
        }),
        KvsValue::String(s) => Ok(JsonNode::String(s.clone())),
        KvsValue::Array(items) => items
            .iter()
            .map(to_json)
            .collect::<KvsResult<Vec<_>>>()
            .map(JsonNode::Array),
        KvsValue::Object(members) => map_to_json(members),
    }
}

/// Convert a parsed document root into a store map
///
/// A root that is not an object yields an empty map. Top-level keys become
/// store keys and must be non-empty.
pub fn map_from_json(root: &JsonNode) -> KvsResult<KvsMap> {
    let members = match root {
        JsonNode::Object(members) => members,
        other => {
            warn!(
                target: "kvs::codec",
                root_type = json_type_name(other),
                "JSON root is not an object, using empty map"
            );
            return Ok(KvsMap::new());
        }
    };

    members
        .iter()
        .map(|(k, v)| {
            if k.is_empty() {
                return Err(KvsError::conversion("empty key in JSON root object"));
            }
            Ok((k.clone(), from_json(v)?))
        })
        .collect()
}

/// Convert a store map into a JSON object node
pub fn map_to_json(map: &KvsMap) -> KvsResult<JsonNode> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
        .collect::<KvsResult<Map<String, JsonNode>>>()
        .map(JsonNode::Object)
}

/// Parse JSON text
///
/// # Errors
///
/// `JsonParserError` if the text is not valid JSON.
pub fn parse_json(bytes: &[u8]) -> KvsResult<JsonNode> {
    serde_json::from_slice(bytes)
        .map_err(|e| KvsError::new(ErrorCode::JsonParserError, e.to_string()))
}

/// Render a store map as JSON text
///
/// Object keys are emitted in sorted order, so equal maps render to equal bytes.
pub fn render_json(map: &KvsMap) -> KvsResult<Vec<u8>> {
    let root = map_to_json(map)?;
    serde_json::to_vec_pretty(&root)
        .map_err(|e| KvsError::new(ErrorCode::JsonGeneratorError, e.to_string()))
}

fn json_type_name(node: &JsonNode) -> &'static str {
    match node {
        JsonNode::Null => "null",
        JsonNode::Bool(_) => "bool",
        JsonNode::Number(_) => "number",
        JsonNode::String(_) => "string",
        JsonNode::Array(_) => "array",
        JsonNode::Object(_) => "object",
    }
}
