//! Value types for the key-value store
//!
//! This module defines:
//! - KvsValue: Closed, recursive enum for every storable value
//! - ValueType: Tag describing which variant a value holds
//! - KvsMap: The key → value mapping used for the current and default maps
//!
//! ## Value Model
//!
//! The KvsValue enum has exactly 6 variants, matching the JSON data model:
//! - Null, Boolean, Number, String, Array, Object
//!
//! ### Type Rules
//!
//! - Six types only; anything JSON can express maps onto one of them
//! - No implicit type coercions (`Number(1.0)` is never `Boolean(true)`)
//! - Number uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - Arrays and Objects own their children; the structure is always a tree

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from key to value, used for both the current and the default map.
pub type KvsMap = HashMap<String, KvsValue>;

/// A storable value.
///
/// Payloads are read through the tag-checked `as_*` accessors, which return
/// `None` when the requested payload does not match the variant.
///
/// Serializes untagged, so the serde form of a `KvsValue` is plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KvsValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Double-precision number
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Ordered sequence of values
    Array(Vec<KvsValue>),
    /// String-keyed mapping of values
    Object(HashMap<String, KvsValue>),
}

/// Variant tag of a [`KvsValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// [`KvsValue::Null`]
    Null,
    /// [`KvsValue::Boolean`]
    Boolean,
    /// [`KvsValue::Number`]
    Number,
    /// [`KvsValue::String`]
    String,
    /// [`KvsValue::Array`]
    Array,
    /// [`KvsValue::Object`]
    Object,
}

impl ValueType {
    /// Get the type name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "Null",
            ValueType::Boolean => "Boolean",
            ValueType::Number => "Number",
            ValueType::String => "String",
            ValueType::Array => "Array",
            ValueType::Object => "Object",
        }
    }
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for KvsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KvsValue::Null, KvsValue::Null) => true,
            (KvsValue::Boolean(a), KvsValue::Boolean(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (KvsValue::Number(a), KvsValue::Number(b)) => a == b,
            (KvsValue::String(a), KvsValue::String(b)) => a == b,
            (KvsValue::Array(a), KvsValue::Array(b)) => a == b,
            (KvsValue::Object(a), KvsValue::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

impl KvsValue {
    /// Get the variant tag
    pub fn value_type(&self) -> ValueType {
        match self {
            KvsValue::Null => ValueType::Null,
            KvsValue::Boolean(_) => ValueType::Boolean,
            KvsValue::Number(_) => ValueType::Number,
            KvsValue::String(_) => ValueType::String,
            KvsValue::Array(_) => ValueType::Array,
            KvsValue::Object(_) => ValueType::Object,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, KvsValue::Null)
    }

    /// Get as bool if this is a Boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            KvsValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as f64 if this is a Number value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            KvsValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KvsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[KvsValue] if this is an Array value
    pub fn as_array(&self) -> Option<&[KvsValue]> {
        match self {
            KvsValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &HashMap if this is an Object value
    pub fn as_object(&self) -> Option<&HashMap<String, KvsValue>> {
        match self {
            KvsValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Number of nodes in this value's tree, counting the value itself
    pub fn node_count(&self) -> usize {
        match self {
            KvsValue::Array(a) => 1 + a.iter().map(KvsValue::node_count).sum::<usize>(),
            KvsValue::Object(o) => 1 + o.values().map(KvsValue::node_count).sum::<usize>(),
            _ => 1,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for KvsValue {
    fn from(s: &str) -> Self {
        KvsValue::String(s.to_string())
    }
}

impl From<String> for KvsValue {
    fn from(s: String) -> Self {
        KvsValue::String(s)
    }
}

impl From<bool> for KvsValue {
    fn from(b: bool) -> Self {
        KvsValue::Boolean(b)
    }
}

impl From<f64> for KvsValue {
    fn from(n: f64) -> Self {
        KvsValue::Number(n)
    }
}

impl From<f32> for KvsValue {
    fn from(n: f32) -> Self {
        KvsValue::Number(n as f64)
    }
}

impl From<i32> for KvsValue {
    fn from(n: i32) -> Self {
        KvsValue::Number(n as f64)
    }
}

impl From<u32> for KvsValue {
    fn from(n: u32) -> Self {
        KvsValue::Number(n as f64)
    }
}

impl From<Vec<KvsValue>> for KvsValue {
    fn from(a: Vec<KvsValue>) -> Self {
        KvsValue::Array(a)
    }
}

impl From<HashMap<String, KvsValue>> for KvsValue {
    fn from(o: HashMap<String, KvsValue>) -> Self {
        KvsValue::Object(o)
    }
}

impl From<()> for KvsValue {
    fn from(_: ()) -> Self {
        KvsValue::Null
    }
}
