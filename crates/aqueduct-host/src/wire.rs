//! Typed text values exchanged across the host boundary
//!
//! Every value travels as `<type> <value>`: `int 3`, `float 0.5`,
//! `string 68656c6c6f` (hex of the UTF-8 bytes) or `nil`. Results may also be
//! `array (v1, v2, …)`.

use std::fmt;

use aqueduct_net::codec::{decode_aligned, decode_utf8};

use crate::error::{HostObjectError, HostResult};

#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Nil,
    Int(i64),
    Float(f64),
    Str(String),
    /// Byte string that need not be UTF-8; formats like `Str`.
    Bytes(Vec<u8>),
    Array(Vec<WireValue>),
}

impl WireValue {
    /// Parse one `<type> <value>` pair.
    pub fn parse(kind: &str, value: &str) -> HostResult<Self> {
        match kind {
            "nil" | "null" => Ok(WireValue::Nil),
            "int" => value
                .parse()
                .map(WireValue::Int)
                .map_err(|_| invalid("int", value)),
            "float" => value
                .parse()
                .map(WireValue::Float)
                .map_err(|_| invalid("float", value)),
            "string" => {
                let mut bytes = decode_aligned(value)?;
                bytes.truncate(value.len() / 2);
                Ok(WireValue::Str(decode_utf8(&bytes)?))
            }
            other => Err(HostObjectError::UnknownType(other.to_string())),
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            WireValue::Float(f) => Some(f),
            WireValue::Int(i) => Some(i as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            WireValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Zero values are treated as absent by property lookups.
    pub fn is_zero(&self) -> bool {
        match self {
            WireValue::Nil => true,
            WireValue::Int(i) => *i == 0,
            WireValue::Float(f) => *f == 0.0,
            WireValue::Str(s) => s.is_empty(),
            WireValue::Bytes(b) => b.is_empty(),
            WireValue::Array(items) => items.is_empty(),
        }
    }
}

fn invalid(kind: &'static str, value: &str) -> HostObjectError {
    HostObjectError::InvalidValue {
        kind,
        value: value.to_string(),
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Nil => write!(f, "nil"),
            WireValue::Int(i) => write!(f, "int {i}"),
            WireValue::Float(x) => write!(f, "float {x}"),
            WireValue::Str(s) => write!(f, "string {}", hex::encode(s)),
            WireValue::Bytes(b) => write!(f, "string {}", hex::encode(b)),
            WireValue::Array(items) => {
                write!(f, "array (")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Split an invoke payload into values. The empty payload has no values.
pub fn parse_parameters(input: &str) -> HostResult<Vec<WireValue>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let fields: Vec<&str> = input.split(' ').collect();
    if fields.len() % 2 != 0 {
        return Err(HostObjectError::UnpairedFields);
    }
    fields
        .chunks_exact(2)
        .map(|pair| WireValue::parse(pair[0], pair[1]))
        .collect()
}
