use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored (row) value of one field in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Str(String),
    Bytes(Vec<u8>),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

/// Numeric view of a stored value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// Integer value; floating point values are truncated toward zero and saturate.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Int(v) => v as i64,
            Number::Long(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        }
    }

    /// Narrowed to 32 bits: integers wrap, floating point values saturate.
    #[inline]
    pub fn as_i32(&self) -> i32 {
        match *self {
            Number::Int(v) => v,
            Number::Long(v) => v as i32,
            Number::Float(v) => v as i32,
            Number::Double(v) => v as i32,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(v) => v as f64,
            Number::Long(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    #[inline]
    pub fn as_f32(&self) -> f32 {
        match *self {
            Number::Int(v) => v as f32,
            Number::Long(v) => v as f32,
            Number::Float(v) => v,
            Number::Double(v) => v as f32,
        }
    }
}

impl FieldValue {
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            FieldValue::Int(v) => Some(Number::Int(v)),
            FieldValue::Long(v) => Some(Number::Long(v)),
            FieldValue::Float(v) => Some(Number::Float(v)),
            FieldValue::Double(v) => Some(Number::Double(v)),
            FieldValue::Str(_) | FieldValue::Bytes(_) => None,
        }
    }

    /// Bytes used for dictionary ordering: UTF-8 for strings, the decimal
    /// string form for numbers, raw bytes for binary values.
    pub fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            FieldValue::Str(s) => Cow::Borrowed(s.as_bytes()),
            FieldValue::Bytes(b) => Cow::Borrowed(b.as_slice()),
            other => Cow::Owned(other.to_string().into_bytes()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Double(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Long(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value)
    }
}
