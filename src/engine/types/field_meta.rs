use std::fmt;

use serde::{Deserialize, Serialize};

/// Column (doc values) kind as recorded in field metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocValuesKind {
    #[default]
    None,
    Numeric,
    Binary,
    Sorted,
    SortedSet,
}

impl DocValuesKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocValuesKind::None => "NONE",
            DocValuesKind::Numeric => "NUMERIC",
            DocValuesKind::Binary => "BINARY",
            DocValuesKind::Sorted => "SORTED",
            DocValuesKind::SortedSet => "SORTED_SET",
        }
    }

    /// Case-insensitive parse of the names produced by `as_str`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Some(DocValuesKind::None),
            "NUMERIC" => Some(DocValuesKind::Numeric),
            "BINARY" => Some(DocValuesKind::Binary),
            "SORTED" => Some(DocValuesKind::Sorted),
            "SORTED_SET" => Some(DocValuesKind::SortedSet),
            _ => None,
        }
    }

    #[inline]
    pub fn has_column(&self) -> bool {
        !matches!(self, DocValuesKind::None)
    }
}

impl fmt::Display for DocValuesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding applied to numeric values when a numeric column is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericSubtype {
    Int,
    Long,
    Float,
    Double,
}

impl NumericSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericSubtype::Int => "INT",
            NumericSubtype::Long => "LONG",
            NumericSubtype::Float => "FLOAT",
            NumericSubtype::Double => "DOUBLE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "INT" => Some(NumericSubtype::Int),
            "LONG" => Some(NumericSubtype::Long),
            "FLOAT" => Some(NumericSubtype::Float),
            "DOUBLE" => Some(NumericSubtype::Double),
            _ => None,
        }
    }
}

impl fmt::Display for NumericSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-segment field metadata. The adjustment layer rewrites `doc_values`
/// and passes every other flag through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub number: u32,
    pub indexed: bool,
    pub stored: bool,
    pub doc_values: DocValuesKind,
}

impl FieldMeta {
    pub fn new(name: &str, number: u32) -> Self {
        Self {
            name: name.to_string(),
            number,
            indexed: false,
            stored: false,
            doc_values: DocValuesKind::None,
        }
    }

    pub fn with_doc_values(&self, doc_values: DocValuesKind) -> Self {
        Self {
            doc_values,
            ..self.clone()
        }
    }
}
