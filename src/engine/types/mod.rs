mod document;
mod field_meta;
mod field_value;

#[cfg(test)]
mod field_value_test;

pub use document::{DocField, Document, StoredField, StoredRow};
pub use field_meta::{DocValuesKind, FieldMeta, NumericSubtype};
pub use field_value::{FieldValue, Number};
