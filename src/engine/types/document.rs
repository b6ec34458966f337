use serde::{Deserialize, Serialize};

use super::{DocValuesKind, FieldValue};

/// One field occurrence in a document handed to the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct DocField {
    pub name: String,
    pub value: FieldValue,
    pub stored: bool,
    pub indexed: bool,
    /// Native column to write for this occurrence, if any.
    pub column: DocValuesKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub fields: Vec<DocField>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: DocField) {
        self.fields.push(field);
    }

    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| &f.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredField {
    pub name: String,
    pub value: FieldValue,
}

/// The stored part of a document, as persisted in a segment's row file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRow {
    pub fields: Vec<StoredField>,
}

impl StoredRow {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn values(&self, name: &str) -> Vec<FieldValue> {
        self.fields
            .iter()
            .filter(|f| f.name == name)
            .map(|f| f.value.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
