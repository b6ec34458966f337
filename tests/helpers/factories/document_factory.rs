use crate::engine::types::{DocField, DocValuesKind, Document, FieldValue};

pub struct DocumentFactory {
    fields: Vec<DocField>,
}

impl DocumentFactory {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Stored and indexed, no native column.
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.push(DocField {
            name: name.to_string(),
            value: value.into(),
            stored: true,
            indexed: true,
            column: DocValuesKind::None,
        });
        self
    }

    /// Several stored values for one field.
    pub fn with_values<V: Into<FieldValue>>(mut self, name: &str, values: Vec<V>) -> Self {
        for value in values {
            self = self.with(name, value);
        }
        self
    }

    /// Stored value that is also written to a native column of `kind`.
    pub fn with_column(mut self, name: &str, value: impl Into<FieldValue>, kind: DocValuesKind) -> Self {
        self.fields.push(DocField {
            name: name.to_string(),
            value: value.into(),
            stored: true,
            indexed: true,
            column: kind,
        });
        self
    }

    /// Native column value without a stored copy.
    pub fn with_column_only(
        mut self,
        name: &str,
        value: impl Into<FieldValue>,
        kind: DocValuesKind,
    ) -> Self {
        self.fields.push(DocField {
            name: name.to_string(),
            value: value.into(),
            stored: false,
            indexed: false,
            column: kind,
        });
        self
    }

    pub fn create(self) -> Document {
        Document {
            fields: self.fields,
        }
    }
}
