use crate::engine::adjust::{ColumnKind, FieldAdjustment};
use crate::engine::types::{FieldMeta, NumericSubtype};

pub struct FieldAdjustmentFactory {
    name: String,
    kind: ColumnKind,
    original: Option<FieldMeta>,
}

impl FieldAdjustmentFactory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Sorted,
            original: None,
        }
    }

    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn numeric(self, subtype: NumericSubtype) -> Self {
        self.with_kind(ColumnKind::Numeric(subtype))
    }

    pub fn with_original(mut self, meta: FieldMeta) -> Self {
        self.original = Some(meta);
        self
    }

    pub fn create(self) -> FieldAdjustment {
        let adjustment = FieldAdjustment::new(self.name, self.kind);
        match self.original {
            Some(meta) => adjustment.with_original(meta),
            None => adjustment,
        }
    }
}
