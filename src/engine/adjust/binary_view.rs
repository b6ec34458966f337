use std::sync::Arc;

use crate::engine::errors::ColumnError;
use crate::engine::store::{BinaryColumn, SegmentReader};

/// Binary column answered with the canonical bytes of the first stored value.
pub struct SynthesizedBinaryColumn {
    segment: Arc<dyn SegmentReader>,
    field: String,
}

impl SynthesizedBinaryColumn {
    pub fn new(segment: Arc<dyn SegmentReader>, field: &str) -> Self {
        Self {
            segment,
            field: field.to_string(),
        }
    }
}

impl BinaryColumn for SynthesizedBinaryColumn {
    fn value(&self, doc: u32) -> Result<Option<Vec<u8>>, ColumnError> {
        let stored = self
            .segment
            .stored_value(doc, &self.field)
            .map_err(|e| ColumnError::store(&self.field, self.segment.segment_id(), Some(doc), e))?;
        Ok(stored.map(|v| v.canonical_bytes().into_owned()))
    }
}
