use std::sync::Arc;

use crate::engine::adjust::Dictionary;
use crate::engine::errors::ColumnError;
use crate::engine::store::{MISSING_ORDINAL, SegmentReader, SortedColumn};

/// Single-valued sorted column over a dictionary built up front.
pub struct SynthesizedSortedColumn {
    segment: Arc<dyn SegmentReader>,
    field: String,
    dictionary: Dictionary,
}

impl SynthesizedSortedColumn {
    pub fn build(segment: Arc<dyn SegmentReader>, field: &str) -> Result<Self, ColumnError> {
        let dictionary = Dictionary::build_single(segment.as_ref(), field)?;
        Ok(Self {
            segment,
            field: field.to_string(),
            dictionary,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl SortedColumn for SynthesizedSortedColumn {
    fn ordinal(&self, doc: u32) -> Result<i32, ColumnError> {
        let segment_id = self.segment.segment_id();
        let stored = self
            .segment
            .stored_value(doc, &self.field)
            .map_err(|e| ColumnError::store(&self.field, segment_id, Some(doc), e))?;
        let Some(value) = stored else {
            return Ok(MISSING_ORDINAL);
        };
        self.dictionary
            .ordinal_of(&value.canonical_bytes())
            .map(|ord| ord as i32)
            .ok_or_else(|| ColumnError::OrdinalNotFound {
                field: self.field.clone(),
                segment: segment_id,
                doc,
                value: value.to_string(),
            })
    }

    fn lookup(&self, ordinal: u32) -> Result<&[u8], ColumnError> {
        self.dictionary
            .lookup(ordinal as usize)
            .ok_or_else(|| ColumnError::OrdinalOutOfRange {
                field: self.field.clone(),
                ordinal: ordinal as u64,
                value_count: self.dictionary.len(),
            })
    }

    fn value_count(&self) -> usize {
        self.dictionary.len()
    }
}
