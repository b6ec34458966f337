use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{info, info_span};

use crate::engine::errors::ColumnError;
use crate::engine::store::SegmentReader;

/// Upper bound on distinct values of a single-valued column; ordinals are `i32`.
pub const MAX_SINGLE_VALUED_ORDINALS: usize = i32::MAX as usize;

/// Sorted, de-duplicated values of one field in one segment. A value's
/// position is its ordinal.
///
/// Every distinct value is held in memory, so high-cardinality fields with
/// large values are expensive to synthesize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    values: Vec<Vec<u8>>,
}

impl Dictionary {
    /// From the first stored value of every document.
    pub fn build_single(segment: &dyn SegmentReader, field: &str) -> Result<Self, ColumnError> {
        let dictionary = Self::build(segment, field, false)?;
        if dictionary.len() > MAX_SINGLE_VALUED_ORDINALS {
            return Err(ColumnError::TooManyValues {
                field: field.to_string(),
                segment: segment.segment_id(),
                count: dictionary.len(),
            });
        }
        Ok(dictionary)
    }

    /// From every stored value of every document.
    pub fn build_multi(segment: &dyn SegmentReader, field: &str) -> Result<Self, ColumnError> {
        Self::build(segment, field, true)
    }

    fn build(segment: &dyn SegmentReader, field: &str, multi_valued: bool) -> Result<Self, ColumnError> {
        let segment_id = segment.segment_id();
        let span = info_span!(
            target: "dv_enabler::dictionary",
            "build_dictionary",
            field,
            segment = %segment_id,
            multi_valued
        );
        let _enter = span.enter();
        let start = Instant::now();

        let mut distinct = BTreeSet::new();
        for doc in 0..segment.doc_count() {
            let read = if multi_valued {
                segment.stored_values(doc, field)
            } else {
                segment
                    .stored_value(doc, field)
                    .map(|v| v.into_iter().collect())
            };
            let values = read.map_err(|e| ColumnError::store(field, segment_id, Some(doc), e))?;
            for value in values {
                distinct.insert(value.canonical_bytes().into_owned());
            }
        }

        let values: Vec<Vec<u8>> = distinct.into_iter().collect();
        info!(
            target: "dv_enabler::dictionary",
            unique_values = values.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Finished building dictionary"
        );
        Ok(Self { values })
    }

    pub fn from_values<I: IntoIterator<Item = Vec<u8>>>(values: I) -> Self {
        let values: BTreeSet<Vec<u8>> = values.into_iter().collect();
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn ordinal_of(&self, value: &[u8]) -> Option<usize> {
        self.values.binary_search_by(|v| v.as_slice().cmp(value)).ok()
    }

    pub fn lookup(&self, ordinal: usize) -> Option<&[u8]> {
        self.values.get(ordinal).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Vec<u8>] {
        &self.values
    }
}
