use std::sync::Arc;

use crate::engine::adjust::Dictionary;
use crate::engine::errors::ColumnError;
use crate::engine::store::{SegmentReader, SortedSetColumn};
use crate::shared::progress::ProgressTracker;

/// Shared, immutable part of a synthesized sorted-set column. Cursors are
/// cheap and carry the per-document state.
pub struct SortedSetSource {
    segment: Arc<dyn SegmentReader>,
    field: String,
    dictionary: Dictionary,
    progress: ProgressTracker,
}

impl SortedSetSource {
    pub fn build(
        segment: Arc<dyn SegmentReader>,
        field: &str,
        progress_every_min: u32,
    ) -> Result<Self, ColumnError> {
        let dictionary = Dictionary::build_multi(segment.as_ref(), field)?;
        let progress = ProgressTracker::new(field, segment.doc_count(), progress_every_min);
        Ok(Self {
            segment,
            field: field.to_string(),
            dictionary,
            progress,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn cursor(self: &Arc<Self>) -> SynthesizedSortedSetCursor {
        SynthesizedSortedSetCursor {
            source: Arc::clone(self),
            ordinals: Vec::new(),
            pos: 0,
        }
    }
}

/// Per-caller cursor; not shared between threads.
pub struct SynthesizedSortedSetCursor {
    source: Arc<SortedSetSource>,
    ordinals: Vec<u64>,
    pos: usize,
}

impl SortedSetColumn for SynthesizedSortedSetCursor {
    fn begin_document(&mut self, doc: u32) -> Result<(), ColumnError> {
        let source = &self.source;
        source.progress.ping(doc);
        self.ordinals.clear();
        self.pos = 0;

        let segment_id = source.segment.segment_id();
        let values = source
            .segment
            .stored_values(doc, &source.field)
            .map_err(|e| ColumnError::store(&source.field, segment_id, Some(doc), e))?;
        for value in values {
            let ord = source
                .dictionary
                .ordinal_of(&value.canonical_bytes())
                .ok_or_else(|| ColumnError::OrdinalNotFound {
                    field: source.field.clone(),
                    segment: segment_id,
                    doc,
                    value: value.to_string(),
                })?;
            self.ordinals.push(ord as u64);
        }
        self.ordinals.sort_unstable();
        self.ordinals.dedup();
        Ok(())
    }

    fn next_ordinal(&mut self) -> Option<u64> {
        let ord = self.ordinals.get(self.pos).copied()?;
        self.pos += 1;
        Some(ord)
    }

    fn lookup(&self, ordinal: u64) -> Result<&[u8], ColumnError> {
        self.source
            .dictionary
            .lookup(ordinal as usize)
            .ok_or_else(|| ColumnError::OrdinalOutOfRange {
                field: self.source.field.clone(),
                ordinal,
                value_count: self.source.dictionary.len(),
            })
    }

    fn value_count(&self) -> usize {
        self.source.dictionary.len()
    }
}
