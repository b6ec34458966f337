use std::time::Instant;

use roaring::RoaringBitmap;
use tracing::{debug, info_span};

use crate::engine::errors::ColumnError;
use crate::engine::store::SegmentReader;

/// Documents of `segment` holding at least one stored value for `field`.
/// Reads only that field per document.
pub fn build_presence(segment: &dyn SegmentReader, field: &str) -> Result<RoaringBitmap, ColumnError> {
    let segment_id = segment.segment_id();
    let span = info_span!(
        target: "dv_enabler::presence",
        "build_presence",
        field,
        segment = %segment_id
    );
    let _enter = span.enter();
    let start = Instant::now();

    let mut present = RoaringBitmap::new();
    for doc in 0..segment.doc_count() {
        let value = segment
            .stored_value(doc, field)
            .map_err(|e| ColumnError::store(field, segment_id, Some(doc), e))?;
        if value.is_some() {
            present.insert(doc);
        }
    }

    debug!(
        target: "dv_enabler::presence",
        present = present.len(),
        docs = segment.doc_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Resolved documents with field"
    );
    Ok(present)
}
