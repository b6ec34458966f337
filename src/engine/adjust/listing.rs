use std::collections::BTreeMap;

use crate::engine::adjust::FieldAdjustment;
use crate::engine::errors::StoreError;
use crate::engine::store::StoreReader;
use crate::engine::types::FieldMeta;

/// One entry per distinct field name across all segments, ordered by name.
///
/// The first segment declaring a field supplies its metadata, with the
/// indexed and stored flags merged over all segments. When `verbose`, the
/// first stored value found is attached as a sample.
pub fn describe_fields<S: StoreReader>(
    store: &S,
    verbose: bool,
) -> Result<Vec<FieldAdjustment>, StoreError> {
    let segments = store.segments();
    let mut metas: BTreeMap<String, FieldMeta> = BTreeMap::new();
    for segment in &segments {
        for meta in segment.field_metas() {
            metas
                .entry(meta.name.clone())
                .and_modify(|seen| {
                    seen.indexed |= meta.indexed;
                    seen.stored |= meta.stored;
                })
                .or_insert(meta);
        }
    }

    let mut listing = Vec::with_capacity(metas.len());
    for meta in metas.values() {
        let mut adjustment = FieldAdjustment::from_meta(meta);
        if verbose {
            if let Some(sample) = first_stored_value(store, &meta.name)? {
                adjustment = adjustment.with_sample_value(sample);
            }
        }
        listing.push(adjustment);
    }
    Ok(listing)
}

fn first_stored_value<S: StoreReader>(store: &S, field: &str) -> Result<Option<String>, StoreError> {
    for segment in store.segments() {
        for doc in 0..segment.doc_count() {
            if let Some(value) = segment.stored_value(doc, field)? {
                return Ok(Some(value.to_string()));
            }
        }
    }
    Ok(None)
}
