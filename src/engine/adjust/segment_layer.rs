use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use roaring::RoaringBitmap;
use tracing::debug;

use crate::engine::adjust::{
    AdjustmentSet, ColumnKind, FieldAdjustment, SortedSetSource, SynthesisOptions,
    SynthesizedBinaryColumn, SynthesizedNumericColumn, SynthesizedSortedColumn, build_presence,
};
use crate::engine::errors::{ColumnError, StoreError};
use crate::engine::store::{
    BinaryColumn, NumericColumn, SegmentId, SegmentReader, SortedColumn, SortedSetColumn,
};
use crate::engine::types::{DocValuesKind, FieldMeta, FieldValue, StoredRow};

/// Lazily built structures for one adjusted field. Each cell is filled at most
/// once; concurrent callers block on the first builder, and a failed build
/// leaves the cell empty for the next caller.
#[derive(Default)]
struct FieldCache {
    presence: OnceCell<Arc<RoaringBitmap>>,
    numeric: OnceCell<Arc<SynthesizedNumericColumn>>,
    binary: OnceCell<Arc<SynthesizedBinaryColumn>>,
    sorted: OnceCell<Arc<SynthesizedSortedColumn>>,
    sorted_set: OnceCell<Arc<SortedSetSource>>,
}

/// Where a column request for one field goes.
enum Route<'a> {
    /// Not adjusted: ask the wrapped segment.
    Forward,
    /// Adjusted to no column, or to a different kind.
    Suppress,
    Adjusted(&'a FieldAdjustment),
}

/// A segment seen through a set of field adjustments.
///
/// Fields without an adjustment are forwarded untouched. For adjusted fields a
/// native column of the adjusted kind always wins; otherwise the column is
/// synthesized from stored values and cached for the life of this segment.
pub struct AdjustedSegment {
    inner: Arc<dyn SegmentReader>,
    adjustments: Arc<AdjustmentSet>,
    options: SynthesisOptions,
    native_kinds: HashMap<String, DocValuesKind>,
    caches: HashMap<String, FieldCache>,
}

impl AdjustedSegment {
    pub fn new(
        inner: Arc<dyn SegmentReader>,
        adjustments: Arc<AdjustmentSet>,
        options: SynthesisOptions,
    ) -> Self {
        let native_kinds = inner
            .field_metas()
            .into_iter()
            .map(|m| (m.name, m.doc_values))
            .collect();
        let caches = adjustments
            .iter()
            .filter(|a| a.kind().has_column())
            .map(|a| (a.name().to_string(), FieldCache::default()))
            .collect();
        debug!(
            target: "dv_enabler::segment",
            segment = %inner.segment_id(),
            adjustments = adjustments.len(),
            "Wrapped segment"
        );
        Self {
            inner,
            adjustments,
            options,
            native_kinds,
            caches,
        }
    }

    pub fn inner(&self) -> &Arc<dyn SegmentReader> {
        &self.inner
    }

    fn has_native(&self, field: &str, kind: DocValuesKind) -> bool {
        self.native_kinds.get(field) == Some(&kind)
    }

    fn cache(&self, field: &str) -> Option<&FieldCache> {
        self.caches.get(field)
    }

    fn route(&self, field: &str, kind: DocValuesKind) -> Route<'_> {
        match self.adjustments.get(field) {
            None => Route::Forward,
            Some(adj) if adj.kind().doc_values() == kind => Route::Adjusted(adj),
            Some(adj) => {
                debug!(
                    target: "dv_enabler::segment",
                    field,
                    adjusted = %adj.kind(),
                    requested = %kind,
                    "No column of the requested kind"
                );
                Route::Suppress
            }
        }
    }

    fn passed_through(&self, field: &str, kind: DocValuesKind) {
        debug!(
            target: "dv_enabler::segment",
            field,
            kind = %kind,
            segment = %self.inner.segment_id(),
            "Native column present, passing through"
        );
    }

    /// Presence bitmap built from stored values. Cached per field.
    pub fn presence(&self, field: &str) -> Result<Option<Arc<RoaringBitmap>>, ColumnError> {
        let Some(cache) = self.cache(field) else {
            return Ok(None);
        };
        let bitmap = cache
            .presence
            .get_or_try_init(|| build_presence(self.inner.as_ref(), field).map(Arc::new))?;
        Ok(Some(Arc::clone(bitmap)))
    }

    /// Whether a synthesized structure for `field` has already been built.
    pub fn is_synthesized(&self, field: &str) -> bool {
        self.cache(field).is_some_and(|c| {
            c.numeric.get().is_some()
                || c.binary.get().is_some()
                || c.sorted.get().is_some()
                || c.sorted_set.get().is_some()
        })
    }
}

impl SegmentReader for AdjustedSegment {
    fn segment_id(&self) -> SegmentId {
        self.inner.segment_id()
    }

    fn doc_count(&self) -> u32 {
        self.inner.doc_count()
    }

    fn field_metas(&self) -> Vec<FieldMeta> {
        self.inner
            .field_metas()
            .into_iter()
            .map(|meta| match self.adjustments.get(&meta.name) {
                Some(adj) => adj.adjusted_meta(&meta),
                None => meta,
            })
            .collect()
    }

    fn stored_values(&self, doc: u32, field: &str) -> Result<Vec<FieldValue>, StoreError> {
        self.inner.stored_values(doc, field)
    }

    fn stored_value(&self, doc: u32, field: &str) -> Result<Option<FieldValue>, StoreError> {
        self.inner.stored_value(doc, field)
    }

    fn document(&self, doc: u32) -> Result<StoredRow, StoreError> {
        self.inner.document(doc)
    }

    fn numeric_column(&self, field: &str) -> Result<Option<Arc<dyn NumericColumn>>, ColumnError> {
        let adj = match self.route(field, DocValuesKind::Numeric) {
            Route::Forward => return self.inner.numeric_column(field),
            Route::Suppress => return Ok(None),
            Route::Adjusted(adj) => adj,
        };
        if self.has_native(field, DocValuesKind::Numeric) {
            if let Some(native) = self.inner.numeric_column(field)? {
                self.passed_through(field, DocValuesKind::Numeric);
                return Ok(Some(native));
            }
        }
        let (Some(cache), ColumnKind::Numeric(subtype)) = (self.cache(field), adj.kind()) else {
            return Ok(None);
        };
        let column = cache.numeric.get_or_init(|| {
            Arc::new(SynthesizedNumericColumn::new(
                Arc::clone(&self.inner),
                field,
                subtype,
                self.options.float32_encoding,
                self.options.progress_every_min,
            ))
        });
        Ok(Some(Arc::clone(column) as Arc<dyn NumericColumn>))
    }

    fn binary_column(&self, field: &str) -> Result<Option<Arc<dyn BinaryColumn>>, ColumnError> {
        match self.route(field, DocValuesKind::Binary) {
            Route::Forward => return self.inner.binary_column(field),
            Route::Suppress => return Ok(None),
            Route::Adjusted(_) => {}
        }
        if self.has_native(field, DocValuesKind::Binary) {
            if let Some(native) = self.inner.binary_column(field)? {
                self.passed_through(field, DocValuesKind::Binary);
                return Ok(Some(native));
            }
        }
        let Some(cache) = self.cache(field) else {
            return Ok(None);
        };
        let column = cache.binary.get_or_init(|| {
            Arc::new(SynthesizedBinaryColumn::new(Arc::clone(&self.inner), field))
        });
        Ok(Some(Arc::clone(column) as Arc<dyn BinaryColumn>))
    }

    fn sorted_column(&self, field: &str) -> Result<Option<Arc<dyn SortedColumn>>, ColumnError> {
        match self.route(field, DocValuesKind::Sorted) {
            Route::Forward => return self.inner.sorted_column(field),
            Route::Suppress => return Ok(None),
            Route::Adjusted(_) => {}
        }
        if self.has_native(field, DocValuesKind::Sorted) {
            if let Some(native) = self.inner.sorted_column(field)? {
                self.passed_through(field, DocValuesKind::Sorted);
                return Ok(Some(native));
            }
        }
        let Some(cache) = self.cache(field) else {
            return Ok(None);
        };
        let column = cache.sorted.get_or_try_init(|| {
            SynthesizedSortedColumn::build(Arc::clone(&self.inner), field).map(Arc::new)
        })?;
        Ok(Some(Arc::clone(column) as Arc<dyn SortedColumn>))
    }

    fn sorted_set_column(
        &self,
        field: &str,
    ) -> Result<Option<Box<dyn SortedSetColumn>>, ColumnError> {
        match self.route(field, DocValuesKind::SortedSet) {
            Route::Forward => return self.inner.sorted_set_column(field),
            Route::Suppress => return Ok(None),
            Route::Adjusted(_) => {}
        }
        if self.has_native(field, DocValuesKind::SortedSet) {
            if let Some(native) = self.inner.sorted_set_column(field)? {
                self.passed_through(field, DocValuesKind::SortedSet);
                return Ok(Some(native));
            }
        }
        let Some(cache) = self.cache(field) else {
            return Ok(None);
        };
        let source = cache.sorted_set.get_or_try_init(|| {
            SortedSetSource::build(
                Arc::clone(&self.inner),
                field,
                self.options.progress_every_min,
            )
            .map(Arc::new)
        })?;
        Ok(Some(Box::new(source.cursor()) as Box<dyn SortedSetColumn>))
    }

    fn docs_with_field(&self, field: &str) -> Result<Option<Arc<RoaringBitmap>>, ColumnError> {
        let Some(adj) = self.adjustments.get(field) else {
            return self.inner.docs_with_field(field);
        };
        let kind = adj.kind().doc_values();
        if kind == DocValuesKind::None {
            return Ok(None);
        }
        if self.has_native(field, kind) {
            return self.inner.docs_with_field(field);
        }
        self.presence(field)
    }
}
