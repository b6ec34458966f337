use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use roaring::RoaringBitmap;

use crate::engine::errors::{ColumnError, StoreError};
use crate::engine::store::{
    BinaryColumn, NumericColumn, SegmentId, SegmentReader, SortedColumn, SortedSetColumn,
};
use crate::engine::types::{FieldMeta, FieldValue, StoredRow};

/// Forwards to a real segment and counts row reads, so tests can tell
/// whether a column was synthesized from stored values.
pub struct CountingSegment {
    inner: Arc<dyn SegmentReader>,
    row_reads: AtomicUsize,
    fail_reads: AtomicBool,
}

impl CountingSegment {
    pub fn new(inner: Arc<dyn SegmentReader>) -> Self {
        Self {
            inner,
            row_reads: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// While set, every stored value read fails with an I/O error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn row_reads(&self) -> usize {
        self.row_reads.load(Ordering::SeqCst)
    }

    fn count(&self) -> Result<(), StoreError> {
        self.row_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("injected read failure")));
        }
        Ok(())
    }
}

impl SegmentReader for CountingSegment {
    fn segment_id(&self) -> SegmentId {
        self.inner.segment_id()
    }

    fn doc_count(&self) -> u32 {
        self.inner.doc_count()
    }

    fn field_metas(&self) -> Vec<FieldMeta> {
        self.inner.field_metas()
    }

    fn stored_values(&self, doc: u32, field: &str) -> Result<Vec<FieldValue>, StoreError> {
        self.count()?;
        self.inner.stored_values(doc, field)
    }

    fn stored_value(&self, doc: u32, field: &str) -> Result<Option<FieldValue>, StoreError> {
        self.count()?;
        self.inner.stored_value(doc, field)
    }

    fn document(&self, doc: u32) -> Result<StoredRow, StoreError> {
        self.count()?;
        self.inner.document(doc)
    }

    fn numeric_column(&self, field: &str) -> Result<Option<Arc<dyn NumericColumn>>, ColumnError> {
        self.inner.numeric_column(field)
    }

    fn binary_column(&self, field: &str) -> Result<Option<Arc<dyn BinaryColumn>>, ColumnError> {
        self.inner.binary_column(field)
    }

    fn sorted_column(&self, field: &str) -> Result<Option<Arc<dyn SortedColumn>>, ColumnError> {
        self.inner.sorted_column(field)
    }

    fn sorted_set_column(
        &self,
        field: &str,
    ) -> Result<Option<Box<dyn SortedSetColumn>>, ColumnError> {
        self.inner.sorted_set_column(field)
    }

    fn docs_with_field(&self, field: &str) -> Result<Option<Arc<RoaringBitmap>>, ColumnError> {
        self.inner.docs_with_field(field)
    }
}
