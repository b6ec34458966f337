use std::path::Path;
use std::sync::Arc;

use roaring::RoaringBitmap;

use crate::engine::errors::{ColumnError, StoreError};
use crate::engine::store::SegmentId;
use crate::engine::types::{FieldMeta, FieldValue, StoredRow};

/// Ordinal returned by [`SortedColumn::ordinal`] for documents without a value.
pub const MISSING_ORDINAL: i32 = -1;

/// One integer-encoded number per document.
pub trait NumericColumn: Send + Sync {
    fn value(&self, doc: u32) -> Result<i64, ColumnError>;
}

/// One opaque byte string per document.
pub trait BinaryColumn: Send + Sync {
    fn value(&self, doc: u32) -> Result<Option<Vec<u8>>, ColumnError>;
}

/// Single-valued, dictionary-encoded column.
pub trait SortedColumn: Send + Sync {
    /// Ordinal of the document's value, or [`MISSING_ORDINAL`].
    fn ordinal(&self, doc: u32) -> Result<i32, ColumnError>;
    fn lookup(&self, ordinal: u32) -> Result<&[u8], ColumnError>;
    fn value_count(&self) -> usize;
}

/// Multi-valued, dictionary-encoded column read through a per-document cursor.
///
/// A cursor carries mutable position state and belongs to one caller at a
/// time; ask the segment for another instance per thread or logical cursor.
pub trait SortedSetColumn: Send {
    /// Positions the cursor on `doc`; ordinals come out ascending and unique.
    fn begin_document(&mut self, doc: u32) -> Result<(), ColumnError>;
    /// Next ordinal of the current document, `None` once exhausted.
    fn next_ordinal(&mut self) -> Option<u64>;
    fn lookup(&self, ordinal: u64) -> Result<&[u8], ColumnError>;
    fn value_count(&self) -> usize;
}

/// Read access to one segment of a store.
///
/// Column accessors return `Ok(None)` when the segment exposes no column of
/// that kind for the field.
pub trait SegmentReader: Send + Sync {
    fn segment_id(&self) -> SegmentId;

    fn doc_count(&self) -> u32;

    /// Field metadata in the segment's own order.
    fn field_metas(&self) -> Vec<FieldMeta>;

    /// All stored values of `field` in `doc`, in store order.
    fn stored_values(&self, doc: u32, field: &str) -> Result<Vec<FieldValue>, StoreError>;

    fn stored_value(&self, doc: u32, field: &str) -> Result<Option<FieldValue>, StoreError> {
        Ok(self.stored_values(doc, field)?.into_iter().next())
    }

    /// The full stored row of `doc`.
    fn document(&self, doc: u32) -> Result<StoredRow, StoreError>;

    fn numeric_column(&self, field: &str) -> Result<Option<Arc<dyn NumericColumn>>, ColumnError>;

    fn binary_column(&self, field: &str) -> Result<Option<Arc<dyn BinaryColumn>>, ColumnError>;

    fn sorted_column(&self, field: &str) -> Result<Option<Arc<dyn SortedColumn>>, ColumnError>;

    /// A fresh cursor for every call.
    fn sorted_set_column(
        &self,
        field: &str,
    ) -> Result<Option<Box<dyn SortedSetColumn>>, ColumnError>;

    /// Documents holding a column value for `field`, if the segment tracks it.
    fn docs_with_field(&self, field: &str) -> Result<Option<Arc<RoaringBitmap>>, ColumnError>;
}

/// A readable, multi-segment store.
pub trait StoreReader {
    fn location(&self) -> &Path;

    fn segments(&self) -> Vec<Arc<dyn SegmentReader>>;

    fn doc_count(&self) -> u64 {
        self.segments().iter().map(|s| s.doc_count() as u64).sum()
    }

    /// Releases the store. Consuming `self` makes a second close impossible.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// Stores that can pick up segments committed after they were opened.
pub trait ReopenableStore: StoreReader + Sized {
    /// A reader over the latest committed state. Segments present in both
    /// readers are shared, not reopened.
    fn reopen(&self) -> Result<Self, StoreError>;
}
