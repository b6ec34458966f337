use std::sync::Arc;

use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};

use crate::engine::errors::{ColumnError, StoreError};
use crate::engine::store::{
    BinaryColumn, MISSING_ORDINAL, NumericColumn, SegmentId, SortedColumn, SortedSetColumn,
};
use crate::engine::types::DocValuesKind;

/// Persisted form of one natively stored column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric {
        values: Vec<i64>,
        present: Vec<u32>,
    },
    Binary {
        values: Vec<Option<Vec<u8>>>,
    },
    Sorted {
        dictionary: Vec<Vec<u8>>,
        ordinals: Vec<i32>,
    },
    SortedSet {
        dictionary: Vec<Vec<u8>>,
        /// `offsets[doc]..offsets[doc + 1]` indexes `ordinals`
        offsets: Vec<u32>,
        ordinals: Vec<u64>,
    },
}

impl ColumnData {
    pub fn kind(&self) -> DocValuesKind {
        match self {
            ColumnData::Numeric { .. } => DocValuesKind::Numeric,
            ColumnData::Binary { .. } => DocValuesKind::Binary,
            ColumnData::Sorted { .. } => DocValuesKind::Sorted,
            ColumnData::SortedSet { .. } => DocValuesKind::SortedSet,
        }
    }

    fn presence(&self) -> RoaringBitmap {
        match self {
            ColumnData::Numeric { present, .. } => present.iter().copied().collect(),
            ColumnData::Binary { values } => values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_some())
                .map(|(doc, _)| doc as u32)
                .collect(),
            ColumnData::Sorted { ordinals, .. } => ordinals
                .iter()
                .enumerate()
                .filter(|(_, ord)| **ord != MISSING_ORDINAL)
                .map(|(doc, _)| doc as u32)
                .collect(),
            ColumnData::SortedSet { offsets, .. } => offsets
                .windows(2)
                .enumerate()
                .filter(|(_, w)| w[1] > w[0])
                .map(|(doc, _)| doc as u32)
                .collect(),
        }
    }
}

/// Column data loaded for one field of one segment, ready to hand out.
#[derive(Clone)]
pub enum NativeColumn {
    Numeric(Arc<StoredNumericColumn>),
    Binary(Arc<StoredBinaryColumn>),
    Sorted(Arc<StoredSortedColumn>),
    SortedSet(Arc<SortedSetData>),
}

impl NativeColumn {
    pub fn load(field: &str, segment: SegmentId, data: ColumnData) -> (Self, Arc<RoaringBitmap>) {
        let presence = Arc::new(data.presence());
        let ctx = ColumnContext {
            field: field.to_string(),
            segment,
        };
        let column = match data {
            ColumnData::Numeric { values, .. } => {
                NativeColumn::Numeric(Arc::new(StoredNumericColumn { ctx, values }))
            }
            ColumnData::Binary { values } => {
                NativeColumn::Binary(Arc::new(StoredBinaryColumn { ctx, values }))
            }
            ColumnData::Sorted {
                dictionary,
                ordinals,
            } => NativeColumn::Sorted(Arc::new(StoredSortedColumn {
                ctx,
                dictionary,
                ordinals,
            })),
            ColumnData::SortedSet {
                dictionary,
                offsets,
                ordinals,
            } => NativeColumn::SortedSet(Arc::new(SortedSetData {
                ctx,
                dictionary,
                offsets,
                ordinals,
            })),
        };
        (column, presence)
    }
}

#[derive(Debug)]
struct ColumnContext {
    field: String,
    segment: SegmentId,
}

impl ColumnContext {
    fn check_doc(&self, doc: u32, doc_count: usize) -> Result<usize, ColumnError> {
        if (doc as usize) < doc_count {
            Ok(doc as usize)
        } else {
            Err(ColumnError::store(
                &self.field,
                self.segment,
                Some(doc),
                StoreError::DocOutOfRange {
                    segment: self.segment,
                    doc,
                    doc_count: doc_count as u32,
                },
            ))
        }
    }

    fn lookup<'a>(&self, dictionary: &'a [Vec<u8>], ordinal: u64) -> Result<&'a [u8], ColumnError> {
        dictionary
            .get(ordinal as usize)
            .map(|v| v.as_slice())
            .ok_or_else(|| ColumnError::OrdinalOutOfRange {
                field: self.field.clone(),
                ordinal,
                value_count: dictionary.len(),
            })
    }
}

/// Missing documents read as 0; consult the presence bitmap to tell them apart.
#[derive(Debug)]
pub struct StoredNumericColumn {
    ctx: ColumnContext,
    values: Vec<i64>,
}

impl NumericColumn for StoredNumericColumn {
    fn value(&self, doc: u32) -> Result<i64, ColumnError> {
        let idx = self.ctx.check_doc(doc, self.values.len())?;
        Ok(self.values[idx])
    }
}

#[derive(Debug)]
pub struct StoredBinaryColumn {
    ctx: ColumnContext,
    values: Vec<Option<Vec<u8>>>,
}

impl BinaryColumn for StoredBinaryColumn {
    fn value(&self, doc: u32) -> Result<Option<Vec<u8>>, ColumnError> {
        let idx = self.ctx.check_doc(doc, self.values.len())?;
        Ok(self.values[idx].clone())
    }
}

#[derive(Debug)]
pub struct StoredSortedColumn {
    ctx: ColumnContext,
    dictionary: Vec<Vec<u8>>,
    ordinals: Vec<i32>,
}

impl SortedColumn for StoredSortedColumn {
    fn ordinal(&self, doc: u32) -> Result<i32, ColumnError> {
        let idx = self.ctx.check_doc(doc, self.ordinals.len())?;
        Ok(self.ordinals[idx])
    }

    fn lookup(&self, ordinal: u32) -> Result<&[u8], ColumnError> {
        self.ctx.lookup(&self.dictionary, ordinal as u64)
    }

    fn value_count(&self) -> usize {
        self.dictionary.len()
    }
}

#[derive(Debug)]
pub struct SortedSetData {
    ctx: ColumnContext,
    dictionary: Vec<Vec<u8>>,
    offsets: Vec<u32>,
    ordinals: Vec<u64>,
}

impl SortedSetData {
    pub fn cursor(self: &Arc<Self>) -> StoredSortedSetCursor {
        StoredSortedSetCursor {
            data: Arc::clone(self),
            pos: 0,
            end: 0,
        }
    }
}

pub struct StoredSortedSetCursor {
    data: Arc<SortedSetData>,
    pos: usize,
    end: usize,
}

impl SortedSetColumn for StoredSortedSetCursor {
    fn begin_document(&mut self, doc: u32) -> Result<(), ColumnError> {
        let doc_count = self.data.offsets.len().saturating_sub(1);
        let idx = self.data.ctx.check_doc(doc, doc_count)?;
        self.pos = self.data.offsets[idx] as usize;
        self.end = self.data.offsets[idx + 1] as usize;
        Ok(())
    }

    fn next_ordinal(&mut self) -> Option<u64> {
        if self.pos < self.end {
            let ord = self.data.ordinals[self.pos];
            self.pos += 1;
            Some(ord)
        } else {
            None
        }
    }

    fn lookup(&self, ordinal: u64) -> Result<&[u8], ColumnError> {
        self.data.ctx.lookup(&self.data.dictionary, ordinal)
    }

    fn value_count(&self) -> usize {
        self.data.dictionary.len()
    }
}
