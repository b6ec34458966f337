use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::errors::{ColumnError, StoreError};
use crate::engine::store::native::{ColumnData, NativeColumn};
use crate::engine::store::record::{read_records_file, read_single, write_records_file, write_single};
use crate::engine::store::{
    BinaryColumn, NumericColumn, SegmentId, SegmentReader, SortedColumn, SortedSetColumn,
};
use crate::engine::types::{FieldMeta, FieldValue, StoredRow};
use crate::shared::storage_header::FileKind;

pub const SEGMENT_META_FILE: &str = "segment.bin";
pub const ROWS_FILE: &str = "rows.bin";

pub fn column_file_name(field_number: u32) -> String {
    format!("{}.dv", field_number)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMeta {
    pub id: SegmentId,
    pub doc_count: u32,
    pub fields: Vec<FieldMeta>,
}

/// Persists one complete segment directory. Segments are never modified
/// after this returns.
pub fn write_segment(
    store_dir: &Path,
    meta: &SegmentMeta,
    rows: &[StoredRow],
    columns: &[(u32, ColumnData)],
) -> Result<(), StoreError> {
    let dir = meta.id.join_dir(store_dir);
    fs::create_dir_all(&dir)?;
    write_records_file(&dir.join(ROWS_FILE), FileKind::SegmentRows, rows)?;
    for (number, data) in columns {
        write_single(&dir.join(column_file_name(*number)), FileKind::NativeColumn, data)?;
    }
    // Meta last: a segment directory without it is incomplete.
    write_single(&dir.join(SEGMENT_META_FILE), FileKind::SegmentMeta, meta)?;
    Ok(())
}

type LoadedColumn = (NativeColumn, Arc<RoaringBitmap>);

/// A segment of the file-backed store. Rows are loaded on open; native
/// columns are loaded on first access and kept for the reader's lifetime.
pub struct DiskSegment {
    dir: PathBuf,
    meta: SegmentMeta,
    rows: Vec<StoredRow>,
    columns: HashMap<String, (FieldMeta, OnceCell<LoadedColumn>)>,
}

impl DiskSegment {
    pub fn open(store_dir: &Path, id: SegmentId) -> Result<Self, StoreError> {
        let dir = id.join_dir(store_dir);
        let meta: SegmentMeta = read_single(&dir.join(SEGMENT_META_FILE), FileKind::SegmentMeta)?;
        if meta.id != id {
            return Err(StoreError::CorruptFile {
                path: dir.join(SEGMENT_META_FILE),
                reason: format!("segment id {} does not match directory {}", meta.id, id),
            });
        }
        let rows: Vec<StoredRow> = read_records_file(&dir.join(ROWS_FILE), FileKind::SegmentRows)?;
        if rows.len() != meta.doc_count as usize {
            return Err(StoreError::CorruptFile {
                path: dir.join(ROWS_FILE),
                reason: format!("expected {} rows, found {}", meta.doc_count, rows.len()),
            });
        }

        let columns = meta
            .fields
            .iter()
            .filter(|f| f.doc_values.has_column())
            .map(|f| (f.name.clone(), (f.clone(), OnceCell::new())))
            .collect();

        debug!(segment = %id, docs = meta.doc_count, "Opened segment");
        Ok(Self {
            dir,
            meta,
            rows,
            columns,
        })
    }

    pub fn meta(&self) -> &SegmentMeta {
        &self.meta
    }

    fn row(&self, doc: u32) -> Result<&StoredRow, StoreError> {
        self.rows
            .get(doc as usize)
            .ok_or(StoreError::DocOutOfRange {
                segment: self.meta.id,
                doc,
                doc_count: self.meta.doc_count,
            })
    }

    fn native(&self, field: &str) -> Result<Option<&LoadedColumn>, ColumnError> {
        let Some((meta, cell)) = self.columns.get(field) else {
            return Ok(None);
        };
        let loaded = cell.get_or_try_init(|| {
            let path = self.dir.join(column_file_name(meta.number));
            let data: ColumnData = read_single(&path, FileKind::NativeColumn)
                .map_err(|e| ColumnError::store(field, self.meta.id, None, e))?;
            if data.kind() != meta.doc_values {
                return Err(ColumnError::store(
                    field,
                    self.meta.id,
                    None,
                    StoreError::CorruptFile {
                        path,
                        reason: format!(
                            "column holds {} data but field declares {}",
                            data.kind(),
                            meta.doc_values
                        ),
                    },
                ));
            }
            Ok::<_, ColumnError>(NativeColumn::load(field, self.meta.id, data))
        })?;
        Ok(Some(loaded))
    }
}

impl SegmentReader for DiskSegment {
    fn segment_id(&self) -> SegmentId {
        self.meta.id
    }

    fn doc_count(&self) -> u32 {
        self.meta.doc_count
    }

    fn field_metas(&self) -> Vec<FieldMeta> {
        self.meta.fields.clone()
    }

    fn stored_values(&self, doc: u32, field: &str) -> Result<Vec<FieldValue>, StoreError> {
        Ok(self.row(doc)?.values(field))
    }

    fn stored_value(&self, doc: u32, field: &str) -> Result<Option<FieldValue>, StoreError> {
        Ok(self.row(doc)?.get(field).cloned())
    }

    fn document(&self, doc: u32) -> Result<StoredRow, StoreError> {
        self.row(doc).cloned()
    }

    fn numeric_column(&self, field: &str) -> Result<Option<Arc<dyn NumericColumn>>, ColumnError> {
        Ok(match self.native(field)? {
            Some((NativeColumn::Numeric(c), _)) => Some(c.clone() as Arc<dyn NumericColumn>),
            _ => None,
        })
    }

    fn binary_column(&self, field: &str) -> Result<Option<Arc<dyn BinaryColumn>>, ColumnError> {
        Ok(match self.native(field)? {
            Some((NativeColumn::Binary(c), _)) => Some(c.clone() as Arc<dyn BinaryColumn>),
            _ => None,
        })
    }

    fn sorted_column(&self, field: &str) -> Result<Option<Arc<dyn SortedColumn>>, ColumnError> {
        Ok(match self.native(field)? {
            Some((NativeColumn::Sorted(c), _)) => Some(c.clone() as Arc<dyn SortedColumn>),
            _ => None,
        })
    }

    fn sorted_set_column(
        &self,
        field: &str,
    ) -> Result<Option<Box<dyn SortedSetColumn>>, ColumnError> {
        Ok(match self.native(field)? {
            Some((NativeColumn::SortedSet(data), _)) => {
                Some(Box::new(data.cursor()) as Box<dyn SortedSetColumn>)
            }
            _ => None,
        })
    }

    fn docs_with_field(&self, field: &str) -> Result<Option<Arc<RoaringBitmap>>, ColumnError> {
        Ok(self.native(field)?.map(|(_, presence)| Arc::clone(presence)))
    }
}
