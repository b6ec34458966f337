use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};

use crate::engine::errors::{ImportError, StoreError};
use crate::engine::store::lock::WriteLock;
use crate::engine::store::native::ColumnData;
use crate::engine::store::record::read_single;
use crate::engine::store::segment::{SEGMENT_META_FILE, SegmentMeta, write_segment};
use crate::engine::store::store::Manifest;
use crate::engine::store::{MISSING_ORDINAL, SegmentId, SegmentReader, StoreReader};
use crate::engine::types::{DocValuesKind, Document, FieldMeta, FieldValue, StoredField, StoredRow};
use crate::shared::storage_header::FileKind;

/// What a bulk import wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub segments: usize,
    pub documents: u64,
    pub columns: BTreeMap<DocValuesKind, usize>,
}

impl ImportStats {
    fn absorb(&mut self, docs: u32, columns: &[(u32, ColumnData)]) {
        self.segments += 1;
        self.documents += docs as u64;
        for (_, data) in columns {
            *self.columns.entry(data.kind()).or_insert(0) += 1;
        }
    }
}

/// Exclusive writer for a store directory. Nothing becomes visible to
/// readers until [`StoreWriter::commit`].
pub struct StoreWriter {
    location: PathBuf,
    manifest: Manifest,
    field_numbers: HashMap<String, u32>,
    pending: Vec<Document>,
    _lock: WriteLock,
}

impl StoreWriter {
    /// Creates a new, empty store. The directory must be absent or empty.
    pub fn create(location: &Path) -> Result<Self, StoreError> {
        if location.exists() {
            let occupied = !location.is_dir() || fs::read_dir(location)?.next().is_some();
            if occupied {
                return Err(StoreError::NotEmpty(location.to_path_buf()));
            }
        }
        fs::create_dir_all(location)?;
        let lock = WriteLock::acquire(location)?;
        info!(store = %location.display(), "Created store");
        Ok(Self {
            location: location.to_path_buf(),
            manifest: Manifest::default(),
            field_numbers: HashMap::new(),
            pending: Vec::new(),
            _lock: lock,
        })
    }

    /// Opens an existing store for appending segments.
    pub fn open(location: &Path) -> Result<Self, StoreError> {
        let lock = WriteLock::acquire(location)?;
        let manifest = Manifest::load(location)?;
        let mut field_numbers = HashMap::new();
        for id in &manifest.segments {
            let path = id.join_dir(location).join(SEGMENT_META_FILE);
            let meta: SegmentMeta = read_single(&path, FileKind::SegmentMeta)?;
            for field in meta.fields {
                field_numbers.entry(field.name).or_insert(field.number);
            }
        }
        Ok(Self {
            location: location.to_path_buf(),
            manifest,
            field_numbers,
            pending: Vec::new(),
            _lock: lock,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn add_document(&mut self, doc: Document) {
        self.pending.push(doc);
    }

    fn field_number(&mut self, name: &str) -> u32 {
        let next = self.field_numbers.len() as u32;
        *self.field_numbers.entry(name.to_string()).or_insert(next)
    }

    fn allocate_segment(&mut self) -> SegmentId {
        let id = self.manifest.next_segment;
        self.manifest.next_segment = id.next();
        id
    }

    /// Writes buffered documents as a new segment.
    pub fn flush(&mut self) -> Result<Option<SegmentId>, StoreError> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let docs = std::mem::take(&mut self.pending);

        let mut fields: Vec<FieldMeta> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for field in docs.iter().flat_map(|d| d.fields.iter()) {
            let pos = match positions.get(&field.name) {
                Some(pos) => *pos,
                None => {
                    let number = self.field_number(&field.name);
                    fields.push(FieldMeta::new(&field.name, number));
                    positions.insert(field.name.clone(), fields.len() - 1);
                    fields.len() - 1
                }
            };
            let meta = &mut fields[pos];
            meta.indexed |= field.indexed;
            meta.stored |= field.stored;
            if field.column.has_column() {
                if !meta.doc_values.has_column() {
                    meta.doc_values = field.column;
                } else if meta.doc_values != field.column {
                    return Err(StoreError::ConflictingColumnKind {
                        field: field.name.clone(),
                        first: meta.doc_values.to_string(),
                        second: field.column.to_string(),
                    });
                }
            }
        }

        let rows: Vec<StoredRow> = docs
            .iter()
            .map(|d| StoredRow {
                fields: d
                    .fields
                    .iter()
                    .filter(|f| f.stored)
                    .map(|f| StoredField {
                        name: f.name.clone(),
                        value: f.value.clone(),
                    })
                    .collect(),
            })
            .collect();

        let mut columns = Vec::new();
        for meta in fields.iter().filter(|f| f.doc_values.has_column()) {
            columns.push((meta.number, build_column(&docs, meta)?));
        }

        let id = self.allocate_segment();
        let meta = SegmentMeta {
            id,
            doc_count: docs.len() as u32,
            fields,
        };
        write_segment(&self.location, &meta, &rows, &columns)?;
        self.manifest.segments.push(id);
        debug!(segment = %id, docs = meta.doc_count, "Flushed segment");
        Ok(Some(id))
    }

    /// Copies every document of `source` into this store, one new segment per
    /// source segment, and materializes a native column for every field whose
    /// metadata declares one, reading values through the source's column
    /// accessors.
    pub fn add_store<S: StoreReader>(&mut self, source: &S) -> Result<ImportStats, ImportError> {
        self.flush()?;
        let span = info_span!("add_store", source = %source.location().display());
        let _enter = span.enter();

        let mut stats = ImportStats::default();
        for segment in source.segments() {
            self.import_segment(segment.as_ref(), &mut stats)?;
        }
        info!(
            segments = stats.segments,
            documents = stats.documents,
            "Imported store"
        );
        Ok(stats)
    }

    fn import_segment(
        &mut self,
        segment: &dyn SegmentReader,
        stats: &mut ImportStats,
    ) -> Result<(), ImportError> {
        let doc_count = segment.doc_count();
        let mut fields = segment.field_metas();
        for meta in fields.iter_mut() {
            meta.number = self.field_number(&meta.name);
        }

        let rows = (0..doc_count)
            .map(|doc| segment.document(doc))
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns = Vec::new();
        for meta in fields.iter_mut().filter(|f| f.doc_values.has_column()) {
            match copy_column(segment, meta)? {
                Some(data) => columns.push((meta.number, data)),
                None => {
                    debug!(
                        field = %meta.name,
                        kind = %meta.doc_values,
                        "Source exposes no column; writing field without one"
                    );
                    meta.doc_values = DocValuesKind::None;
                }
            }
        }

        let id = self.allocate_segment();
        let meta = SegmentMeta {
            id,
            doc_count,
            fields,
        };
        write_segment(&self.location, &meta, &rows, &columns)?;
        self.manifest.segments.push(id);
        stats.absorb(doc_count, &columns);
        debug!(
            source_segment = %segment.segment_id(),
            segment = %id,
            docs = doc_count,
            columns = columns.len(),
            "Imported segment"
        );
        Ok(())
    }

    /// Flushes and publishes the current segments. Returns the new generation.
    pub fn commit(&mut self) -> Result<u64, StoreError> {
        self.flush()?;
        self.manifest.generation += 1;
        self.manifest.commit(&self.location)?;
        info!(
            store = %self.location.display(),
            generation = self.manifest.generation,
            segments = self.manifest.segments.len(),
            "Committed store"
        );
        Ok(self.manifest.generation)
    }

    /// Releases the write lock. Uncommitted documents are dropped.
    pub fn close(self) -> Result<(), StoreError> {
        if !self.pending.is_empty() {
            warn!(
                store = %self.location.display(),
                docs = self.pending.len(),
                "Closing writer with uncommitted documents"
            );
        }
        Ok(())
    }
}

fn invalid(meta: &FieldMeta, reason: String) -> StoreError {
    StoreError::InvalidColumnValue {
        field: meta.name.clone(),
        kind: meta.doc_values.to_string(),
        reason,
    }
}

/// Native numeric encoding of a value written with a numeric column.
fn native_numeric(meta: &FieldMeta, value: &FieldValue) -> Result<i64, StoreError> {
    match *value {
        FieldValue::Int(v) => Ok(v as i64),
        FieldValue::Long(v) => Ok(v),
        FieldValue::Float(v) => Ok(v.to_bits() as i32 as i64),
        FieldValue::Double(v) => Ok(v.to_bits() as i64),
        FieldValue::Str(_) | FieldValue::Bytes(_) => {
            Err(invalid(meta, format!("'{}' is not numeric", value)))
        }
    }
}

pub(crate) fn dictionary_ordinal(meta: &FieldMeta, dictionary: &[Vec<u8>], value: &[u8]) -> Result<u64, StoreError> {
    dictionary
        .binary_search_by(|v| v.as_slice().cmp(value))
        .map(|ord| ord as u64)
        .map_err(|_| {
            invalid(
                meta,
                format!(
                    "value '{}' missing from the column dictionary",
                    String::from_utf8_lossy(value)
                ),
            )
        })
}

/// Builds a native column for freshly added documents.
fn build_column(docs: &[Document], meta: &FieldMeta) -> Result<ColumnData, StoreError> {
    let column_values = |doc: &Document| -> Vec<FieldValue> {
        doc.fields
            .iter()
            .filter(|f| f.name == meta.name && f.column == meta.doc_values)
            .map(|f| f.value.clone())
            .collect()
    };

    match meta.doc_values {
        DocValuesKind::None => Err(invalid(meta, "field has no column".to_string())),
        DocValuesKind::Numeric => {
            let mut values = vec![0i64; docs.len()];
            let mut present = Vec::new();
            for (doc, d) in docs.iter().enumerate() {
                if let Some(v) = column_values(d).first() {
                    values[doc] = native_numeric(meta, v)?;
                    present.push(doc as u32);
                }
            }
            Ok(ColumnData::Numeric { values, present })
        }
        DocValuesKind::Binary => Ok(ColumnData::Binary {
            values: docs
                .iter()
                .map(|d| column_values(d).first().map(|v| v.canonical_bytes().into_owned()))
                .collect(),
        }),
        DocValuesKind::Sorted => {
            let firsts: Vec<Option<Vec<u8>>> = docs
                .iter()
                .map(|d| column_values(d).first().map(|v| v.canonical_bytes().into_owned()))
                .collect();
            let dictionary: Vec<Vec<u8>> = firsts
                .iter()
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let ordinals = firsts
                .iter()
                .map(|v| match v {
                    Some(v) => dictionary_ordinal(meta, &dictionary, v).map(|ord| ord as i32),
                    None => Ok(MISSING_ORDINAL),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ColumnData::Sorted {
                dictionary,
                ordinals,
            })
        }
        DocValuesKind::SortedSet => {
            let per_doc: Vec<BTreeSet<Vec<u8>>> = docs
                .iter()
                .map(|d| {
                    column_values(d)
                        .iter()
                        .map(|v| v.canonical_bytes().into_owned())
                        .collect()
                })
                .collect();
            let dictionary: Vec<Vec<u8>> = per_doc
                .iter()
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let mut offsets = Vec::with_capacity(docs.len() + 1);
            let mut ordinals = Vec::new();
            offsets.push(0u32);
            for values in &per_doc {
                for value in values {
                    ordinals.push(dictionary_ordinal(meta, &dictionary, value)?);
                }
                offsets.push(ordinals.len() as u32);
            }
            Ok(ColumnData::SortedSet {
                dictionary,
                offsets,
                ordinals,
            })
        }
    }
}

/// Reads a whole column out of `segment` through its column accessors.
fn copy_column(segment: &dyn SegmentReader, meta: &FieldMeta) -> Result<Option<ColumnData>, ImportError> {
    let doc_count = segment.doc_count();
    let field = meta.name.as_str();
    let data = match meta.doc_values {
        DocValuesKind::None => None,
        DocValuesKind::Numeric => match segment.numeric_column(field)? {
            None => None,
            Some(column) => {
                let presence = segment.docs_with_field(field)?;
                let mut values = vec![0i64; doc_count as usize];
                let mut present = Vec::new();
                for doc in 0..doc_count {
                    if presence.as_ref().is_none_or(|p| p.contains(doc)) {
                        values[doc as usize] = column.value(doc)?;
                        present.push(doc);
                    }
                }
                Some(ColumnData::Numeric { values, present })
            }
        },
        DocValuesKind::Binary => match segment.binary_column(field)? {
            None => None,
            Some(column) => Some(ColumnData::Binary {
                values: (0..doc_count)
                    .map(|doc| column.value(doc))
                    .collect::<Result<Vec<_>, _>>()?,
            }),
        },
        DocValuesKind::Sorted => match segment.sorted_column(field)? {
            None => None,
            Some(column) => {
                let dictionary = (0..column.value_count() as u32)
                    .map(|ord| column.lookup(ord).map(|v| v.to_vec()))
                    .collect::<Result<Vec<_>, _>>()?;
                let ordinals = (0..doc_count)
                    .map(|doc| column.ordinal(doc))
                    .collect::<Result<Vec<_>, _>>()?;
                Some(ColumnData::Sorted {
                    dictionary,
                    ordinals,
                })
            }
        },
        DocValuesKind::SortedSet => match segment.sorted_set_column(field)? {
            None => None,
            Some(mut cursor) => {
                let dictionary = (0..cursor.value_count() as u64)
                    .map(|ord| cursor.lookup(ord).map(|v| v.to_vec()))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut offsets = Vec::with_capacity(doc_count as usize + 1);
                let mut ordinals = Vec::new();
                offsets.push(0u32);
                for doc in 0..doc_count {
                    cursor.begin_document(doc)?;
                    while let Some(ord) = cursor.next_ordinal() {
                        ordinals.push(ord);
                    }
                    offsets.push(ordinals.len() as u32);
                }
                Some(ColumnData::SortedSet {
                    dictionary,
                    offsets,
                    ordinals,
                })
            }
        },
    };
    Ok(data)
}
