use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error};

use crate::engine::store::SegmentId;

/// Errors raised by the store engine itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Corrupt store file {path}: {reason}")]
    CorruptFile { path: PathBuf, reason: String },

    #[error("No store found at {0}")]
    NotFound(PathBuf),

    #[error("Destination {0} already exists and is not empty")]
    NotEmpty(PathBuf),

    #[error("Store at {0} is locked by another writer")]
    Locked(PathBuf),

    #[error("Document {doc} out of range for segment {segment} with {doc_count} documents")]
    DocOutOfRange {
        segment: SegmentId,
        doc: u32,
        doc_count: u32,
    },

    #[error("Encoded record of {len} bytes exceeds the {max} byte record limit")]
    RecordTooLarge { len: usize, max: u32 },

    #[error("Field '{field}' cannot hold a {kind} column value: {reason}")]
    InvalidColumnValue {
        field: String,
        kind: String,
        reason: String,
    },

    #[error("Field '{field}' declares conflicting column kinds {first} and {second}")]
    ConflictingColumnKind {
        field: String,
        first: String,
        second: String,
    },
}

/// Configuration problems, detected before any store is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Field '{field}' has column kind NUMERIC but no numeric subtype")]
    NumericWithoutSubtype { field: String },

    #[error("Field '{field}' has a numeric subtype but column kind {kind}")]
    SubtypeWithoutNumeric { field: String, kind: String },

    #[error("Field '{0}' is adjusted more than once")]
    DuplicateField(String),

    #[error("Unknown column kind '{0}'")]
    UnknownKind(String),

    #[error("Unknown numeric subtype '{0}'")]
    UnknownSubtype(String),

    #[error("Invalid field spec '{spec}': {reason}")]
    InvalidFieldSpec { spec: String, reason: String },
}

/// Failures while answering a column query, native or synthesized.
#[derive(Debug, Error)]
pub enum ColumnError {
    #[error(
        "Ordinal for value '{value}' in doc {doc} of field '{field}' (segment {segment}) could not be located"
    )]
    OrdinalNotFound {
        field: String,
        segment: SegmentId,
        doc: u32,
        value: String,
    },

    #[error(
        "Non-numeric value '{value}' in doc {doc} of field '{field}' (segment {segment}); the field looks mis-specified as NUMERIC"
    )]
    NonNumeric {
        field: String,
        segment: SegmentId,
        doc: u32,
        value: String,
    },

    #[error("Ordinal {ordinal} out of range for field '{field}' with {value_count} values")]
    OrdinalOutOfRange {
        field: String,
        ordinal: u64,
        value_count: usize,
    },

    #[error("Field '{field}' in segment {segment} has {count} unique values, above the single-valued limit")]
    TooManyValues {
        field: String,
        segment: SegmentId,
        count: usize,
    },

    #[error("Store access failed for field '{field}' (segment {segment}, doc {doc:?}): {source}")]
    Store {
        field: String,
        segment: SegmentId,
        doc: Option<u32>,
        #[source]
        source: StoreError,
    },
}

impl ColumnError {
    pub fn store(field: &str, segment: SegmentId, doc: Option<u32>, source: StoreError) -> Self {
        ColumnError::Store {
            field: field.to_string(),
            segment,
            doc,
            source,
        }
    }
}

/// Bulk import into a writable store.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Column error: {0}")]
    Column(#[from] ColumnError),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unable to open source store {path}: {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("Unable to create destination store {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("Import into {path} failed: {source}")]
    Import {
        path: PathBuf,
        #[source]
        source: ImportError,
    },

    #[error("Commit or close failed: {0}")]
    Finish(#[from] StoreError),
}

impl ConvertError {
    pub fn log_error(&self) {
        match self {
            ConvertError::OpenSource { path, source } => {
                error!("Unable to open source store {}: {}", path.display(), source);
                debug!("Open source error details: {:?}", source);
            }
            ConvertError::CreateDestination { path, source } => {
                error!("Unable to create destination {}: {}", path.display(), source);
                debug!("Create destination error details: {:?}", source);
            }
            ConvertError::Import { path, source } => {
                error!("Import into {} failed: {}", path.display(), source);
                debug!("Import error details: {:?}", source);
            }
            ConvertError::Finish(e) => {
                error!("Commit or close failed: {}", e);
                debug!("Finish error details: {:?}", e);
            }
        }
    }
}
