use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::{TempDir, tempdir};

use crate::engine::store::{SegmentReader, Store, StoreReader, StoreWriter};
use crate::engine::types::Document;

/// A committed store in its own temp directory.
pub struct TempStore {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempStore {
    pub fn open(&self) -> Store {
        Store::open(&self.path).expect("open temp store")
    }

    /// Segment `index` of a fresh reader.
    pub fn segment(&self, index: usize) -> Arc<dyn SegmentReader> {
        self.open().segments().remove(index)
    }

    /// A path next to the store that does not exist yet.
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub struct StoreFactory {
    segments: Vec<Vec<Document>>,
}

impl StoreFactory {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Adds one segment holding `docs`.
    pub fn with_segment(mut self, docs: Vec<Document>) -> Self {
        self.segments.push(docs);
        self
    }

    pub fn create_at(self, path: &Path) -> PathBuf {
        let mut writer = StoreWriter::create(path).expect("create store");
        for docs in self.segments {
            for doc in docs {
                writer.add_document(doc);
            }
            writer.flush().expect("flush segment");
        }
        writer.commit().expect("commit store");
        writer.close().expect("close writer");
        path.to_path_buf()
    }

    pub fn create(self) -> TempStore {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = self.create_at(&dir.path().join("store"));
        TempStore { dir, path }
    }
}
