use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::errors::StoreError;
use crate::engine::store::record::{read_single, write_single};
use crate::engine::store::segment::DiskSegment;
use crate::engine::store::{ReopenableStore, SegmentId, SegmentReader, StoreReader};
use crate::shared::storage_header::FileKind;

pub const MANIFEST_FILE: &str = "store.bin";

/// The committed state of a store: which segments are live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generation: u64,
    pub segments: Vec<SegmentId>,
    pub next_segment: SegmentId,
}

impl Manifest {
    pub fn path(store_dir: &Path) -> PathBuf {
        store_dir.join(MANIFEST_FILE)
    }

    pub fn load(store_dir: &Path) -> Result<Self, StoreError> {
        let path = Self::path(store_dir);
        if !path.is_file() {
            return Err(StoreError::NotFound(store_dir.to_path_buf()));
        }
        read_single(&path, FileKind::StoreManifest)
    }

    /// Atomically replaces the manifest.
    pub fn commit(&self, store_dir: &Path) -> Result<(), StoreError> {
        write_single(&Self::path(store_dir), FileKind::StoreManifest, self)
    }
}

/// Read-only view of a committed store.
pub struct Store {
    location: PathBuf,
    manifest: Manifest,
    segments: Vec<Arc<DiskSegment>>,
}

impl Store {
    pub fn open(location: &Path) -> Result<Self, StoreError> {
        if !location.is_dir() {
            return Err(StoreError::NotFound(location.to_path_buf()));
        }
        let manifest = Manifest::load(location)?;
        let segments = manifest
            .segments
            .iter()
            .map(|id| DiskSegment::open(location, *id).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            store = %location.display(),
            generation = manifest.generation,
            segments = segments.len(),
            "Opened store"
        );
        Ok(Self {
            location: location.to_path_buf(),
            manifest,
            segments,
        })
    }

    pub fn generation(&self) -> u64 {
        self.manifest.generation
    }

    pub fn disk_segments(&self) -> &[Arc<DiskSegment>] {
        &self.segments
    }
}

impl StoreReader for Store {
    fn location(&self) -> &Path {
        &self.location
    }

    fn segments(&self) -> Vec<Arc<dyn SegmentReader>> {
        self.segments
            .iter()
            .map(|s| Arc::clone(s) as Arc<dyn SegmentReader>)
            .collect()
    }

    fn close(self) -> Result<(), StoreError> {
        info!(store = %self.location.display(), "Closed store");
        Ok(())
    }
}

impl ReopenableStore for Store {
    fn reopen(&self) -> Result<Self, StoreError> {
        let manifest = Manifest::load(&self.location)?;
        if manifest.generation == self.manifest.generation {
            return Ok(Self {
                location: self.location.clone(),
                manifest,
                segments: self.segments.clone(),
            });
        }

        let open: HashMap<SegmentId, &Arc<DiskSegment>> = self
            .segments
            .iter()
            .map(|s| (s.meta().id, s))
            .collect();
        let mut reused = 0usize;
        let mut segments = Vec::with_capacity(manifest.segments.len());
        for id in &manifest.segments {
            match open.get(id) {
                Some(existing) => {
                    reused += 1;
                    segments.push(Arc::clone(existing));
                }
                None => segments.push(Arc::new(DiskSegment::open(&self.location, *id)?)),
            }
        }
        info!(
            store = %self.location.display(),
            generation = manifest.generation,
            reused,
            opened = segments.len() - reused,
            "Reopened store"
        );
        Ok(Self {
            location: self.location.clone(),
            manifest,
            segments,
        })
    }
}
