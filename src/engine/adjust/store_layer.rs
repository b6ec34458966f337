use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::engine::adjust::{AdjustedSegment, AdjustmentSet, SynthesisOptions};
use crate::engine::errors::StoreError;
use crate::engine::store::{ReopenableStore, SegmentId, SegmentReader, StoreReader};

/// A whole store seen through one set of field adjustments.
///
/// Every segment gets its own [`AdjustedSegment`]; dictionaries and presence
/// bitmaps are never shared between segments. Owns the wrapped store and
/// closes it on [`StoreReader::close`].
pub struct AdjustedStore<S> {
    inner: S,
    adjustments: Arc<AdjustmentSet>,
    options: SynthesisOptions,
    segments: Vec<Arc<AdjustedSegment>>,
}

impl<S: StoreReader> AdjustedStore<S> {
    pub fn new(inner: S, adjustments: AdjustmentSet, options: SynthesisOptions) -> Self {
        let adjustments = Arc::new(adjustments);
        let segments = inner
            .segments()
            .into_iter()
            .map(|s| Arc::new(AdjustedSegment::new(s, Arc::clone(&adjustments), options)))
            .collect::<Vec<_>>();
        info!(
            target: "dv_enabler::store",
            store = %inner.location().display(),
            segments = segments.len(),
            adjustments = adjustments.len(),
            "Wrapped store"
        );
        Self {
            inner,
            adjustments,
            options,
            segments,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn adjustments(&self) -> &AdjustmentSet {
        &self.adjustments
    }

    pub fn adjusted_segments(&self) -> &[Arc<AdjustedSegment>] {
        &self.segments
    }
}

impl<S: StoreReader> StoreReader for AdjustedStore<S> {
    fn location(&self) -> &Path {
        self.inner.location()
    }

    fn segments(&self) -> Vec<Arc<dyn SegmentReader>> {
        self.segments
            .iter()
            .map(|s| Arc::clone(s) as Arc<dyn SegmentReader>)
            .collect()
    }

    fn close(self) -> Result<(), StoreError> {
        info!(
            target: "dv_enabler::store",
            store = %self.inner.location().display(),
            "Closing adjusted store"
        );
        drop(self.segments);
        self.inner.close()
    }
}

/// Segments whose id is unchanged keep their wrapper, and with it every
/// dictionary and presence bitmap built so far. Only new segments are wrapped.
impl<S: ReopenableStore> ReopenableStore for AdjustedStore<S> {
    fn reopen(&self) -> Result<Self, StoreError> {
        let inner = self.inner.reopen()?;
        let existing: HashMap<SegmentId, &Arc<AdjustedSegment>> = self
            .segments
            .iter()
            .map(|s| (s.segment_id(), s))
            .collect();

        let mut kept = 0usize;
        let segments = inner
            .segments()
            .into_iter()
            .map(|s| match existing.get(&s.segment_id()) {
                Some(adjusted) => {
                    kept += 1;
                    Arc::clone(adjusted)
                }
                None => Arc::new(AdjustedSegment::new(
                    s,
                    Arc::clone(&self.adjustments),
                    self.options,
                )),
            })
            .collect::<Vec<_>>();

        info!(
            target: "dv_enabler::store",
            store = %inner.location().display(),
            kept,
            wrapped = segments.len() - kept,
            "Reopened adjusted store"
        );
        Ok(Self {
            inner,
            adjustments: Arc::clone(&self.adjustments),
            options: self.options,
            segments,
        })
    }
}
