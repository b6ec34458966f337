use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::engine::store::ImportStats;
use crate::engine::types::DocValuesKind;

/// Summary of one finished conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub adjustments: usize,
    pub segments: usize,
    pub documents: u64,
    pub columns: BTreeMap<DocValuesKind, usize>,
    pub elapsed_ms: u64,
}

impl ConversionReport {
    pub fn new(
        source: PathBuf,
        destination: PathBuf,
        adjustments: usize,
        stats: ImportStats,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            source,
            destination,
            adjustments,
            segments: stats.segments,
            documents: stats.documents,
            columns: stats.columns,
            elapsed_ms,
        }
    }

    pub fn columns_of(&self, kind: DocValuesKind) -> usize {
        self.columns.get(&kind).copied().unwrap_or(0)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted {} to {}: {} documents in {} segments with {} adjustments in {}ms",
            self.source.display(),
            self.destination.display(),
            self.documents,
            self.segments,
            self.adjustments,
            self.elapsed_ms
        )?;
        for (kind, count) in &self.columns {
            write!(f, "\n  {} columns: {}", kind, count)?;
        }
        Ok(())
    }
}
