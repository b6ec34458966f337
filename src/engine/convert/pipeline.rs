use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument};

use crate::engine::adjust::{AdjustedStore, AdjustmentSet, SynthesisOptions};
use crate::engine::convert::ConversionReport;
use crate::engine::errors::ConvertError;
use crate::engine::store::{Store, StoreReader, StoreWriter};

/// Rewrites the store at `source` into a new store at `destination` where
/// every adjusted field carries its column natively.
///
/// Any failure aborts the conversion. A destination that was already
/// created is left as it is; nothing is rolled back.
#[instrument(skip(adjustments, options), fields(adjustments = adjustments.len()))]
pub fn convert(
    source: &Path,
    destination: &Path,
    adjustments: AdjustmentSet,
    options: SynthesisOptions,
) -> Result<ConversionReport, ConvertError> {
    let start = Instant::now();
    info!(
        target: "dv_enabler::convert",
        "Converting store at {} to {} with {} column adjustments",
        source.display(),
        destination.display(),
        adjustments.len()
    );
    let adjustment_count = adjustments.len();

    let store = Store::open(source).map_err(|e| ConvertError::OpenSource {
        path: source.to_path_buf(),
        source: e,
    })?;
    let adjusted = AdjustedStore::new(store, adjustments, options);

    let mut writer = StoreWriter::create(destination).map_err(|e| ConvertError::CreateDestination {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let stats = writer
        .add_store(&adjusted)
        .map_err(|e| ConvertError::Import {
            path: destination.to_path_buf(),
            source: e,
        })?;

    writer.commit()?;
    writer.close()?;
    adjusted.close()?;

    let report = ConversionReport::new(
        source.to_path_buf(),
        destination.to_path_buf(),
        adjustment_count,
        stats,
        start.elapsed().as_millis() as u64,
    );
    info!(
        target: "dv_enabler::convert",
        documents = report.documents,
        segments = report.segments,
        elapsed_ms = report.elapsed_ms,
        "Conversion finished"
    );
    Ok(report)
}
