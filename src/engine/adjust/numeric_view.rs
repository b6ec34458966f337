use std::sync::Arc;

use tracing::warn;

use crate::engine::adjust::Float32Encoding;
use crate::engine::errors::ColumnError;
use crate::engine::store::{NumericColumn, SegmentReader};
use crate::engine::types::{Number, NumericSubtype};
use crate::shared::progress::ProgressTracker;

/// Returned for documents without a stored value. Indistinguishable from a
/// real -1; callers check presence first.
pub const MISSING_NUMERIC: i64 = -1;

/// Integer encoding of a number for a column of the given subtype.
pub fn encode_numeric(subtype: NumericSubtype, float32: Float32Encoding, number: Number) -> i64 {
    match subtype {
        NumericSubtype::Long => number.as_i64(),
        NumericSubtype::Int => number.as_i32() as i64,
        NumericSubtype::Double => number.as_f64().to_bits() as i64,
        NumericSubtype::Float => {
            let single = match float32 {
                Float32Encoding::TruncatedInteger => number.as_i64() as f32,
                Float32Encoding::SinglePrecision => number.as_f32(),
            };
            single.to_bits() as i32 as i64
        }
    }
}

/// Numeric column answered from stored values, one row read per call.
pub struct SynthesizedNumericColumn {
    segment: Arc<dyn SegmentReader>,
    field: String,
    subtype: NumericSubtype,
    float32: Float32Encoding,
    progress: ProgressTracker,
}

impl SynthesizedNumericColumn {
    pub fn new(
        segment: Arc<dyn SegmentReader>,
        field: &str,
        subtype: NumericSubtype,
        float32: Float32Encoding,
        progress_every_min: u32,
    ) -> Self {
        let progress = ProgressTracker::new(field, segment.doc_count(), progress_every_min);
        Self {
            segment,
            field: field.to_string(),
            subtype,
            float32,
            progress,
        }
    }

    pub fn subtype(&self) -> NumericSubtype {
        self.subtype
    }
}

impl NumericColumn for SynthesizedNumericColumn {
    fn value(&self, doc: u32) -> Result<i64, ColumnError> {
        self.progress.ping(doc);
        let segment_id = self.segment.segment_id();
        let stored = self
            .segment
            .stored_value(doc, &self.field)
            .map_err(|e| ColumnError::store(&self.field, segment_id, Some(doc), e))?;

        let Some(value) = stored else {
            warn!(
                target: "dv_enabler::numeric",
                field = %self.field,
                segment = %segment_id,
                doc,
                "No stored value, returning {}",
                MISSING_NUMERIC
            );
            return Ok(MISSING_NUMERIC);
        };

        let number = value.as_number().ok_or_else(|| ColumnError::NonNumeric {
            field: self.field.clone(),
            segment: segment_id,
            doc,
            value: value.to_string(),
        })?;
        Ok(encode_numeric(self.subtype, self.float32, number))
    }
}
