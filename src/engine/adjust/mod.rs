pub mod binary_view;
pub mod dictionary;
pub mod field_adjustment;
pub mod listing;
pub mod numeric_view;
pub mod options;
pub mod presence;
pub mod segment_layer;
pub mod sorted_set_view;
pub mod sorted_view;
pub mod store_layer;

pub use binary_view::SynthesizedBinaryColumn;
pub use dictionary::{Dictionary, MAX_SINGLE_VALUED_ORDINALS};
pub use field_adjustment::{AdjustmentDisplay, AdjustmentSet, ColumnKind, FieldAdjustment};
pub use listing::describe_fields;
pub use numeric_view::{MISSING_NUMERIC, SynthesizedNumericColumn, encode_numeric};
pub use options::{Float32Encoding, SynthesisOptions};
pub use presence::build_presence;
pub use segment_layer::AdjustedSegment;
pub use sorted_set_view::{SortedSetSource, SynthesizedSortedSetCursor};
pub use sorted_view::SynthesizedSortedColumn;
pub use store_layer::AdjustedStore;

#[cfg(test)]
mod numeric_view_test;
#[cfg(test)]
mod presence_test;
