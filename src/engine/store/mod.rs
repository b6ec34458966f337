pub mod lock;
pub mod native;
pub mod record;
pub mod segment;
pub mod segment_id;
pub mod store;
pub mod traits;
pub mod writer;

pub use segment::{DiskSegment, SegmentMeta};
pub use segment_id::SegmentId;
pub use store::{Manifest, Store};
pub use traits::{
    BinaryColumn, MISSING_ORDINAL, NumericColumn, ReopenableStore, SegmentReader, SortedColumn,
    SortedSetColumn, StoreReader,
};
pub use writer::{ImportStats, StoreWriter};

#[cfg(test)]
mod record_test;
