use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Zero-padding width for segment directory names
pub const SEGMENT_ID_PAD: usize = 5;

/// Identifier of an immutable segment within one store.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct SegmentId {
    pub id: u32,
}

impl SegmentId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    #[inline]
    pub fn next(&self) -> Self {
        Self::new(self.id + 1)
    }

    /// Zero-padded directory name for on-disk layout.
    #[inline]
    pub fn dir_name(&self) -> String {
        format!("{:0width$}", self.id, width = SEGMENT_ID_PAD)
    }

    #[inline]
    pub fn join_dir(&self, base: &Path) -> PathBuf {
        base.join(self.dir_name())
    }
}

impl From<u32> for SegmentId {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl Display for SegmentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.dir_name())
    }
}
