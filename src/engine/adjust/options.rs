use serde::{Deserialize, Serialize};

/// How a FLOAT numeric column is derived from a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Float32Encoding {
    /// The value is narrowed to a 64-bit integer, converted to `f32` and its
    /// bit pattern taken. Fractions are lost. Matches stores produced by
    /// earlier versions of this tool.
    #[default]
    TruncatedInteger,
    /// The value is converted to `f32` directly and its bit pattern taken.
    SinglePrecision,
}

/// Knobs handed to the adjustment layers at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    pub float32_encoding: Float32Encoding,
    pub progress_every_min: u32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            float32_encoding: Float32Encoding::default(),
            progress_every_min: 1000,
        }
    }
}

impl SynthesisOptions {
    pub fn with_float32_encoding(mut self, encoding: Float32Encoding) -> Self {
        self.float32_encoding = encoding;
        self
    }
}
