pub mod pipeline;
pub mod report;

pub use pipeline::convert;
pub use report::ConversionReport;
