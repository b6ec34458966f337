pub mod adjust;
pub mod convert;
pub mod errors;
pub mod store;
pub mod types;

pub use errors::*;
