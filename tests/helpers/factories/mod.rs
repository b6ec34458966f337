pub mod counting_segment;
pub mod document_factory;
pub mod field_adjustment_factory;
pub mod store_factory;

pub use counting_segment::CountingSegment;
pub use document_factory::DocumentFactory;
pub use field_adjustment_factory::FieldAdjustmentFactory;
pub use store_factory::{StoreFactory, TempStore};

#[cfg(test)]
mod document_factory_test;
#[cfg(test)]
mod store_factory_test;
