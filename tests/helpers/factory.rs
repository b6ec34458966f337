pub use super::factories::{DocumentFactory, FieldAdjustmentFactory, StoreFactory};

pub struct Factory;

impl Factory {
    pub fn document() -> DocumentFactory {
        DocumentFactory::new()
    }

    pub fn store() -> StoreFactory {
        StoreFactory::new()
    }

    pub fn adjustment(name: &str) -> FieldAdjustmentFactory {
        FieldAdjustmentFactory::new(name)
    }
}
