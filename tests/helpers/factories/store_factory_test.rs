use crate::engine::store::StoreReader;
use crate::test_helpers::factory::Factory;

#[test]
fn test_store_factory_writes_one_segment_per_call() {
    let temp = Factory::store()
        .with_segment(vec![Factory::document().with("f", "a").create()])
        .with_segment(vec![
            Factory::document().with("f", "b").create(),
            Factory::document().with("f", "c").create(),
        ])
        .create();

    let store = temp.open();
    let segments = store.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].doc_count(), 1);
    assert_eq!(segments[1].doc_count(), 2);
    assert_eq!(store.doc_count(), 3);
}
