use crate::engine::adjust::build_presence;
use crate::test_helpers::factories::CountingSegment;
use crate::test_helpers::factory::Factory;

#[test]
fn presence_marks_documents_with_a_stored_value() {
    let temp = Factory::store()
        .with_segment(vec![
            Factory::document().with("f", "a").create(),
            Factory::document().with("g", "b").create(),
            Factory::document().with("f", "").create(),
            Factory::document().with_values("f", vec!["x", "y"]).create(),
        ])
        .create();
    let segment = CountingSegment::new(temp.segment(0));

    let present = build_presence(&segment, "f").unwrap();

    assert_eq!(present.iter().collect::<Vec<_>>(), vec![0, 2, 3]);
    // One read of the field per document
    assert_eq!(segment.row_reads(), 4);
}

#[test]
fn presence_of_unknown_field_is_empty() {
    let temp = Factory::store()
        .with_segment(vec![Factory::document().with("f", "a").create()])
        .create();
    let present = build_presence(temp.segment(0).as_ref(), "missing").unwrap();
    assert!(present.is_empty());
}
