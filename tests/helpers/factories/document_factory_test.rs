use crate::engine::types::DocValuesKind;
use crate::test_helpers::factory::Factory;

#[test]
fn test_document_factory() {
    let doc = Factory::document()
        .with("title", "alpha")
        .with_values("tags", vec!["a", "b"])
        .with_column_only("rank", 3i64, DocValuesKind::Numeric)
        .create();

    assert_eq!(doc.fields.len(), 4);
    assert_eq!(doc.values("tags").count(), 2);
    let rank = doc.fields.iter().find(|f| f.name == "rank").unwrap();
    assert!(!rank.stored);
    assert_eq!(rank.column, DocValuesKind::Numeric);
}
