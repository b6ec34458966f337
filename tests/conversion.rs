use std::sync::Arc;

use dv_enabler::engine::adjust::{
    AdjustedStore, AdjustmentSet, ColumnKind, FieldAdjustment, SynthesisOptions, describe_fields,
};
use dv_enabler::engine::convert::convert;
use dv_enabler::engine::store::{
    MISSING_ORDINAL, ReopenableStore, SegmentReader, Store, StoreReader, StoreWriter,
};
use dv_enabler::engine::types::{DocField, DocValuesKind, Document, FieldValue, NumericSubtype};
use tempfile::tempdir;

fn doc(fields: &[(&str, FieldValue)]) -> Document {
    let mut doc = Document::new();
    for (name, value) in fields {
        doc.add(DocField {
            name: name.to_string(),
            value: value.clone(),
            stored: true,
            indexed: true,
            column: DocValuesKind::None,
        });
    }
    doc
}

fn adjustments() -> AdjustmentSet {
    AdjustmentSet::from_adjustments(vec![
        FieldAdjustment::new("city", ColumnKind::Sorted),
        FieldAdjustment::new("population", ColumnKind::Numeric(NumericSubtype::Long)),
    ])
    .unwrap()
}

#[test]
fn adjusted_reader_follows_appends_and_converts() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("cities");

    let mut writer = StoreWriter::create(&source).unwrap();
    writer.add_document(doc(&[
        ("city", "Oslo".into()),
        ("population", 709_000i64.into()),
    ]));
    writer.add_document(doc(&[("city", "Bergen".into())]));
    writer.commit().unwrap();

    let store = AdjustedStore::new(
        Store::open(&source).unwrap(),
        adjustments(),
        SynthesisOptions::default(),
    );
    let first = store.segments()[0].clone();
    let city = first.sorted_column("city").unwrap().unwrap();
    assert_eq!(city.value_count(), 2);
    assert_eq!(city.lookup(city.ordinal(0).unwrap() as u32).unwrap(), b"Oslo");
    assert!(first.binary_column("city").unwrap().is_none());

    let population = first.numeric_column("population").unwrap().unwrap();
    assert_eq!(population.value(0).unwrap(), 709_000);
    let present = first.docs_with_field("population").unwrap().unwrap();
    assert_eq!(present.len(), 1);

    writer.add_document(doc(&[("city", "Tromsø".into())]));
    writer.add_document(doc(&[("country", "Norway".into())]));
    writer.commit().unwrap();
    writer.close().unwrap();

    let reopened = store.reopen().unwrap();
    let segments = reopened.segments();
    assert_eq!(segments.len(), 2);
    assert!(Arc::ptr_eq(&segments[0], &first));
    let late = segments[1].sorted_column("city").unwrap().unwrap();
    assert_eq!(late.ordinal(1).unwrap(), MISSING_ORDINAL);
    store.close().unwrap();

    let listing = describe_fields(&reopened, true).unwrap();
    let names: Vec<&str> = listing.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["city", "country", "population"]);
    assert_eq!(listing[0].kind(), ColumnKind::Sorted);
    reopened.close().unwrap();

    let dest = dir.path().join("converted");
    let report = convert(&source, &dest, adjustments(), SynthesisOptions::default()).unwrap();
    assert_eq!(report.documents, 4);
    assert_eq!(report.columns_of(DocValuesKind::Sorted), 2);
    assert_eq!(report.columns_of(DocValuesKind::Numeric), 1);

    let converted = Store::open(&dest).unwrap();
    let listing = describe_fields(&converted, false).unwrap();
    let kinds: Vec<String> = listing.iter().map(|f| f.to_string()).collect();
    assert_eq!(
        kinds,
        vec![
            "DVConfig(field=city, DV=SORTED, NumericType=N/A)",
            "DVConfig(field=country, DV=No, NumericType=N/A)",
            "DVConfig(field=population, DV=NUMERIC, NumericType=LONG)",
        ]
    );
    let tail = converted.segments()[1].sorted_column("city").unwrap().unwrap();
    assert_eq!(tail.lookup(0).unwrap(), "Tromsø".as_bytes());
}
