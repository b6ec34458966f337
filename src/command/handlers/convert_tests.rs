use crate::command::handlers::convert;
use crate::engine::adjust::SynthesisOptions;
use crate::engine::errors::ConfigError;
use crate::engine::store::{SegmentReader, Store, StoreReader};
use crate::engine::types::DocValuesKind;
use crate::test_helpers::factories::TempStore;
use crate::test_helpers::factory::Factory;

fn books() -> TempStore {
    Factory::store()
        .with_segment(vec![
            Factory::document().with("title", "Dune").with("year", 1965i64).create(),
            Factory::document().with("title", "Emma").with("year", 1815i64).create(),
        ])
        .create()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn converts_and_reports_each_adjustment() {
    let source = books();
    let dest = source.sibling("out");
    let mut out = Vec::new();

    let report = convert::handle(
        &source.path,
        &dest,
        &args(&["title(SORTED),year(NUMERIC)", "ghost(BINARY)"]),
        SynthesisOptions::default(),
        &mut out,
    )
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Adjusting DVConfig(field=title, DV=SORTED, NumericType=N/A)"));
    assert!(output.contains("Adjusting DVConfig(field=year, DV=NUMERIC, NumericType=LONG)"));
    assert!(!output.contains("ghost"));
    assert!(output.contains("Converted"));
    assert_eq!(report.adjustments, 2);
    assert_eq!(report.documents, 2);

    let converted = Store::open(&dest).unwrap();
    let segment = &converted.segments()[0];
    let year = segment.numeric_column("year").unwrap().unwrap();
    assert_eq!(year.value(1).unwrap(), 1815);
    let metas = segment.field_metas();
    assert_eq!(metas[0].doc_values, DocValuesKind::Sorted);
}

#[test]
fn invalid_spec_fails_before_any_store_is_touched() {
    let source = books();
    let dest = source.sibling("out");
    let mut out = Vec::new();

    let err = convert::handle(
        &source.path,
        &dest,
        &args(&["title(SORTED(INT))"]),
        SynthesisOptions::default(),
        &mut out,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::SubtypeWithoutNumeric { .. })
    ));
    assert!(!dest.exists());
    assert!(out.is_empty());
}

#[test]
fn dot_copies_without_adjustments() {
    let source = books();
    let dest = source.sibling("copy");
    let mut out = Vec::new();

    let report = convert::handle(&source.path, &dest, &args(&["."]), SynthesisOptions::default(), &mut out)
        .unwrap();

    assert_eq!(report.adjustments, 0);
    assert!(report.columns.is_empty());
    assert_eq!(Store::open(&dest).unwrap().doc_count(), 2);
}
