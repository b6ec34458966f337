use crate::command::handlers::list;
use crate::engine::types::DocValuesKind;
use crate::test_helpers::factory::Factory;
use serde_json::Value;

fn listing_store() -> crate::test_helpers::factories::TempStore {
    Factory::store()
        .with_segment(vec![
            Factory::document()
                .with("title", "Dune")
                .with_column("year", 1965i64, DocValuesKind::Numeric)
                .create(),
        ])
        .with_segment(vec![
            Factory::document()
                .with("author", "Herbert")
                .with_column_only("tags", "scifi", DocValuesKind::SortedSet)
                .create(),
        ])
        .create()
}

fn run(path: &std::path::Path, verbose: bool, json: bool) -> String {
    let mut out = Vec::new();
    list::handle(path, verbose, json, &mut out).expect("list should succeed");
    String::from_utf8(out).unwrap()
}

#[test]
fn plain_listing_prints_one_line_per_field() {
    let store = listing_store();
    let output = run(&store.path, false, false);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[0],
        format!("Store at {} contains 4 fields", store.path.display())
    );
    assert_eq!(
        &lines[1..],
        &[
            "DVConfig(field=author, DV=No, NumericType=N/A)",
            "DVConfig(field=tags, DV=SORTED_SET, NumericType=N/A)",
            "DVConfig(field=title, DV=No, NumericType=N/A)",
            "DVConfig(field=year, DV=NUMERIC, NumericType=LONG)",
        ]
    );
}

#[test]
fn verbose_listing_shows_samples() {
    let store = listing_store();
    let output = run(&store.path, true, false);

    assert!(output.contains("DVConfig(field=title, DV=No, NumericType=N/A, firstIndexed='Dune')"));
    assert!(output.contains("DVConfig(field=year, DV=NUMERIC, NumericType=LONG, firstIndexed='1965')"));
    // Column-only values are not stored
    assert!(output.contains("DVConfig(field=tags, DV=SORTED_SET, NumericType=N/A, firstIndexed='null')"));
}

#[test]
fn json_listing_carries_flags() {
    let store = listing_store();
    let output = run(&store.path, false, true);
    let parsed: Value = serde_json::from_str(&output).unwrap();
    let entries = parsed.as_array().unwrap();

    assert_eq!(entries.len(), 4);
    let year = &entries[3];
    assert_eq!(year["name"], "year");
    assert_eq!(year["doc_values"], "NUMERIC");
    assert_eq!(year["numeric_type"], "LONG");
    assert_eq!(year["stored"], true);
    assert!(year.get("first_value").is_none());

    let tags = &entries[1];
    assert_eq!(tags["doc_values"], "SORTED_SET");
    assert_eq!(tags["numeric_type"], Value::Null);
    assert_eq!(tags["stored"], false);
}

#[test]
fn missing_store_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    let err = list::handle(&dir.path().join("nothing"), false, false, &mut out).unwrap_err();
    assert!(err.to_string().contains("Unable to access store folder"));
    assert!(out.is_empty());
}
