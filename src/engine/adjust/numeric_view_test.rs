use crate::engine::adjust::{Float32Encoding, MISSING_NUMERIC, SynthesizedNumericColumn, encode_numeric};
use crate::engine::errors::ColumnError;
use crate::engine::store::NumericColumn;
use crate::engine::types::{Number, NumericSubtype};
use crate::logging::init_for_tests;
use crate::test_helpers::factory::Factory;

#[test]
fn long_and_int_encodings() {
    let enc = Float32Encoding::TruncatedInteger;
    assert_eq!(encode_numeric(NumericSubtype::Long, enc, Number::Long(-42)), -42);
    assert_eq!(encode_numeric(NumericSubtype::Long, enc, Number::Int(-7)), -7);
    // INT narrows without a range check, then sign-extends
    assert_eq!(
        encode_numeric(NumericSubtype::Int, enc, Number::Long((1i64 << 32) + 5)),
        5
    );
    assert_eq!(
        encode_numeric(NumericSubtype::Int, enc, Number::Long(0xFFFF_FFFF)),
        -1
    );
    assert_eq!(encode_numeric(NumericSubtype::Long, enc, Number::Double(3.9)), 3);
}

#[test]
fn double_encoding_is_the_raw_bit_pattern() {
    let enc = Float32Encoding::TruncatedInteger;
    assert_eq!(
        encode_numeric(NumericSubtype::Double, enc, Number::Double(2.5)),
        2.5f64.to_bits() as i64
    );
    assert_eq!(
        encode_numeric(NumericSubtype::Double, enc, Number::Double(-1.0)),
        (-1.0f64).to_bits() as i64
    );
    assert_eq!(
        encode_numeric(NumericSubtype::Double, enc, Number::Long(3)),
        3.0f64.to_bits() as i64
    );
}

#[test]
fn float_truncated_integer_drops_the_fraction() {
    let encoded = encode_numeric(
        NumericSubtype::Float,
        Float32Encoding::TruncatedInteger,
        Number::Double(2.75),
    );
    assert_eq!(encoded, 2.0f32.to_bits() as i64);
    assert_ne!(encoded, 2.75f32.to_bits() as i64);

    let negative = encode_numeric(
        NumericSubtype::Float,
        Float32Encoding::TruncatedInteger,
        Number::Float(-1.5),
    );
    // Sign bit set, so the 32-bit pattern sign-extends
    assert_eq!(negative, (-1.0f32).to_bits() as i32 as i64);
    assert!(negative < 0);
}

#[test]
fn float_single_precision_keeps_the_value() {
    assert_eq!(
        encode_numeric(
            NumericSubtype::Float,
            Float32Encoding::SinglePrecision,
            Number::Double(2.75)
        ),
        2.75f32.to_bits() as i64
    );
    assert_eq!(
        encode_numeric(
            NumericSubtype::Float,
            Float32Encoding::SinglePrecision,
            Number::Long(16)
        ),
        16.0f32.to_bits() as i64
    );
}

#[test]
fn column_reads_stored_values_and_returns_sentinel_when_missing() {
    init_for_tests();
    let temp = Factory::store()
        .with_segment(vec![
            Factory::document().with("n", 12i64).create(),
            Factory::document().create(),
            Factory::document().with("n", -1i64).create(),
        ])
        .create();
    let column = SynthesizedNumericColumn::new(
        temp.segment(0),
        "n",
        NumericSubtype::Long,
        Float32Encoding::TruncatedInteger,
        1000,
    );

    assert_eq!(column.value(0).unwrap(), 12);
    // Missing and a real -1 look the same; presence tells them apart
    assert_eq!(column.value(1).unwrap(), MISSING_NUMERIC);
    assert_eq!(column.value(2).unwrap(), -1);
}

#[test]
fn non_numeric_value_is_fatal() {
    let temp = Factory::store()
        .with_segment(vec![Factory::document().with("n", "twelve").create()])
        .create();
    let column = SynthesizedNumericColumn::new(
        temp.segment(0),
        "n",
        NumericSubtype::Int,
        Float32Encoding::TruncatedInteger,
        1000,
    );

    match column.value(0) {
        Err(ColumnError::NonNumeric { field, doc, value, .. }) => {
            assert_eq!(field, "n");
            assert_eq!(doc, 0);
            assert_eq!(value, "twelve");
        }
        other => panic!("expected NonNumeric, got {:?}", other),
    }
}
