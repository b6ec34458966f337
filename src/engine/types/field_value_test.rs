use crate::engine::types::{FieldValue, Number};

#[test]
fn canonical_bytes_of_strings_are_utf8() {
    let v = FieldValue::from("plainstoreS");
    assert_eq!(v.canonical_bytes().as_ref(), b"plainstoreS");
}

#[test]
fn canonical_bytes_of_numbers_use_decimal_form() {
    assert_eq!(FieldValue::Long(87).canonical_bytes().as_ref(), b"87");
    assert_eq!(FieldValue::Double(12.13).canonical_bytes().as_ref(), b"12.13");
    assert_eq!(FieldValue::Int(-4).canonical_bytes().as_ref(), b"-4");
}

#[test]
fn canonical_bytes_of_binary_are_raw() {
    let v = FieldValue::Bytes(vec![0, 255, 7]);
    assert_eq!(v.canonical_bytes().as_ref(), &[0, 255, 7]);
}

#[test]
fn strings_are_not_numbers() {
    assert!(FieldValue::from("12").as_number().is_none());
    assert!(FieldValue::Bytes(vec![1]).as_number().is_none());
    assert_eq!(FieldValue::Long(5).as_number(), Some(Number::Long(5)));
}

#[test]
fn narrowing_wraps_integers_and_saturates_floats() {
    assert_eq!(Number::Long(0x1_0000_0005).as_i32(), 5);
    assert_eq!(Number::Long(-1).as_i32(), -1);
    assert_eq!(Number::Double(1e20).as_i32(), i32::MAX);
    assert_eq!(Number::Float(18.5).as_i64(), 18);
    assert_eq!(Number::Double(-2.9).as_i64(), -2);
}
