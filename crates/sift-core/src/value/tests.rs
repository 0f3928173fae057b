use crate::{
    types::{Date, Float64},
    value::{Value, canonical_cmp, strict_order_cmp},
};
use std::cmp::Ordering;

fn float(v: f64) -> Value {
    Value::Float(Float64::try_new(v).unwrap())
}

#[test]
fn canonical_cmp_is_total_for_mixed_variants() {
    let left = Value::Int(5);
    let right = Value::Text("x".to_string());

    assert_ne!(canonical_cmp(&left, &right), Ordering::Equal);
    assert_eq!(
        canonical_cmp(&left, &right),
        canonical_cmp(&right, &left).reverse()
    );
}

#[test]
fn null_ranks_below_everything() {
    for value in [
        Value::Bool(false),
        Value::Int(i64::MIN),
        float(-1.0e300),
        Value::Date(Date::MIN),
        Value::Text(String::new()),
        Value::List(vec![]),
    ] {
        assert_eq!(canonical_cmp(&Value::Null, &value), Ordering::Less);
    }

    assert_eq!(canonical_cmp(&Value::Null, &Value::Null), Ordering::Equal);
}

#[test]
fn lists_compare_lexicographically() {
    let short = Value::List(vec![Value::Int(1)]);
    let long = Value::List(vec![Value::Int(1), Value::Int(2)]);

    assert_eq!(canonical_cmp(&short, &long), Ordering::Less);
}

#[test]
fn strict_order_cmp_rejects_mixed_variants() {
    assert_eq!(strict_order_cmp(&Value::Int(1), &float(1.0)), None);
    assert_eq!(
        strict_order_cmp(&Value::Int(1), &Value::Int(2)),
        Some(Ordering::Less)
    );
}

#[test]
fn text_helpers_are_case_sensitive() {
    let haystack = Value::Text("Winter Palace".to_string());

    assert_eq!(
        haystack.text_contains(&Value::Text("Palace".to_string())),
        Some(true)
    );
    assert_eq!(
        haystack.text_contains(&Value::Text("palace".to_string())),
        Some(false)
    );
    assert_eq!(
        haystack.text_starts_with(&Value::Text("Winter".to_string())),
        Some(true)
    );
    assert_eq!(
        haystack.text_ends_with(&Value::Text("Palace".to_string())),
        Some(true)
    );
}

#[test]
fn text_helpers_reject_non_text() {
    assert_eq!(Value::Int(7).text_contains(&Value::Text("7".to_string())), None);
    assert_eq!(
        Value::Text("7".to_string()).text_contains(&Value::Int(7)),
        None
    );
}

#[test]
fn option_and_vec_conversions() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    assert_eq!(
        Value::from(vec!["a", "b"]),
        Value::List(vec![
            Value::Text("a".to_string()),
            Value::Text("b".to_string())
        ])
    );
}
