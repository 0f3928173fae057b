use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used by the sort compiler.
///
/// Ordering rules:
/// 1. Canonical variant rank (Null ranks below every non-null value)
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-variant comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Strict comparator for identical orderable variants.
///
/// Returns `None` for mismatched or non-orderable variants.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) => 2,
        Value::Float(_) => 3,
        Value::Date(_) => 4,
        Value::Text(_) => 5,
        Value::List(_) => 6,
        Value::Map(_) => 7,
    }
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        (Value::Map(a), Value::Map(b)) => canonical_cmp_map(a, b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => {
            // Distinct variants never share a rank.
            unreachable!("canonical rank collision")
        }
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = canonical_cmp(l, r);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len())
}

fn canonical_cmp_map(left: &[(String, Value)], right: &[(String, Value)]) -> Ordering {
    for ((lk, lv), (rk, rv)) in left.iter().zip(right.iter()) {
        let key = lk.cmp(rk);
        if key != Ordering::Equal {
            return key;
        }

        let value = canonical_cmp(lv, rv);
        if value != Ordering::Equal {
            return value;
        }
    }

    left.len().cmp(&right.len())
}
