//! Property-based tests for packet parsing and ordering.

use std::cmp::Ordering;

use handheld::packet::{compare, parse, Value};
use proptest::prelude::*;

/// Arbitrary values, nested up to a few levels deep.
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = (-1000i64..1000).prop_map(Value::Integer);
    leaf.prop_recursive(4, 32, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Value::List)
    })
}

/// Values as they appear on a line of input, always a list at the top.
fn list_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(value_strategy(), 0..5).prop_map(Value::List)
}

proptest! {
    #[test]
    fn test_printed_values_parse_back(value in value_strategy()) {
        let text = value.to_string();
        prop_assert_eq!(parse(&text), Ok(value));
    }

    #[test]
    fn test_parse_is_deterministic(value in list_strategy()) {
        let text = value.to_string();
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn test_compare_is_reflexive(value in value_strategy()) {
        prop_assert_eq!(compare(&value, &value), Ordering::Equal);
    }

    #[test]
    fn test_compare_is_antisymmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn test_integer_promotion(n in any::<i64>()) {
        let promoted = Value::List(vec![Value::Integer(n)]);
        prop_assert_eq!(compare(&Value::Integer(n), &promoted), Ordering::Equal);
        prop_assert_eq!(compare(&promoted, &Value::Integer(n)), Ordering::Equal);
    }

    #[test]
    fn test_empty_list_sorts_first(value in list_strategy()) {
        let empty = Value::List(vec![]);
        let expected = match &value {
            Value::List(items) if items.is_empty() => Ordering::Equal,
            _ => Ordering::Less,
        };
        prop_assert_eq!(compare(&empty, &value), expected);
    }

    #[test]
    fn test_garbage_never_panics(text in "[\\[\\],0-9 -]{0,16}") {
        let _ = parse(&text);
    }
}
