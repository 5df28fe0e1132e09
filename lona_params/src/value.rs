// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers for comparing and constructing wire values.

use serde_json::Value;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Builds a number value, using the integer form when `n` has no fractional part.
///
/// Structured data does not distinguish `50` from `50.0`, but `serde_json` does.
/// Storing integral numbers as integers keeps encoded documents stable and makes
/// them compare equal to hand-written fixtures.
///
/// Non-finite inputs become `null`, which a [`ParameterStore`](crate::ParameterStore)
/// treats as absence.
#[must_use]
pub fn number_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "integral and within the exactly representable range"
        )]
        let int = n as i64;
        Value::from(int)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Compares two values, treating numbers by magnitude rather than representation.
///
/// `json!(0)` and `json!(0.0)` are distinct to `PartialEq` but mean the same thing
/// in a layer document. Arrays and objects compare element-wise with the same rule.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_numbers_use_integer_form() {
        assert_eq!(number_value(50.0), json!(50));
        assert_eq!(number_value(-3.0), json!(-3));
        assert_eq!(number_value(0.5), json!(0.5));
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(number_value(f64::NAN), Value::Null);
        assert_eq!(number_value(f64::INFINITY), Value::Null);
    }

    #[test]
    fn numbers_compare_by_magnitude() {
        assert!(values_equal(&json!(0), &json!(0.0)));
        assert!(values_equal(&json!([1, 2.0]), &json!([1.0, 2])));
        assert!(values_equal(&json!({"a": 1}), &json!({"a": 1.0})));
        assert!(!values_equal(&json!(0), &json!(false)));
        assert!(!values_equal(&json!("0"), &json!(0)));
    }
}
