//! Loose value coercions used by visibility conditions.
//!
//! Condition literals come from hand-written definitions, so `"5"` and `5`
//! must compare the same way for the ordering operators. Numbers follow the
//! usual loose rules: blank text is zero, unparsable text is NaN, booleans
//! are 0/1, a one-element list reads as its element.

use serde_json::Value;

use crate::models::AnswerValue;

/// Numeric reading of an answer; NaN when it has none.
pub fn answer_to_number(value: Option<&AnswerValue>) -> f64 {
    match value {
        None => f64::NAN,
        Some(AnswerValue::Flag(flag)) => bool_to_number(*flag),
        Some(AnswerValue::Number(n)) => *n,
        Some(AnswerValue::Text(text)) => text_to_number(text),
        Some(AnswerValue::Choices(choices)) => match choices.as_slice() {
            [] => 0.0,
            [only] => text_to_number(only),
            _ => f64::NAN,
        },
        Some(AnswerValue::Measurements(_)) => f64::NAN,
    }
}

/// Numeric reading of a condition literal; NaN when it has none.
pub fn literal_to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => bool_to_number(*flag),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text_to_number(text),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [only] => literal_to_number(only),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Text reading of an answer. Lists join with commas.
pub fn answer_to_text(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Flag(flag) => flag.to_string(),
        AnswerValue::Number(n) => number_to_text(*n),
        AnswerValue::Text(text) => text.clone(),
        AnswerValue::Choices(choices) => choices.join(","),
        AnswerValue::Measurements(values) => values
            .iter()
            .map(|(key, n)| format!("{key}={}", number_to_text(*n)))
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Text reading of a condition literal.
pub fn literal_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(n) => n.as_f64().map(number_to_text).unwrap_or_else(|| n.to_string()),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(literal_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Same-type equality between an answer and a literal. No coercion: the
/// text `"5"` never equals the number `5`.
pub fn strictly_equal(answer: &AnswerValue, literal: &Value) -> bool {
    match (answer, literal) {
        (AnswerValue::Flag(a), Value::Bool(b)) => a == b,
        (AnswerValue::Number(a), Value::Number(b)) => b.as_f64().is_some_and(|b| *a == b),
        (AnswerValue::Text(a), Value::String(b)) => a == b,
        (AnswerValue::Choices(a), Value::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(a, b)| b.as_str().is_some_and(|b| a == b))
        }
        (AnswerValue::Measurements(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, n)| {
                    b.get(key)
                        .and_then(Value::as_f64)
                        .is_some_and(|other| *n == other)
                })
        }
        _ => false,
    }
}

fn bool_to_number(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn text_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats whole numbers without a fraction (`500`, not `500.0`).
pub fn number_to_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_number_coercion() {
        assert_eq!(answer_to_number(Some(&AnswerValue::Text("10".into()))), 10.0);
        assert_eq!(answer_to_number(Some(&AnswerValue::Text(" ".into()))), 0.0);
        assert!(answer_to_number(Some(&AnswerValue::Text("abc".into()))).is_nan());
        assert!(answer_to_number(None).is_nan());
        assert_eq!(answer_to_number(Some(&AnswerValue::Flag(true))), 1.0);
        assert_eq!(
            answer_to_number(Some(&AnswerValue::Choices(vec!["7".into()]))),
            7.0
        );

        assert_eq!(literal_to_number(&json!("5")), 5.0);
        assert_eq!(literal_to_number(&json!(null)), 0.0);
        assert!(literal_to_number(&json!({"a": 1})).is_nan());
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(answer_to_text(&AnswerValue::Number(500.0)), "500");
        assert_eq!(answer_to_text(&AnswerValue::Number(2.5)), "2.5");
        assert_eq!(
            answer_to_text(&AnswerValue::Choices(vec!["led".into(), "heater".into()])),
            "led,heater"
        );
        assert_eq!(literal_to_text(&json!(5)), "5");
        assert_eq!(literal_to_text(&json!(true)), "true");
    }

    #[test]
    fn test_strict_equality() {
        assert!(strictly_equal(&AnswerValue::Text("black".into()), &json!("black")));
        assert!(!strictly_equal(&AnswerValue::Text("5".into()), &json!(5)));
        assert!(strictly_equal(&AnswerValue::Number(5.0), &json!(5)));
        assert!(strictly_equal(&AnswerValue::Flag(true), &json!(true)));
        assert!(strictly_equal(
            &AnswerValue::Choices(vec!["a".into(), "b".into()]),
            &json!(["a", "b"])
        ));
        assert!(!strictly_equal(&AnswerValue::Flag(true), &json!("true")));
    }
}
