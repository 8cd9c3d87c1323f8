//! Option normalization.
//!
//! Variant and measurement definitions arrive in three shapes: a plain
//! label string, a JSON-encoded string carrying a `label` field, or a
//! structured object. [`parse_option`] folds all of them into
//! [`ProductOption`] and is a fixed point over its own output, so parsed
//! rows can be fed back through without changing.

use serde_json::Value;

use crate::domain::catalog::models::ProductOption;

/// Normalize one raw option value.
///
/// Returns `None` when no usable label can be extracted; malformed
/// values never abort the surrounding parse.
#[must_use]
pub fn parse_option(raw: &Value) -> Option<ProductOption> {
    match raw {
        Value::String(text) => parse_text(text),
        Value::Object(_) | Value::Array(_) => parse_structured(raw),
        _ => None,
    }
}

/// Normalize a raw option list, dropping unusable entries.
#[must_use]
pub fn parse_options(raw: &[Value]) -> Vec<ProductOption> {
    raw.iter().filter_map(parse_option).collect()
}

fn parse_text(text: &str) -> Option<ProductOption> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Only strings shaped like JSON and mentioning a label are worth a
    // parse attempt; anything else is a bare label.
    if looks_like_json(trimmed) && trimmed.contains("label") {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            if let Some(option) = parse_structured(&value) {
                return Some(option);
            }
        }
    }

    Some(ProductOption {
        label: trimmed.to_string(),
        image_ref: None,
        price: None,
    })
}

fn looks_like_json(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[')
}

fn parse_structured(value: &Value) -> Option<ProductOption> {
    let object = match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }?;

    let label = object.get("label").and_then(label_text)?;

    Some(ProductOption {
        label,
        image_ref: object
            .get("image_ref")
            .or_else(|| object.get("image"))
            .and_then(Value::as_str)
            .map(str::to_string),
        price: object.get("price").and_then(price_value),
    })
}

fn label_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

/// Numeric and numeric-string prices are accepted; anything parsing to
/// NaN is dropped from the option rather than propagated.
fn price_value(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (!price.is_nan()).then_some(price)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_string_becomes_label() {
        let option = parse_option(&json!("  Red  ")).expect("should parse");

        assert_eq!(option.label, "Red");
        assert_eq!(option.image_ref, None);
        assert_eq!(option.price, None);
    }

    #[test]
    fn empty_and_null_are_dropped() {
        assert_eq!(parse_option(&json!("")), None);
        assert_eq!(parse_option(&json!("   ")), None);
        assert_eq!(parse_option(&Value::Null), None);
    }

    #[test]
    fn json_string_with_label_is_unwrapped() {
        let option = parse_option(&json!(r#"{"label": "Blue", "price": "4.50"}"#))
            .expect("should parse");

        assert_eq!(option.label, "Blue");
        assert_eq!(option.price, Some(4.5));
    }

    #[test]
    fn malformed_json_string_falls_back_to_bare_label() {
        let raw = r#"{"label": "Blue""#;

        let option = parse_option(&json!(raw)).expect("should parse");

        assert_eq!(option.label, raw);
    }

    #[test]
    fn json_shaped_string_without_label_stays_a_label() {
        let raw = r#"{"color": "Blue"}"#;

        let option = parse_option(&json!(raw)).expect("should parse");

        assert_eq!(option.label, raw);
    }

    #[test]
    fn object_with_numeric_string_price() {
        let option =
            parse_option(&json!({"label": "1L", "price": "12.99"})).expect("should parse");

        assert_eq!(option.label, "1L");
        assert_eq!(option.price, Some(12.99));
    }

    #[test]
    fn nan_price_is_dropped_from_the_option() {
        let option = parse_option(&json!({"label": "1L", "price": "NaN"})).expect("should parse");

        assert_eq!(option.label, "1L");
        assert_eq!(option.price, None);
    }

    #[test]
    fn unparsable_price_is_dropped_from_the_option() {
        let option =
            parse_option(&json!({"label": "1L", "price": "twelve"})).expect("should parse");

        assert_eq!(option.price, None);
    }

    #[test]
    fn object_without_label_is_dropped() {
        assert_eq!(parse_option(&json!({"price": 3.0})), None);
        assert_eq!(parse_option(&json!({"label": "  "})), None);
    }

    #[test]
    fn array_takes_its_first_labelled_object() {
        let option = parse_option(&json!([{"label": "500ml", "price": 2.5}, {"label": "1L"}]))
            .expect("should parse");

        assert_eq!(option.label, "500ml");
        assert_eq!(option.price, Some(2.5));
    }

    #[test]
    fn image_field_aliases_are_accepted() {
        let by_ref = parse_option(&json!({"label": "Red", "image_ref": "red.png"}))
            .expect("should parse");
        let by_image =
            parse_option(&json!({"label": "Red", "image": "red.png"})).expect("should parse");

        assert_eq!(by_ref.image_ref.as_deref(), Some("red.png"));
        assert_eq!(by_image.image_ref.as_deref(), Some("red.png"));
    }

    #[test]
    fn parsing_is_idempotent_over_its_own_output() {
        let inputs = [
            json!("Red"),
            json!(r#"{"label": "Blue", "price": 4.5}"#),
            json!({"label": "1L", "image_ref": "jug.png", "price": "12.99"}),
        ];

        for input in &inputs {
            let first = parse_option(input).expect("should parse");
            let reparsed = parse_option(&first.to_raw()).expect("should reparse");

            assert_eq!(first, reparsed, "parse must be a fixed point for {input}");
        }
    }

    #[test]
    fn odd_shapes_are_dropped_not_errors() {
        let dropped = [
            json!(42),
            json!(true),
            json!([]),
            json!([1, 2, 3]),
            json!({"label": {"nested": true}}),
        ];

        for input in &dropped {
            assert_eq!(parse_option(input), None, "expected drop for {input}");
        }

        // A string that merely looks like JSON still yields a label.
        let option = parse_option(&json!("[not json")).expect("should parse");

        assert_eq!(option.label, "[not json");
    }
}
