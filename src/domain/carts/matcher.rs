//! Cart line matching.

use crate::domain::carts::records::CartLineRecord;

/// Find an existing line carrying the same (variant, measurement)
/// selection as the candidate.
///
/// Labels are compared after unwrapping whatever shape each line stored,
/// so a legacy bare-label row matches a row holding the full option
/// object. An absent selection only matches an absent selection.
#[must_use]
pub fn find_matching_line<'a>(
    lines: &'a [CartLineRecord],
    variant_label: Option<&str>,
    measurement_label: Option<&str>,
) -> Option<&'a CartLineRecord> {
    lines.iter().find(|line| {
        line.variant_label().as_deref() == variant_label
            && line.measurement_label().as_deref() == measurement_label
    })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;

    fn line(variant: Option<Value>, measurement: Option<Value>) -> CartLineRecord {
        CartLineRecord {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            quantity: 1,
            variant,
            measurement,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn bare_line_matches_bare_candidate() {
        let lines = [line(None, None)];

        assert!(find_matching_line(&lines, None, None).is_some());
        assert!(find_matching_line(&lines, Some("Red"), None).is_none());
    }

    #[test]
    fn variant_labels_must_agree() {
        let lines = [line(Some(json!("Red")), None)];

        assert!(find_matching_line(&lines, Some("Red"), None).is_some());
        assert!(find_matching_line(&lines, Some("Blue"), None).is_none());
        assert!(find_matching_line(&lines, None, None).is_none());
    }

    #[test]
    fn json_encoded_measurement_is_unwrapped_before_comparison() {
        let stored_as_object = line(None, Some(json!({"label": "1L", "price": 3.0})));
        let stored_as_json_string = line(None, Some(json!(r#"{"label": "1L"}"#)));
        let stored_as_bare_label = line(None, Some(json!("1L")));

        for stored in [stored_as_object, stored_as_json_string, stored_as_bare_label] {
            let lines = [stored];

            assert!(
                find_matching_line(&lines, None, Some("1L")).is_some(),
                "expected a match for {:?}",
                lines[0].measurement
            );
        }
    }

    #[test]
    fn full_tuple_must_agree() {
        let lines = [line(Some(json!("Red")), Some(json!("1L")))];

        assert!(find_matching_line(&lines, Some("Red"), Some("1L")).is_some());
        assert!(find_matching_line(&lines, Some("Red"), Some("500ml")).is_none());
    }
}
