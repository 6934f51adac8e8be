//! Normalization of select/choice data into a uniform option list.
//!
//! Producers send choice-widget data in three shapes: a key/value mapping, an
//! array of `[label, value]` pairs, or a flat array of values doubling as
//! labels. The view layer only ever sees [`SelectOption`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One entry of a choice widget: what to display and what to submit.
///
/// Labels stay as raw JSON values: the flat-array shape uses the element
/// itself as its own label, which may be a number or bool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label.
    pub label: Value,
    /// Value submitted when the option is picked.
    pub value: Value,
}

impl SelectOption {
    /// Create an option from a label and a value.
    pub fn new(label: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Normalize raw select data into an ordered option list.
///
/// Accepted shapes:
/// - object: keys become labels, in delivered order
/// - array where every element is a 2-element array: `[label, value]` pairs
/// - any other array: each element is both label and value
///
/// `null` yields an empty list; any other shape is logged and yields an
/// empty list. Never fails.
pub fn parse_select_options(raw: &Value) -> Vec<SelectOption> {
    match raw {
        Value::Null => Vec::new(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| SelectOption::new(key.clone(), value.clone()))
            .collect(),
        Value::Array(items) => {
            let all_pairs = items
                .iter()
                .all(|item| matches!(item, Value::Array(pair) if pair.len() == 2));
            if all_pairs {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Array(pair) => {
                            Some(SelectOption::new(pair[0].clone(), pair[1].clone()))
                        }
                        _ => None,
                    })
                    .collect()
            } else {
                items
                    .iter()
                    .map(|item| SelectOption::new(item.clone(), item.clone()))
                    .collect()
            }
        }
        other => {
            warn!("invalid select data: {other}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_shape_keeps_delivered_order() {
        let raw = json!({ "Zebra": 3, "Apple": 1, "Mango": 2 });
        let options = parse_select_options(&raw);
        assert_eq!(
            options,
            vec![
                SelectOption::new("Zebra", 3),
                SelectOption::new("Apple", 1),
                SelectOption::new("Mango", 2),
            ]
        );
    }

    #[test]
    fn pair_array_shape() {
        let raw = json!([["Low", 1], ["High", 10]]);
        let options = parse_select_options(&raw);
        assert_eq!(
            options,
            vec![SelectOption::new("Low", 1), SelectOption::new("High", 10)]
        );
    }

    #[test]
    fn flat_array_uses_value_as_label() {
        let raw = json!(["auto", "manual", 42]);
        let options = parse_select_options(&raw);
        assert_eq!(options.len(), 3);
        assert_eq!(options[2], SelectOption::new(42, 42));
    }

    #[test]
    fn mixed_array_falls_back_to_flat() {
        // One element is not a 2-element array, so the whole list is flat.
        let raw = json!([["Low", 1], "manual"]);
        let options = parse_select_options(&raw);
        assert_eq!(options[0].label, json!(["Low", 1]));
        assert_eq!(options[1], SelectOption::new("manual", "manual"));
    }

    #[test]
    fn null_yields_empty() {
        assert!(parse_select_options(&Value::Null).is_empty());
    }

    #[test]
    fn scalar_yields_empty() {
        assert!(parse_select_options(&json!(42)).is_empty());
        assert!(parse_select_options(&json!("oops")).is_empty());
    }

    #[test]
    fn empty_array_yields_empty() {
        assert!(parse_select_options(&json!([])).is_empty());
    }
}
