//! Field-level comparison of two records, ignoring the `name` key.

use super::NAME_FIELD;
use serde::Serialize;
use serde_json::{Map, Value};

/// One differing field. `None` means the key is absent on that side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub reference: Option<Value>,
    pub compared: Option<Value>,
}

impl FieldDiff {
    #[cfg(test)]
    fn swapped(&self) -> Self {
        Self {
            field: self.field.clone(),
            reference: self.compared.clone(),
            compared: self.reference.clone(),
        }
    }
}

/// Differences between `reference` and `compared` over the union of their
/// keys. Values compare structurally; an absent key never equals a present
/// one, `null` included. Reference keys come first, in their order, followed
/// by keys only the compared record has.
pub fn compare_records(
    reference: &Map<String, Value>,
    compared: &Map<String, Value>,
) -> Vec<FieldDiff> {
    let only_in_compared = compared.keys().filter(|key| !reference.contains_key(*key));

    reference
        .keys()
        .chain(only_in_compared)
        .filter(|key| key.as_str() != NAME_FIELD)
        .filter_map(|key| {
            let a = reference.get(key);
            let b = compared.get(key);
            (a != b).then(|| FieldDiff {
                field: key.clone(),
                reference: a.cloned(),
                compared: b.cloned(),
            })
        })
        .collect()
}

/// Console form of one side of a diff
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None => "<absent>".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_identical_records_have_no_diff() {
        let a = record(json!({"name": "Bat", "hp": 3, "tags": ["x"]}));
        assert!(compare_records(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_name_is_ignored() {
        let a = record(json!({"name": "Bat", "hp": 3}));
        let b = record(json!({"name": "Bat.98", "hp": 3}));
        assert!(compare_records(&a, &b).is_empty());
    }

    #[test]
    fn test_changed_field() {
        let a = record(json!({"name": "Fox", "hp": 10}));
        let b = record(json!({"name": "Fox", "hp": 12}));

        assert_eq!(
            compare_records(&a, &b),
            vec![FieldDiff {
                field: "hp".to_string(),
                reference: Some(json!(10)),
                compared: Some(json!(12)),
            }]
        );
    }

    #[test]
    fn test_absent_differs_from_null() {
        let a = record(json!({"name": "Owl", "type": null}));
        let b = record(json!({"name": "Owl"}));

        assert_eq!(
            compare_records(&a, &b),
            vec![FieldDiff {
                field: "type".to_string(),
                reference: Some(Value::Null),
                compared: None,
            }]
        );
    }

    #[test]
    fn test_nested_values_compare_deeply() {
        let a = record(json!({"stats": {"atk": 1, "def": [1, 2]}}));
        let b = record(json!({"stats": {"def": [1, 2], "atk": 1}}));
        let c = record(json!({"stats": {"atk": 1, "def": [2, 1]}}));

        assert!(compare_records(&a, &b).is_empty());
        assert_eq!(compare_records(&a, &c).len(), 1);
    }

    #[test]
    fn test_key_order_is_reference_then_compared() {
        let a = record(json!({"b": 1, "a": 1}));
        let b = record(json!({"z": 1, "a": 2}));

        let fields: Vec<String> = compare_records(&a, &b).into_iter().map(|d| d.field).collect();
        assert_eq!(fields, vec!["b", "a", "z"]);
    }

    #[test]
    fn test_comparison_is_symmetric_up_to_swap() {
        let a = record(json!({"name": "Fox", "hp": 10, "only_a": true}));
        let b = record(json!({"name": "Fox", "hp": 12, "only_b": "x"}));

        let mut forward: Vec<FieldDiff> = compare_records(&a, &b)
            .iter()
            .map(FieldDiff::swapped)
            .collect();
        let mut backward = compare_records(&b, &a);
        forward.sort_by(|x, y| x.field.cmp(&y.field));
        backward.sort_by(|x, y| x.field.cmp(&y.field));

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(None), "<absent>");
        assert_eq!(render_value(Some(&json!("でんき"))), "でんき");
        assert_eq!(render_value(Some(&json!(12))), "12");
        assert_eq!(render_value(Some(&json!({"a": [1]}))), r#"{"a":[1]}"#);
    }
}
