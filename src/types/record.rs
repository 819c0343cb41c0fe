//! Generic records exchanged with the host platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::DbError;

/// One row of host data: field name to scalar value, in natural field order.
///
/// Used for both input and output records. No fixed shape is imposed, so
/// records in one batch may carry different fields.
pub type Record = Map<String, Value>;

/// A record wrapped in the host's output item shape (`{"json": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    pub json: Record,
}

/// Output in the host's multi-port shape. This node always fills one port.
pub type NodeOutput = Vec<Vec<OutputItem>>;

/// Wrap plain rows as output items.
pub fn return_json_array(rows: Vec<Record>) -> Vec<OutputItem> {
    rows.into_iter().map(|json| OutputItem { json }).collect()
}

/// Wrap items into the single-port output shape.
pub fn prepare_output_data(items: Vec<OutputItem>) -> NodeOutput {
    vec![items]
}

/// Parse an input batch from JSON text.
///
/// Accepts an array of objects, or an array of `{"json": {...}}` items as
/// produced by this node, so output can be piped back in.
pub fn records_from_json(text: &str) -> Result<Vec<Record>, DbError> {
    let value: Value = serde_json::from_str(text).map_err(|e| DbError::InvalidInput {
        message: e.to_string(),
    })?;

    let Value::Array(items) = value else {
        return Err(DbError::InvalidInput {
            message: "expected a JSON array of objects".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(obj) => Ok(unwrap_item(obj)),
            other => Err(DbError::InvalidInput {
                message: format!("item {} is not an object: {}", idx, other),
            }),
        })
        .collect()
}

/// Strip the `{"json": {...}}` wrapper when it is the item's only field.
fn unwrap_item(mut obj: Record) -> Record {
    if obj.len() == 1 && matches!(obj.get("json"), Some(Value::Object(_))) {
        if let Some(Value::Object(inner)) = obj.remove("json") {
            return inner;
        }
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_return_json_array_wraps_rows() {
        let mut row = Record::new();
        row.insert("id".to_string(), json!(1));
        let items = return_json_array(vec![row.clone()]);
        assert_eq!(items, vec![OutputItem { json: row }]);
    }

    #[rstest]
    fn test_prepare_output_data_single_port() {
        let output = prepare_output_data(vec![]);
        assert_eq!(output.len(), 1);
        assert!(output[0].is_empty());
    }

    #[rstest]
    fn test_output_item_serializes_under_json_key() {
        let mut row = Record::new();
        row.insert("id".to_string(), json!(1));
        let value = serde_json::to_value(prepare_output_data(return_json_array(vec![row]))).unwrap();
        assert_eq!(value, json!([[{"json": {"id": 1}}]]));
    }

    #[rstest]
    fn test_records_from_json_plain_objects() {
        let records = records_from_json(r#"[{"id": 1, "name": "x"}, {"id": 2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(records[1]["id"], json!(2));
    }

    #[rstest]
    fn test_records_from_json_preserves_field_order() {
        let records = records_from_json(r#"[{"z": 1, "a": 2, "m": 3}]"#).unwrap();
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[rstest]
    fn test_records_from_json_unwraps_items() {
        let records = records_from_json(r#"[{"json": {"id": 1}}]"#).unwrap();
        assert_eq!(records[0], json!({"id": 1}).as_object().unwrap().clone());
    }

    #[rstest]
    fn test_records_from_json_keeps_json_column_next_to_others() {
        let records = records_from_json(r#"[{"json": {"a": 1}, "id": 2}]"#).unwrap();
        assert_eq!(records[0]["id"], json!(2));
        assert_eq!(records[0]["json"], json!({"a": 1}));
    }

    #[rstest]
    fn test_records_from_json_empty_array() {
        assert!(records_from_json("[]").unwrap().is_empty());
    }

    #[rstest]
    #[case(r#"{"id": 1}"#)]
    #[case(r#"[1, 2]"#)]
    #[case("not json")]
    fn test_records_from_json_rejects(#[case] text: &str) {
        assert!(matches!(records_from_json(text), Err(DbError::InvalidInput { .. })));
    }
}
