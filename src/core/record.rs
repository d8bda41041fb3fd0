//! # Records
//!
//! Upstream records are untyped JSON objects. Before anything is rendered
//! they are normalized into a `RecordView`: one display string plus the
//! ordered list of string-valued fields.
//!
//! ```text
//! {"name":"Tatooine","climate":"arid","residents":[...]}
//!        │
//!        ▼  RecordView::from_value(.., &["name", "title"])
//! RecordView { display: "Tatooine",
//!              fields: [("name","Tatooine"), ("climate","arid")] }
//! ```
//!
//! Nested objects, arrays, numbers and nulls are skipped, not summarized.

use serde_json::Value;

/// Shown when a record carries none of the configured display keys.
pub const PLACEHOLDER_DISPLAY: &str = "(untitled)";

/// Display key rule used when a screen doesn't configure one.
pub fn default_display_keys() -> Vec<String> {
    vec!["name".to_string(), "title".to_string()]
}

/// A single label/value row of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

/// Normalized view-model for one upstream record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    /// The single line of text that represents this record in a list.
    pub display: String,
    /// String-valued fields, in upstream order.
    pub fields: Vec<Field>,
}

impl RecordView {
    /// Normalize an upstream record.
    ///
    /// The first key in `display_keys` holding a string wins. Records that
    /// aren't JSON objects normalize to a placeholder with no fields.
    pub fn from_value(value: &Value, display_keys: &[String]) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                display: PLACEHOLDER_DISPLAY.to_string(),
                fields: Vec::new(),
            };
        };

        let display = display_keys
            .iter()
            .find_map(|key| object.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| PLACEHOLDER_DISPLAY.to_string());

        let fields = object
            .iter()
            .filter_map(|(label, value)| {
                value.as_str().map(|v| Field {
                    label: label.clone(),
                    value: v.to_string(),
                })
            })
            .collect();

        Self { display, fields }
    }

    /// Look up a string field by label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Normalize a whole page of upstream results.
pub fn normalize_all(values: &[Value], display_keys: &[String]) -> Vec<RecordView> {
    values
        .iter()
        .map(|v| RecordView::from_value(v, display_keys))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_is_preferred_display_key() {
        let record = RecordView::from_value(
            &json!({"name": "Tatooine", "title": "ignored"}),
            &default_display_keys(),
        );
        assert_eq!(record.display, "Tatooine");
    }

    #[test]
    fn test_title_is_fallback_display_key() {
        let record = RecordView::from_value(
            &json!({"title": "A New Hope", "episode_id": 4}),
            &default_display_keys(),
        );
        assert_eq!(record.display, "A New Hope");
        // episode_id is numeric, so it doesn't become a row
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn test_missing_display_keys_use_placeholder() {
        let record = RecordView::from_value(&json!({"model": "T-65"}), &default_display_keys());
        assert_eq!(record.display, PLACEHOLDER_DISPLAY);
        assert_eq!(record.field("model"), Some("T-65"));
    }

    #[test]
    fn test_non_string_display_key_is_skipped() {
        let record = RecordView::from_value(
            &json!({"name": 42, "title": "Fallback"}),
            &default_display_keys(),
        );
        assert_eq!(record.display, "Fallback");
    }

    #[test]
    fn test_non_object_record_is_placeholder() {
        let record = RecordView::from_value(&json!("just a string"), &default_display_keys());
        assert_eq!(record.display, PLACEHOLDER_DISPLAY);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_only_string_fields_kept_in_order() {
        let record = RecordView::from_value(
            &json!({
                "name": "Tatooine",
                "climate": "arid",
                "terrain": "desert",
                "residents": ["https://swapi.dev/api/people/1/"],
                "orbit": {"period": "304"}
            }),
            &default_display_keys(),
        );
        let labels: Vec<&str> = record.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["name", "climate", "terrain"]);
    }

    #[test]
    fn test_custom_display_keys() {
        let keys = vec!["model".to_string()];
        let record = RecordView::from_value(&json!({"name": "X-wing", "model": "T-65"}), &keys);
        assert_eq!(record.display, "T-65");
    }
}
