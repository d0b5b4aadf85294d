//! Account data model shared with the backend bridge.
//!
//! An [`AccountItem`] is built fresh from every bridge response. The payload is
//! untyped on the wire, so construction copies the six known keys without
//! presence checks: a missing key, an explicit `null`, or a value of the wrong
//! JSON type all leave the field as `None`.
//!
//! # Example
//!
//! ```
//! use account_desk_core::model::AccountItem;
//!
//! let item = AccountItem::from_json_text(r#"{"id": 7, "phone": "555"}"#).unwrap();
//! assert_eq!(item.id, Some(7));
//! assert_eq!(item.name, None);
//! ```

mod error;

pub use error::ModelError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// One managed messaging account as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct AccountItem {
    /// Backend-assigned identifier, unique within a page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Phone number; also the lookup key for search and session switching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    /// Whether the account is enabled for outgoing actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Creation time, formatted by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Older backends spell the creation timestamp key without the `d`.
const LEGACY_CREATED_AT_KEY: &str = "create_at";

impl AccountItem {
    /// Parses JSON text and copies the account fields out of the top-level object.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidJson`] when the text is not JSON and
    /// [`ModelError::NotAnObject`] when the top-level value is not an object.
    pub fn from_json_text(text: &str) -> Result<Self, ModelError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| ModelError::InvalidJson { source })?;
        Self::from_value(value)
    }

    /// Copies the account fields out of an already-decoded JSON object.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            id: field(record, "id", Value::as_u64),
            phone: field(record, "phone", owned_str),
            name: field(record, "name", owned_str),
            is_premium: field(record, "is_premium", Value::as_bool),
            is_active: field(record, "is_active", Value::as_bool),
            created_at: field(record, "created_at", owned_str)
                .or_else(|| field(record, LEGACY_CREATED_AT_KEY, owned_str)),
        }
    }

    /// Builds an item from a decoded JSON value of unknown shape.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotAnObject`] when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(record) => Ok(Self::from_record(&record)),
            other => Err(ModelError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

impl TryFrom<Value> for AccountItem {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn field<T>(
    record: &Map<String, Value>,
    key: &str,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = record.get(key)?;
    if value.is_null() {
        return None;
    }
    let extracted = extract(value);
    if extracted.is_none() {
        debug!(
            key,
            found = json_kind(value),
            "Ignoring account field with unexpected JSON type"
        );
    }
    extracted
}

fn owned_str(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{"id":1,"phone":"555","name":"A","is_premium":false,"is_active":true,"created_at":"2024-01-01"}"#;

    fn sample_item() -> AccountItem {
        AccountItem {
            id: Some(1),
            phone: Some("555".to_string()),
            name: Some("A".to_string()),
            is_premium: Some(false),
            is_active: Some(true),
            created_at: Some("2024-01-01".to_string()),
        }
    }

    #[test]
    fn test_from_json_text_copies_all_fields() {
        let item = AccountItem::from_json_text(SAMPLE).unwrap();
        assert_eq!(item, sample_item());
    }

    #[test]
    fn test_from_record_matches_from_json_text() {
        let value: Value = serde_json::from_str(SAMPLE).unwrap();
        let record = value.as_object().unwrap();

        let from_record = AccountItem::from_record(record);
        let from_text = AccountItem::from_json_text(SAMPLE).unwrap();
        assert_eq!(from_record, from_text);
        assert_eq!(from_record, sample_item());
    }

    #[test]
    fn test_missing_fields_stay_none() {
        let item = AccountItem::from_json_text(r#"{"phone":"555"}"#).unwrap();
        assert_eq!(item.phone.as_deref(), Some("555"));
        assert_eq!(item.id, None);
        assert_eq!(item.name, None);
        assert_eq!(item.is_premium, None);
        assert_eq!(item.is_active, None);
        assert_eq!(item.created_at, None);
    }

    #[test]
    fn test_empty_object_yields_default_item() {
        let item = AccountItem::from_json_text("{}").unwrap();
        assert_eq!(item, AccountItem::default());
    }

    #[test]
    fn test_null_and_wrong_typed_fields_become_none() {
        let record = json!({
            "id": "seven",
            "phone": 555,
            "name": null,
            "is_premium": "yes",
            "is_active": 1,
            "created_at": ["2024"]
        });
        let item = AccountItem::from_record(record.as_object().unwrap());
        assert_eq!(item, AccountItem::default());
    }

    #[test]
    fn test_negative_id_is_ignored() {
        let item = AccountItem::from_json_text(r#"{"id":-3}"#).unwrap();
        assert_eq!(item.id, None);
    }

    #[test]
    fn test_legacy_create_at_key_is_accepted() {
        let item =
            AccountItem::from_json_text(r#"{"id":2,"create_at":"2025-06-01 10:00:00"}"#).unwrap();
        assert_eq!(item.created_at.as_deref(), Some("2025-06-01 10:00:00"));
    }

    #[test]
    fn test_created_at_wins_over_legacy_key() {
        let item = AccountItem::from_json_text(
            r#"{"created_at":"2024-01-01","create_at":"1999-12-31"}"#,
        )
        .unwrap();
        assert_eq!(item.created_at.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let item = AccountItem::from_json_text(r#"{"id":4,"proxy_url":"socks5://x"}"#).unwrap();
        assert_eq!(item.id, Some(4));
    }

    #[test]
    fn test_invalid_json_text_is_rejected() {
        let err = AccountItem::from_json_text("{not json").unwrap_err();
        assert!(matches!(err, ModelError::InvalidJson { .. }), "got: {err}");
    }

    #[test]
    fn test_non_object_payloads_are_rejected() {
        let cases = [
            ("[1,2]", "array"),
            ("\"555\"", "string"),
            ("null", "null"),
            ("3", "number"),
        ];
        for (text, kind) in cases {
            let err = AccountItem::from_json_text(text).unwrap_err();
            match err {
                ModelError::NotAnObject { found } => assert_eq!(found, kind, "input: {text}"),
                other => panic!("expected NotAnObject for {text}, got: {other}"),
            }
        }
    }

    #[test]
    fn test_deserialize_list_of_items() {
        let items: Vec<AccountItem> =
            serde_json::from_str(&format!("[{SAMPLE}, {{\"id\": 2}}]")).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], sample_item());
        assert_eq!(items[1].id, Some(2));
    }

    #[test]
    fn test_deserialize_rejects_non_object_element() {
        let result: Result<Vec<AccountItem>, _> = serde_json::from_str("[1]");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_canonical_keys_and_skips_absent() {
        let item = AccountItem {
            id: Some(9),
            created_at: Some("2024-02-02".to_string()),
            ..AccountItem::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"id": 9, "created_at": "2024-02-02"}));
    }
}
