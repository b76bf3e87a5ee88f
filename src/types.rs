//! Common types used throughout the Attio CLI
//!
//! Response envelopes and type aliases shared by the client, the resource
//! methods and the CLI.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type; every Attio resource is handled as one
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Envelopes
// ============================================================================

/// `{"data": ...}` wrapper used by most responses.
///
/// A missing or `null` `data` decodes as `T::default()`, so an empty list
/// page ends pagination instead of failing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

/// `{"data": [...], "pagination": {"next_cursor": ...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<JsonObject>,
    #[serde(default)]
    pub pagination: Option<CursorPagination>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursorPagination {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl CursorEnvelope {
    /// Split into the page's items and the next cursor (empty when done)
    pub fn into_page(self) -> (Vec<JsonObject>, String) {
        let next = self
            .pagination
            .and_then(|p| p.next_cursor)
            .unwrap_or_default();
        (self.data, next)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Token introspection
// ============================================================================

/// Response of `GET /v2/self`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfInfo {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_by_workspace_member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_logo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_envelope_into_page() {
        let envelope: CursorEnvelope = serde_json::from_value(json!({
            "data": [{"id": 1}],
            "pagination": {"next_cursor": "abc"}
        }))
        .unwrap();
        let (items, next) = envelope.into_page();
        assert_eq!(items.len(), 1);
        assert_eq!(next, "abc");
    }

    #[test]
    fn test_cursor_envelope_without_pagination_is_last_page() {
        let envelope: CursorEnvelope =
            serde_json::from_value(json!({"data": [], "pagination": {"next_cursor": null}}))
                .unwrap();
        assert_eq!(envelope.into_page().1, "");

        let envelope: CursorEnvelope = serde_json::from_value(json!({"data": []})).unwrap();
        assert_eq!(envelope.into_page().1, "");
    }

    #[test]
    fn test_envelope_null_or_missing_data_is_empty() {
        for raw in [json!({"data": null}), json!({})] {
            let envelope: Envelope<Vec<JsonObject>> = serde_json::from_value(raw.clone()).unwrap();
            assert!(envelope.data.is_empty());

            let envelope: Envelope<JsonObject> = serde_json::from_value(raw).unwrap();
            assert!(envelope.data.is_empty());
        }

        let envelope: CursorEnvelope = serde_json::from_value(json!({
            "data": null,
            "pagination": {"next_cursor": "abc"}
        }))
        .unwrap();
        assert_eq!(envelope.into_page(), (Vec::new(), "abc".to_string()));
    }

    #[test]
    fn test_self_info_tolerates_missing_fields() {
        let info: SelfInfo = serde_json::from_value(json!({
            "active": true,
            "workspace_name": "Acme",
            "workspace_logo_url": null
        }))
        .unwrap();
        assert!(info.active);
        assert_eq!(info.workspace_name.as_deref(), Some("Acme"));
        assert!(info.workspace_logo_url.is_none());
    }
}
